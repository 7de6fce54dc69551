//! Epic Name field discovery.
//!
//! The custom field that holds an epic's name has a site-specific id. It
//! is looked up from the project's creation metadata, with a fixed
//! fallback when the metadata does not name it.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::errors::TrackerResult;
use crate::domain::models::{CreateMeta, EPIC_ISSUE_TYPE};
use crate::domain::ports::IssueTracker;

/// Field id used when the metadata has no "Epic Name" field.
pub const FALLBACK_EPIC_NAME_FIELD: &str = "customfield_10011";

const EPIC_NAME_LABEL: &str = "epic name";

/// Pick the Epic Name field id out of creation metadata.
///
/// Looks at the first project's `Epic` issue type (exact name) and returns
/// the first field, in response order, whose name equals "Epic Name"
/// ignoring case. Falls back to [`FALLBACK_EPIC_NAME_FIELD`].
pub fn resolve_epic_name_field(meta: &CreateMeta) -> String {
    meta.projects
        .first()
        .and_then(|project| {
            project
                .issuetypes
                .iter()
                .find(|issue_type| issue_type.name == EPIC_ISSUE_TYPE)
        })
        .and_then(|epic_type| {
            epic_type
                .named_fields()
                .find(|(_, name)| is_epic_name_label(name))
                .map(|(id, _)| id.to_string())
        })
        .unwrap_or_else(|| FALLBACK_EPIC_NAME_FIELD.to_string())
}

fn is_epic_name_label(name: &str) -> bool {
    name.eq_ignore_ascii_case(EPIC_NAME_LABEL)
}

/// Resolves the Epic Name field for a project through the tracker.
#[derive(Clone)]
pub struct FieldResolver {
    tracker: Arc<dyn IssueTracker>,
}

impl FieldResolver {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Epic Name field id for `project_key`.
    ///
    /// A metadata response that lacks the field yields the fallback; a
    /// failed metadata call is returned as an error.
    pub async fn epic_name_field(&self, project_key: &str) -> TrackerResult<String> {
        let meta = self.tracker.create_meta(project_key, EPIC_ISSUE_TYPE).await?;
        let field_id = resolve_epic_name_field(&meta);

        if field_id == FALLBACK_EPIC_NAME_FIELD {
            warn!(
                project_key,
                field_id = %field_id,
                "Epic Name field not found in creation metadata, using fallback"
            );
        } else {
            debug!(project_key, field_id = %field_id, "resolved Epic Name field");
        }

        Ok(field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockIssueTracker, TrackerCall};
    use crate::domain::errors::TrackerError;
    use crate::domain::models::{IssueTypeMeta, ProjectMeta};
    use proptest::prelude::*;
    use serde_json::json;

    fn meta_with(issue_type: &str, fields: &[(&str, &str)]) -> CreateMeta {
        let mut meta_type = IssueTypeMeta {
            name: issue_type.to_string(),
            ..IssueTypeMeta::default()
        };
        for (id, name) in fields {
            meta_type
                .fields
                .insert((*id).to_string(), json!({ "name": name, "required": false }));
        }
        CreateMeta {
            projects: vec![ProjectMeta {
                key: Some("TGT".to_string()),
                issuetypes: vec![meta_type],
            }],
        }
    }

    #[test]
    fn test_finds_epic_name_field() {
        let meta = meta_with(
            "Epic",
            &[
                ("summary", "Summary"),
                ("customfield_10104", "Epic Name"),
                ("customfield_10200", "Epic Colour"),
            ],
        );
        assert_eq!(resolve_epic_name_field(&meta), "customfield_10104");
    }

    #[test]
    fn test_match_ignores_case() {
        let meta = meta_with("Epic", &[("customfield_10300", "EPIC NAME")]);
        assert_eq!(resolve_epic_name_field(&meta), "customfield_10300");
    }

    #[test]
    fn test_partial_label_does_not_match() {
        let meta = meta_with("Epic", &[("customfield_10300", "Epic Name (legacy)")]);
        assert_eq!(resolve_epic_name_field(&meta), FALLBACK_EPIC_NAME_FIELD);
    }

    #[test]
    fn test_fallback_when_field_missing() {
        let meta = meta_with("Epic", &[("summary", "Summary")]);
        assert_eq!(resolve_epic_name_field(&meta), FALLBACK_EPIC_NAME_FIELD);
    }

    #[test]
    fn test_fallback_when_no_epic_type() {
        let meta = meta_with("Story", &[("customfield_10104", "Epic Name")]);
        assert_eq!(resolve_epic_name_field(&meta), FALLBACK_EPIC_NAME_FIELD);
    }

    #[test]
    fn test_fallback_when_no_projects() {
        assert_eq!(
            resolve_epic_name_field(&CreateMeta::default()),
            FALLBACK_EPIC_NAME_FIELD
        );
    }

    #[test]
    fn test_first_match_in_response_order_wins() {
        let meta = meta_with(
            "Epic",
            &[("customfield_9", "Epic Name"), ("customfield_10011", "epic name")],
        );
        assert_eq!(resolve_epic_name_field(&meta), "customfield_9");
    }

    #[test]
    fn test_fallback_for_odd_metadata_shapes() {
        let shapes = [
            json!({"projects": null}),
            json!({"projects": [{"issuetypes": null}]}),
            json!({"projects": [{"issuetypes": [{"name": "Epic", "fields": null}]}]}),
            json!({"projects": [{"issuetypes": [{"name": "Epic", "fields": {"x": "weird"}}]}]}),
            json!({"projects": [{"issuetypes": [{"name": "Epic", "fields": {"customfield_1": {"name": null}}}]}]}),
            json!(["not", "metadata"]),
            json!(null),
        ];
        for shape in shapes {
            let meta = CreateMeta::from_value(shape.clone());
            assert_eq!(
                resolve_epic_name_field(&meta),
                FALLBACK_EPIC_NAME_FIELD,
                "shape: {shape}"
            );
        }
    }

    #[test]
    fn test_odd_definitions_do_not_hide_a_valid_one() {
        let meta = CreateMeta::from_value(json!({
            "projects": [{"issuetypes": [{
                "name": "Epic",
                "fields": {"x": "weird", "customfield_10104": {"name": "Epic Name"}}
            }]}]
        }));
        assert_eq!(resolve_epic_name_field(&meta), "customfield_10104");
    }

    proptest! {
        #[test]
        fn prop_any_casing_of_epic_name_resolves(flips in proptest::collection::vec(any::<bool>(), 9)) {
            let label: String = "Epic Name"
                .chars()
                .zip(flips)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect();
            let meta = meta_with("Epic", &[("customfield_12345", label.as_str())]);
            prop_assert_eq!(resolve_epic_name_field(&meta), "customfield_12345");
        }
    }

    #[tokio::test]
    async fn test_resolver_queries_epic_metadata_for_project() {
        let tracker =
            Arc::new(MockIssueTracker::new().with_epic_field("TGT", "customfield_10500", "Epic Name"));
        let resolver = FieldResolver::new(tracker.clone());

        let field = resolver.epic_name_field("TGT").await.unwrap();

        assert_eq!(field, "customfield_10500");
        assert_eq!(
            tracker.calls().await,
            vec![TrackerCall::CreateMeta {
                project_key: "TGT".to_string(),
                issue_type: "Epic".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_resolver_propagates_metadata_failure() {
        let tracker = Arc::new(MockIssueTracker::new().failing_create_meta(TrackerError::Api {
            operation: "create_meta",
            status: 401,
            body: serde_json::json!("Unauthorized"),
        }));
        let resolver = FieldResolver::new(tracker);

        let err = resolver.epic_name_field("TGT").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}
