//! Epic clone service.
//!
//! Creates a new epic from a summary, then re-creates each child of a
//! template epic under it. Remote calls are made one at a time; children
//! are cloned in the order the child query returned them.
//!
//! Nothing is rolled back on failure. The returned [`CloneError`] carries
//! the new epic key and the children created so far.

use std::sync::Arc;

use tracing::{error, info, instrument, Span};
use uuid::Uuid;

use crate::domain::errors::{CloneError, TrackerResult};
use crate::domain::models::{
    CloneOutcome, CloneRequest, CreatedIssue, EpicDraft, NewIssue, TemplateIssue,
};
use crate::domain::ports::IssueTracker;

use super::child_fetcher::ChildFetcher;
use super::field_resolver::FieldResolver;

/// Clones epics through an [`IssueTracker`].
#[derive(Clone)]
pub struct EpicCloneService {
    tracker: Arc<dyn IssueTracker>,
    field_resolver: FieldResolver,
    child_fetcher: ChildFetcher,
}

impl EpicCloneService {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self {
            field_resolver: FieldResolver::new(Arc::clone(&tracker)),
            child_fetcher: ChildFetcher::new(Arc::clone(&tracker)),
            tracker,
        }
    }

    pub const fn field_resolver(&self) -> &FieldResolver {
        &self.field_resolver
    }

    /// Create an epic, writing its epic name to the project's Epic Name field.
    pub async fn create_epic(&self, draft: &EpicDraft) -> TrackerResult<CreatedIssue> {
        let field_id = self
            .field_resolver
            .epic_name_field(&draft.project_key)
            .await?;
        let issue = NewIssue::epic(draft, &field_id);
        let created = self.tracker.create_issue(&issue).await?;

        info!(
            epic_key = %created.key,
            project_key = %draft.project_key,
            "created epic"
        );
        Ok(created)
    }

    /// Re-create `template` in `project_key` as a child of `parent_epic_key`.
    pub async fn clone_child(
        &self,
        project_key: &str,
        parent_epic_key: &str,
        template: &TemplateIssue,
    ) -> TrackerResult<CreatedIssue> {
        let issue = NewIssue::child_of(project_key, parent_epic_key, template);
        let created = self.tracker.create_issue(&issue).await?;

        info!(
            template_key = %template.key,
            child_key = %created.key,
            parent_epic_key,
            "cloned child issue"
        );
        Ok(created)
    }

    /// Clone the template epic named in `request` into its target project.
    ///
    /// The new epic uses the requested summary as both summary and epic
    /// name. Validation failures are returned before any remote call.
    pub async fn clone_epic(&self, request: &CloneRequest) -> Result<CloneOutcome, CloneError> {
        self.clone_epic_named(request, &request.new_epic_summary).await
    }

    /// [`clone_epic`](Self::clone_epic) with an explicit Epic Name.
    #[instrument(
        name = "clone_epic",
        skip(self, request, epic_name),
        fields(
            clone_id = %Uuid::new_v4(),
            template_epic_key = %request.template_epic_key,
            target_project_key = %request.target_project_key,
            new_epic_key = tracing::field::Empty,
        )
    )]
    pub async fn clone_epic_named(
        &self,
        request: &CloneRequest,
        epic_name: &str,
    ) -> Result<CloneOutcome, CloneError> {
        request.validate()?;

        let draft = EpicDraft::new(&request.new_epic_summary, &request.target_project_key)
            .with_epic_name(epic_name);
        let epic = self
            .create_epic(&draft)
            .await
            .map_err(|source| CloneError::EpicCreation {
                project_key: request.target_project_key.clone(),
                source,
            })?;
        Span::current().record("new_epic_key", epic.key.as_str());

        let children = self
            .child_fetcher
            .fetch_children(&request.template_epic_key)
            .await
            .map_err(|source| CloneError::ChildFetch {
                template_epic_key: request.template_epic_key.clone(),
                new_epic_key: epic.key.clone(),
                source,
            })?;

        let mut created_children = Vec::with_capacity(children.len());
        for template in &children {
            match self
                .clone_child(&request.target_project_key, &epic.key, template)
                .await
            {
                Ok(created) => created_children.push(created.key),
                Err(source) => {
                    error!(
                        template_key = %template.key,
                        created = created_children.len(),
                        remaining = children.len() - created_children.len(),
                        "child clone failed, stopping"
                    );
                    return Err(CloneError::ChildCreation {
                        new_epic_key: epic.key,
                        template_child_key: template.key.clone(),
                        created_children,
                        source,
                    });
                }
            }
        }

        info!(children = created_children.len(), "epic clone complete");
        Ok(CloneOutcome {
            new_epic_key: epic.key,
            created_children,
        })
    }
}
