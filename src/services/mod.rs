//! Clone workflow services.

pub mod child_fetcher;
pub mod epic_clone_service;
pub mod field_resolver;

pub use child_fetcher::{ChildFetcher, ChildQueryDialect, CHILD_FIELDS};
pub use epic_clone_service::EpicCloneService;
pub use field_resolver::{resolve_epic_name_field, FieldResolver, FALLBACK_EPIC_NAME_FIELD};
