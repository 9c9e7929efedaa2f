pub mod catalog;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod labels;
pub mod preview;
pub mod render;
pub mod resolver;
pub mod submission;
pub mod validation;

pub use catalog::{CatalogError, RuleCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dispatch::{ToolDispatcher, ToolOutput, ToolRequest};
pub use domain::permit::{PermitDefinition, PermitId, PermitRequirement, PermitSummary};
pub use domain::project::ProjectData;
pub use errors::DispatchError;
pub use render::{DocumentRenderer, RenderError, RenderedDocument, TeraDocumentRenderer};
pub use resolver::PermitResolver;
pub use submission::{SubmissionAssembler, SubmissionError, SubmissionReceipt};
pub use validation::{validate_required_fields, ValidationResult};
