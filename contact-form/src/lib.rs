//! Contact form validation and submission workflow.
//!
//! Fields are validated as the user types and leaves them; a submit attempt
//! runs a full pass, asks for confirmation, hands the record to a
//! [`SubmissionBackend`](backend::SubmissionBackend) and resets the form when
//! it is accepted.

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod field;
pub mod messages;
pub mod page;
pub mod record;
pub mod validation;
pub mod view;
pub mod workflow;

pub use controller::Controller;

pub mod prelude {
    pub use crate::backend::{SimulatedBackend, SubmissionBackend};
    pub use crate::config::FormConfig;
    pub use crate::controller::Controller;
    pub use crate::error::{SubmissionError, ValidationFailure};
    pub use crate::field::{FieldId, FieldKind, FieldSpec, FieldValue, FormSpec};
    pub use crate::messages::Messages;
    pub use crate::record::{Receipt, SubmissionRecord};
    pub use crate::validation::{Verdict, validate};
    pub use crate::view::{FormView, PageView};
    pub use crate::workflow::{Effect, Event, Notice, NoticeLevel, Stage, SubmitControl, Workflow};
}
