//! The submission workflow.
//!
//! [`Workflow`] is the single source of truth for one form instance: field
//! values and verdicts, the consent flag, and the current [`Stage`]. Every
//! change goes through [`Workflow::handle`], which takes an [`Event`] and
//! returns the [`Effect`]s a host must apply. Nothing in here touches a real
//! page or a clock, so every transition can be tested directly.
//!
//! ```text
//! Idle --Submit--> Validating --fail--> Idle
//!                      |
//!                      ok
//!                      v
//!          AwaitingConfirmation --Cancel--> Idle
//!                      |   ^
//!                      |   +--Confirm, values edited since shown
//!                   Confirm (re-validates, sends the shown record)
//!                      v
//!                 Submitting --Settled(Err)--> Idle
//!                      |
//!                 Settled(Ok)
//!                      v
//!                   Success -----------------> Idle
//! ```

mod effect;
mod event;
mod machine;
mod stage;

pub use effect::{Effect, Notice, NoticeLevel, SubmitControl};
pub use event::Event;
pub use machine::Workflow;
pub use stage::Stage;
