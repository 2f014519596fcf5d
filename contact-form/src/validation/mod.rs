//! Field validation.
//!
//! [`check`] is the pure rule: a field declaration plus a raw value gives
//! either `Ok(())` or the kind of failure. [`validate`] attaches the
//! localized message and yields a [`Verdict`], which is what the workflow
//! stores and what the view renders.
//!
//! # Example
//!
//! ```
//! use contact_form::field::FieldSpec;
//! use contact_form::messages::Messages;
//! use contact_form::validation::validate;
//!
//! let email = FieldSpec::email("email").required();
//! let verdict = validate(&email, &"not-an-email".into(), &Messages::default());
//! assert!(!verdict.is_valid());
//! ```

mod result;
mod validator;

pub use result::{FieldError, ValidationResult, Verdict};
pub use validator::{check, is_well_formed_email, validate};
