//! Form state management for StoryTime
//!
//! This crate holds the value types behind the sign-in and sign-up screens:
//! field values, validation verdicts and the submission lifecycle. Nothing
//! here performs I/O; orchestration lives in `app-core`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod form;
pub mod validation;

pub use form::{FieldName, FormKind, FormState, Submission};
pub use validation::{validate, ValidationReport};
