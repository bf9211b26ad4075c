//! Core application logic for StoryTime
//!
//! This crate drives the credential forms: it validates what the user typed,
//! submits it to the account service and reports the outcome to the
//! navigation and alert layers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;

pub use auth::{Alert, Alerter, CredentialFormController, Destination, Navigator, SubmitOutcome};
