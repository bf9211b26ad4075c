//! User interface glue for StoryTime
//!
//! Screens themselves are rendered by the platform layer. This crate holds
//! the pieces they share with the controllers:
//!
//! - [`navigation`] - Routes, tabs, the navigation stack and [`Router`]
//! - [`alerts`] - The dialog queue fed by the form controllers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alerts;
pub mod navigation;

pub use alerts::AlertQueue;
pub use navigation::{NavigationStack, NavigationTab, Route, Router};
