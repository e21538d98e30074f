//! # berth
//!
//! Command-line admission checks for container mount declarations.
//!
//! berth provides:
//! - Task files (YAML or JSON) listing mount declarations
//! - `berth validate` to run the admission checks on a task file
//! - `berth classify` to show how each path grammar judges a path

#![warn(missing_docs)]

pub mod cli;
pub mod task;

pub use task::TaskSpec;
