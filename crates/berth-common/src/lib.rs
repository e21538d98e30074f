//! # berth-common
//!
//! Shared utilities and types for berth.
//!
//! This crate provides common functionality used across all berth crates:
//! - Cross-platform path grammars (POSIX and Windows absoluteness)
//! - Mount validation errors
//! - Configuration and I/O error types

#![warn(missing_docs)]

pub mod error;
pub mod path;

pub use error::{BerthError, BerthResult, MountError};
pub use path::{PathClassifier, PathGrammar, Platform, PosixGrammar, WindowsGrammar};
