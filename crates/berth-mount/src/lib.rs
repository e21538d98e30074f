//! # berth-mount
//!
//! Admission-time validation of container mount declarations.
//!
//! berth-mount provides:
//! - Mount declarations as supplied by the orchestrator's task specification
//! - Per-type validation of bind, volume, tmpfs and named-pipe mounts
//! - Validator configuration (native and fallback path grammars)

#![warn(missing_docs)]

pub mod config;
pub mod mount;
pub mod validate;

pub use config::ValidatorConfig;
pub use mount::{MountSpec, MountType};
pub use validate::{MountValidator, validate_mounts};
