//! Common error types for berth.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`BerthError`].
pub type BerthResult<T> = Result<T, BerthError>;

/// A mount declaration rejected at admission time.
///
/// Each variant carries the offending literal so the operator can find the
/// declaration in the task specification.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// Target is not absolute under the native grammar.
    #[error("invalid mount target, must be an absolute path: {target}")]
    #[diagnostic(
        code(berth::mount::invalid_target),
        help("Mount targets are paths inside the container, e.g. '/data'")
    )]
    InvalidTarget {
        /// The rejected target.
        target: String,
    },

    /// Bind mount source is not an absolute path.
    #[error("invalid bind mount source, must be an absolute path: {path}")]
    #[diagnostic(
        code(berth::mount::invalid_bind_source),
        help("Bind mounts need an absolute host path such as '/srv/data' or 'C:\\data'")
    )]
    InvalidBindSource {
        /// The rejected source.
        path: String,
    },

    /// Volume mount source looks like an absolute path.
    #[error("invalid volume mount source, must not be an absolute path: {path}")]
    #[diagnostic(
        code(berth::mount::invalid_volume_source),
        help("Use a volume name, or declare the mount as type 'bind'")
    )]
    InvalidVolumeSource {
        /// The rejected source.
        path: String,
    },

    /// Tmpfs mount was given a source.
    #[error("invalid tmpfs source, source must be empty")]
    #[diagnostic(code(berth::mount::invalid_tmpfs_source))]
    TmpfsSourceNotEmpty {
        /// The source that should have been empty.
        path: String,
    },

    /// Mount type outside the supported set.
    #[error("invalid mount type: {kind}")]
    #[diagnostic(
        code(berth::mount::invalid_type),
        help("Supported mount types are 'bind', 'volume', 'tmpfs' and 'npipe'")
    )]
    InvalidMountType {
        /// The type literal as supplied.
        kind: String,
    },
}

impl MountError {
    /// The offending literal carried by this error.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidTarget { target } => target,
            Self::InvalidBindSource { path }
            | Self::InvalidVolumeSource { path }
            | Self::TmpfsSourceNotEmpty { path } => path,
            Self::InvalidMountType { kind } => kind,
        }
    }
}

/// Common errors across berth.
#[derive(Error, Diagnostic, Debug)]
pub enum BerthError {
    /// A mount declaration failed validation.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Mount(#[from] MountError),

    /// Unknown path grammar name.
    #[error("Unknown path grammar: {name}")]
    #[diagnostic(
        code(berth::path::unknown_grammar),
        help("Known grammars are 'posix' and 'windows'")
    )]
    UnknownGrammar {
        /// The unrecognized name.
        name: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(berth::io))]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(berth::config))]
    Config {
        /// The error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_error_display() {
        let err = MountError::InvalidTarget {
            target: "relative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid mount target, must be an absolute path: relative"
        );

        let err = MountError::TmpfsSourceNotEmpty {
            path: "/data".to_string(),
        };
        assert_eq!(err.to_string(), "invalid tmpfs source, source must be empty");
        assert_eq!(err.value(), "/data");
    }

    #[test]
    fn mount_error_is_transparent() {
        let err: BerthError = MountError::InvalidMountType {
            kind: "cluster".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid mount type: cluster");
        assert!(matches!(err, BerthError::Mount(_)));
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BerthError = io_err.into();
        assert!(matches!(err, BerthError::Io(_)));
    }
}
