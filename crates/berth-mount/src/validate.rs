//! Mount validation.
//!
//! The container engine tells bind mounts from volume mounts only by whether
//! the source looks like a path, so bind sources must be absolute and volume
//! sources must not be. Targets are judged by the native grammar alone.

use berth_common::{MountError, PathClassifier};

use crate::config::ValidatorConfig;
use crate::mount::{MountSpec, MountType};

/// Validates mount declarations against an ordered set of path grammars.
#[derive(Debug, Clone, Default)]
pub struct MountValidator {
    classifier: PathClassifier,
}

impl MountValidator {
    /// Create a validator using `classifier`.
    #[must_use]
    pub const fn new(classifier: PathClassifier) -> Self {
        Self { classifier }
    }

    /// Create a validator from configuration.
    #[must_use]
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.classifier())
    }

    /// The classifier used for path checks.
    #[must_use]
    pub const fn classifier(&self) -> &PathClassifier {
        &self.classifier
    }

    /// Validate every mount in order, stopping at the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`MountError`] encountered.
    pub fn validate(&self, mounts: &[MountSpec]) -> Result<(), MountError> {
        for (index, mount) in mounts.iter().enumerate() {
            tracing::trace!(
                index,
                kind = %mount.kind,
                source = %mount.source,
                target = %mount.target,
                "Validating mount"
            );
            if let Err(err) = self.validate_mount(mount) {
                tracing::debug!(index, error = %err, "Mount rejected");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Validate a single mount declaration.
    ///
    /// # Errors
    ///
    /// Returns a [`MountError`] describing the violation.
    pub fn validate_mount(&self, mount: &MountSpec) -> Result<(), MountError> {
        // Named pipes live in their own namespace.
        if mount.kind != MountType::NamedPipe && !self.classifier.is_native_absolute(&mount.target)
        {
            return Err(MountError::InvalidTarget {
                target: mount.target.clone(),
            });
        }

        match &mount.kind {
            MountType::Bind => {
                if !self.classifier.is_absolute(&mount.source) {
                    return Err(MountError::InvalidBindSource {
                        path: mount.source.clone(),
                    });
                }
            }
            MountType::Volume => {
                if self.classifier.is_absolute(&mount.source) {
                    return Err(MountError::InvalidVolumeSource {
                        path: mount.source.clone(),
                    });
                }
            }
            MountType::Tmpfs => {
                if !mount.source.is_empty() {
                    return Err(MountError::TmpfsSourceNotEmpty {
                        path: mount.source.clone(),
                    });
                }
            }
            MountType::NamedPipe => {}
            MountType::Other(kind) => {
                return Err(MountError::InvalidMountType { kind: kind.clone() });
            }
        }
        Ok(())
    }
}

/// Validate `mounts` with the default validator.
///
/// The default validator uses the native grammar of this process (see
/// [`berth_common::path::NATIVE_PLATFORM`]) with every other grammar as
/// fallback for sources.
///
/// # Errors
///
/// Returns the first [`MountError`] encountered.
pub fn validate_mounts(mounts: &[MountSpec]) -> Result<(), MountError> {
    MountValidator::default().validate(mounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_common::Platform;

    fn posix() -> MountValidator {
        MountValidator::new(PathClassifier::for_platform(Platform::Posix))
    }

    fn windows() -> MountValidator {
        MountValidator::new(PathClassifier::for_platform(Platform::Windows))
    }

    #[test]
    fn accepts_valid_mounts() {
        let mounts = [
            MountSpec::bind("/srv/data", "/data"),
            MountSpec::volume("myvolume", "/var/lib/db"),
            MountSpec::tmpfs("/scratch"),
        ];
        assert_eq!(posix().validate(&mounts), Ok(()));
    }

    #[test]
    fn empty_list_is_valid() {
        assert_eq!(posix().validate(&[]), Ok(()));
    }

    #[test]
    fn rejects_relative_target() {
        let err = posix()
            .validate_mount(&MountSpec::bind("/srv/data", "data"))
            .unwrap_err();
        assert_eq!(
            err,
            MountError::InvalidTarget {
                target: "data".to_string()
            }
        );
    }

    #[test]
    fn target_uses_native_grammar_only() {
        let mount = MountSpec::volume("myvolume", "C:\\data");
        assert!(matches!(
            posix().validate_mount(&mount),
            Err(MountError::InvalidTarget { .. })
        ));
        assert_eq!(windows().validate_mount(&mount), Ok(()));
    }

    #[test]
    fn named_pipe_skips_target_check() {
        let mount = MountSpec::named_pipe("\\\\.\\pipe\\docker_engine", "\\\\.\\pipe\\docker_engine");
        assert_eq!(posix().validate_mount(&mount), Ok(()));
        assert_eq!(windows().validate_mount(&mount), Ok(()));
    }

    #[test]
    fn bind_source_must_be_absolute() {
        assert_eq!(posix().validate_mount(&MountSpec::bind("/data", "/data")), Ok(()));
        assert_eq!(
            posix().validate_mount(&MountSpec::bind("C:\\data", "/data")),
            Ok(())
        );
        assert_eq!(
            posix().validate_mount(&MountSpec::bind("\\\\server\\share\\data", "/data")),
            Ok(())
        );
        assert_eq!(
            posix().validate_mount(&MountSpec::bind("data", "/data")),
            Err(MountError::InvalidBindSource {
                path: "data".to_string()
            })
        );
        assert!(posix().validate_mount(&MountSpec::bind("C:data", "/data")).is_err());
        assert!(posix().validate_mount(&MountSpec::bind("", "/data")).is_err());
    }

    #[test]
    fn windows_host_accepts_posix_bind_source() {
        assert_eq!(
            windows().validate_mount(&MountSpec::bind("/srv/data", "C:\\data")),
            Ok(())
        );
    }

    #[test]
    fn volume_source_must_not_be_absolute() {
        assert_eq!(
            posix().validate_mount(&MountSpec::volume("myvolume", "/data")),
            Ok(())
        );
        assert_eq!(
            posix().validate_mount(&MountSpec::volume("/data", "/data")),
            Err(MountError::InvalidVolumeSource {
                path: "/data".to_string()
            })
        );
        assert!(
            posix()
                .validate_mount(&MountSpec::volume("D:\\volumes\\db", "/data"))
                .is_err()
        );
    }

    #[test]
    fn tmpfs_source_must_be_empty() {
        assert_eq!(posix().validate_mount(&MountSpec::tmpfs("/scratch")), Ok(()));
        let err = posix()
            .validate_mount(&MountSpec::new(MountType::Tmpfs, "/data", "/scratch"))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid tmpfs source, source must be empty");
    }

    #[test]
    fn rejects_unknown_type() {
        let mount = MountSpec::new(MountType::Other("cluster".to_string()), "x", "/x");
        let err = posix().validate_mount(&mount).unwrap_err();
        assert_eq!(err.to_string(), "invalid mount type: cluster");
    }

    #[test]
    fn rejects_differently_cased_type() {
        let mount = MountSpec::new("BIND".parse().unwrap(), "/srv/data", "/data");
        let err = posix().validate_mount(&mount).unwrap_err();
        assert_eq!(err.to_string(), "invalid mount type: BIND");
    }

    #[test]
    fn target_checked_before_type() {
        let mount = MountSpec::new(MountType::Other("cluster".to_string()), "x", "x");
        assert!(matches!(
            posix().validate_mount(&mount),
            Err(MountError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn stops_at_first_violation() {
        let mounts = [
            MountSpec::bind("/srv/data", "/data"),
            MountSpec::volume("/abs", "/vol"),
            MountSpec::bind("relative", "/other"),
        ];
        assert_eq!(
            posix().validate(&mounts),
            Err(MountError::InvalidVolumeSource {
                path: "/abs".to_string()
            })
        );
    }
}
