//! Mount declarations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of mount requested by a task.
///
/// Type names match exactly (`bind`, `volume`, `tmpfs`, `npipe`). Anything
/// else, including differently cased names, is kept in [`MountType::Other`]
/// so the validator can report it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MountType {
    /// Existing host path mounted into the container.
    Bind,
    /// Named volume managed by the container engine.
    Volume,
    /// Memory-backed filesystem with no source.
    Tmpfs,
    /// Windows named pipe.
    NamedPipe,
    /// Unrecognized type literal.
    Other(String),
}

impl MountType {
    /// Canonical name of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bind => "bind",
            Self::Volume => "volume",
            Self::Tmpfs => "tmpfs",
            Self::NamedPipe => "npipe",
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for MountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MountType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bind" => Self::Bind,
            "volume" => Self::Volume,
            "tmpfs" => Self::Tmpfs,
            "npipe" => Self::NamedPipe,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl From<String> for MountType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<MountType> for String {
    fn from(kind: MountType) -> Self {
        match kind {
            MountType::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// A single mount declaration from a task specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountSpec {
    /// Mount type.
    #[serde(rename = "type")]
    pub kind: MountType,
    /// Host path, volume name, or empty for tmpfs.
    #[serde(default)]
    pub source: String,
    /// Path inside the container.
    pub target: String,
}

impl MountSpec {
    /// Create a mount declaration.
    #[must_use]
    pub fn new(kind: MountType, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            target: target.into(),
        }
    }

    /// Bind mount of `source` onto `target`.
    #[must_use]
    pub fn bind(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(MountType::Bind, source, target)
    }

    /// Volume mount of `name` onto `target`.
    #[must_use]
    pub fn volume(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(MountType::Volume, name, target)
    }

    /// Tmpfs mount onto `target`.
    #[must_use]
    pub fn tmpfs(target: impl Into<String>) -> Self {
        Self::new(MountType::Tmpfs, "", target)
    }

    /// Named pipe `source` exposed at `target`.
    #[must_use]
    pub fn named_pipe(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(MountType::NamedPipe, source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mount_types() {
        assert_eq!("bind".parse::<MountType>().unwrap(), MountType::Bind);
        assert_eq!("volume".parse::<MountType>().unwrap(), MountType::Volume);
        assert_eq!("npipe".parse::<MountType>().unwrap(), MountType::NamedPipe);
        assert_eq!(
            "cluster".parse::<MountType>().unwrap(),
            MountType::Other("cluster".to_string())
        );
    }

    #[test]
    fn type_names_are_case_sensitive() {
        assert_eq!(
            "BIND".parse::<MountType>().unwrap(),
            MountType::Other("BIND".to_string())
        );
        assert_eq!(
            "Volume".parse::<MountType>().unwrap(),
            MountType::Other("Volume".to_string())
        );
        assert_eq!(
            "named_pipe".parse::<MountType>().unwrap(),
            MountType::Other("named_pipe".to_string())
        );
    }

    #[test]
    fn unknown_type_keeps_literal() {
        let kind = MountType::from("Cluster".to_string());
        assert_eq!(kind.to_string(), "Cluster");
        assert_eq!(String::from(kind), "Cluster");
        assert_eq!(String::from(MountType::NamedPipe), "npipe");
    }

    #[test]
    fn deserialize_mount_spec() {
        let json = r#"[
            {"type": "bind", "source": "/srv/data", "target": "/data"},
            {"type": "tmpfs", "target": "/scratch"},
            {"type": "cluster", "source": "x", "target": "/x"}
        ]"#;
        let mounts: Vec<MountSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(mounts[0], MountSpec::bind("/srv/data", "/data"));
        assert_eq!(mounts[1], MountSpec::tmpfs("/scratch"));
        assert_eq!(mounts[2].kind, MountType::Other("cluster".to_string()));
    }

    #[test]
    fn serialize_mount_spec() {
        let value = serde_json::to_value(MountSpec::volume("db", "/var/lib/db")).unwrap();
        assert_eq!(value["type"], "volume");
        assert_eq!(value["source"], "db");
    }
}
