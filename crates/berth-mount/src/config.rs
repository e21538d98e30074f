//! Validator configuration.

use std::path::Path;

use berth_common::path::NATIVE_PLATFORM;
use berth_common::{BerthError, BerthResult, PathClassifier, Platform};
use serde::{Deserialize, Serialize};

/// Path grammars used by a [`MountValidator`](crate::MountValidator).
///
/// ```toml
/// native = "posix"
/// fallback = ["windows"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Grammar for mount targets, tried first for sources.
    pub native: Platform,
    /// Grammars tried in order when the native one rejects a source.
    pub fallback: Vec<Platform>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::for_platform(*NATIVE_PLATFORM)
    }
}

impl ValidatorConfig {
    /// Native `platform` with every other platform as fallback.
    #[must_use]
    pub fn for_platform(native: Platform) -> Self {
        Self {
            native,
            fallback: Platform::ALL
                .into_iter()
                .filter(|p| *p != native)
                .collect(),
        }
    }

    /// Drop all fallback grammars.
    #[must_use]
    pub fn without_fallback(mut self) -> Self {
        self.fallback.clear();
        self
    }

    /// Parse from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid configuration.
    pub fn from_toml(content: &str) -> BerthResult<Self> {
        toml::from_str(content).map_err(|e| BerthError::Config {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> BerthResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded validator config");
        Ok(config)
    }

    /// Build the ordered classifier.
    ///
    /// Fallback entries repeating the native grammar or an earlier entry are
    /// skipped.
    #[must_use]
    pub fn classifier(&self) -> PathClassifier {
        let mut seen = vec![self.native];
        let mut classifier = PathClassifier::new(self.native.grammar());
        for platform in &self.fallback {
            if !seen.contains(platform) {
                seen.push(*platform);
                classifier.push(platform.grammar());
            }
        }
        tracing::debug!(grammars = ?seen, "Built path classifier");
        classifier
    }
}
