//! Cross-platform path grammars.
//!
//! A cluster manager may validate specifications for workers that run a
//! different platform than its own, so absoluteness is judged against an
//! ordered list of grammars instead of the host's path rules alone. The
//! Windows grammar here is purely lexical and behaves identically on every
//! host.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::BerthError;

/// Native platform used by default classifiers.
///
/// Reads `BERTH_NATIVE_GRAMMAR` once; falls back to the build target when unset
/// or unrecognized.
pub static NATIVE_PLATFORM: Lazy<Platform> = Lazy::new(|| {
    let Ok(name) = std::env::var("BERTH_NATIVE_GRAMMAR") else {
        return Platform::host();
    };
    name.parse::<Platform>().unwrap_or_else(|err| {
        tracing::warn!(%err, "Ignoring BERTH_NATIVE_GRAMMAR");
        Platform::host()
    })
});

/// Reports whether `b` separates path components in either grammar.
#[must_use]
pub const fn is_separator(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

/// Length of the leading Windows volume name in `path`.
///
/// Recognizes a drive designator (`C:`) or a UNC `\\server\share` prefix and
/// returns the number of bytes it spans, or 0 when there is none. Both `/`
/// and `\` are accepted as separators.
#[must_use]
pub fn volume_name_len(path: &str) -> usize {
    let b = path.as_bytes();
    if b.len() < 2 {
        return 0;
    }
    if b[1] == b':' && b[0].is_ascii_alphabetic() {
        return 2;
    }
    unc_prefix_len(b).unwrap_or(0)
}

fn unc_prefix_len(b: &[u8]) -> Option<usize> {
    let l = b.len();
    if l < 5 || !is_separator(b[0]) || !is_separator(b[1]) || is_separator(b[2]) || b[2] == b'.'
    {
        return None;
    }

    // Server name runs up to the next separator, which must leave room for a share.
    let server_end = 3 + b[3..l - 1].iter().position(|&c| is_separator(c))?;
    let share_start = server_end + 1;
    if is_separator(b[share_start]) || b[share_start] == b'.' {
        return None;
    }

    let share_end = b[share_start..]
        .iter()
        .position(|&c| is_separator(c))
        .map_or(l, |i| share_start + i);
    Some(share_end)
}

/// Reports whether `path` is absolute under Windows rules.
///
/// A volume name must be present and be followed by a separator, so `C:foo`
/// and a bare `C:` are both relative.
#[must_use]
pub fn is_windows_absolute(path: &str) -> bool {
    let len = volume_name_len(path);
    if len == 0 {
        return false;
    }
    path.as_bytes().get(len).copied().is_some_and(is_separator)
}

/// A path grammar that can judge absoluteness.
pub trait PathGrammar: fmt::Debug + Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Reports whether `path` is absolute under this grammar.
    fn is_absolute(&self, path: &str) -> bool;
}

/// POSIX paths: absolute iff rooted at `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixGrammar;

impl PathGrammar for PosixGrammar {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn is_absolute(&self, path: &str) -> bool {
        path.starts_with('/')
    }
}

/// Windows paths: drive letters and UNC shares.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsGrammar;

impl PathGrammar for WindowsGrammar {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn is_absolute(&self, path: &str) -> bool {
        is_windows_absolute(path)
    }
}

/// Worker platforms with a known path grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux and other Unix-like workers.
    Posix,
    /// Windows workers.
    Windows,
}

impl Platform {
    /// Every known platform, in a stable order.
    pub const ALL: [Self; 2] = [Self::Posix, Self::Windows];

    /// Platform of the build target.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// The grammar strategy for this platform.
    #[must_use]
    pub fn grammar(self) -> Arc<dyn PathGrammar> {
        match self {
            Self::Posix => Arc::new(PosixGrammar),
            Self::Windows => Arc::new(WindowsGrammar),
        }
    }

    /// Platform name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posix => "posix",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = BerthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "posix" | "linux" | "unix" => Ok(Self::Posix),
            "windows" => Ok(Self::Windows),
            _ => Err(BerthError::UnknownGrammar {
                name: s.to_string(),
            }),
        }
    }
}

/// Ordered list of path grammars.
///
/// The first grammar is the native one. A path is absolute when any grammar
/// accepts it, tried in order.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    grammars: Vec<Arc<dyn PathGrammar>>,
}

impl PathClassifier {
    /// Create a classifier with a single native grammar and no fallback.
    #[must_use]
    pub fn new(native: Arc<dyn PathGrammar>) -> Self {
        Self {
            grammars: vec![native],
        }
    }

    /// Native grammar for `native`, followed by every other known platform.
    #[must_use]
    pub fn for_platform(native: Platform) -> Self {
        Platform::ALL
            .into_iter()
            .filter(|p| *p != native)
            .fold(Self::new(native.grammar()), |classifier, p| {
                classifier.with_fallback(p.grammar())
            })
    }

    /// Classifier for the build target, with every other grammar as fallback.
    #[must_use]
    pub fn host() -> Self {
        Self::for_platform(Platform::host())
    }

    /// Append a fallback grammar.
    #[must_use]
    pub fn with_fallback(mut self, grammar: Arc<dyn PathGrammar>) -> Self {
        self.push(grammar);
        self
    }

    /// Append a fallback grammar in place.
    pub fn push(&mut self, grammar: Arc<dyn PathGrammar>) {
        self.grammars.push(grammar);
    }

    /// The native grammar.
    #[must_use]
    pub fn native(&self) -> &dyn PathGrammar {
        &*self.grammars[0]
    }

    /// All grammars in evaluation order.
    pub fn grammars(&self) -> impl Iterator<Item = &dyn PathGrammar> {
        self.grammars.iter().map(|g| &**g)
    }

    /// Reports whether `path` is absolute under the native grammar alone.
    #[must_use]
    pub fn is_native_absolute(&self, path: &str) -> bool {
        self.native().is_absolute(path)
    }

    /// Reports whether any grammar accepts `path` as absolute.
    #[must_use]
    pub fn is_absolute(&self, path: &str) -> bool {
        self.accepting_grammar(path).is_some()
    }

    /// Name of the first grammar that accepts `path`.
    #[must_use]
    pub fn accepting_grammar(&self, path: &str) -> Option<&'static str> {
        self.grammars()
            .find(|g| g.is_absolute(path))
            .map(|g| g.name())
    }
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::for_platform(*NATIVE_PLATFORM)
    }
}
