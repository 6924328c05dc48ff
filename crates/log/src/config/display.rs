//! Display configuration

use serde::{Deserialize, Serialize};

/// What each formatted event shows
///
/// Independent toggles that map directly onto config file keys.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Show thread IDs
    pub thread_ids: bool,
    /// Show thread names
    pub thread_names: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Show span list in JSON
    pub span_list: bool,
    /// Flatten JSON events
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            source: cfg!(debug_assertions),
            target: true,
            thread_ids: false,
            thread_names: false,
            colors: cfg!(feature = "ansi") && std::io::IsTerminal::is_terminal(&std::io::stderr()),
            span_list: true,
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Apply `LATTICE_LOG_SOURCE` / `LATTICE_LOG_COLORS` style toggles
    pub(super) fn apply_lookup(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        let flag = |v: String| v != "0" && v != "false";
        if let Some(v) = lookup("LATTICE_LOG_SOURCE") {
            self.source = flag(v);
        }
        if let Some(v) = lookup("LATTICE_LOG_COLORS") {
            self.colors = flag(v);
        }
        if let Some(v) = lookup("LATTICE_LOG_THREADS") {
            let enabled = flag(v);
            self.thread_ids = enabled;
            self.thread_names = enabled;
        }
    }
}
