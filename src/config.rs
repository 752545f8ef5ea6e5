use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::resolver::TraceOptions;

/// File name of the optional per-project configuration.
pub const CONFIG_FILE: &str = "import-trace.toml";

/// Configuration loaded from `import-trace.toml` at the project root.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Follow imports guarded by `if` / `try` / `match` (default: true).
    pub include_conditional_imports: Option<bool>,
    /// Record third-party packages as leaves (default: true).
    pub include_third_party: Option<bool>,
    /// Glob patterns of project files (root-relative) to record without parsing.
    pub exclude: Option<Vec<String>>,
}

impl TraceConfig {
    /// Load configuration from `import-trace.toml` in the given root directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|err| {
                warn!("failed to parse {}: {}. Using defaults.", CONFIG_FILE, err);
                Self::default()
            }),
            Err(err) => {
                warn!("failed to read {}: {}. Using defaults.", CONFIG_FILE, err);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Build trace options from this configuration. `skip_conditional` and `skip_third_party`
    /// come from the command line and win over the file.
    ///
    /// Invalid exclude patterns are reported and ignored.
    pub fn trace_options(&self, skip_conditional: bool, skip_third_party: bool) -> TraceOptions {
        let exclude = self
            .exclude
            .iter()
            .flatten()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(p) => Some(p),
                Err(err) => {
                    warn!(pattern = %pattern, "ignoring invalid exclude pattern: {}", err);
                    None
                }
            })
            .collect();

        TraceOptions {
            include_conditional: !skip_conditional && self.include_conditional_imports.unwrap_or(true),
            include_third_party: !skip_third_party && self.include_third_party.unwrap_or(true),
            exclude,
        }
    }
}
