use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Default extension order for implicit-extension probing.
pub const DEFAULT_EXTENSION_ORDER: &[&str] = &[".tsx", ".ts", ".jsx", ".js", ".css", ".json"];

/// Main fields probed for diagnostics even when the configured order
/// skipped them, so "missing entry point" errors can point somewhere.
pub const MAIN_FIELDS_FOR_FAILURE: &[&str] = &["main", "module"];

/// Target platform for a resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Browser,
    #[default]
    Node,
    Neutral,
}

impl Platform {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Node => "node",
            Self::Neutral => "neutral",
        }
    }
}

/// Main-field order used when the configuration leaves it empty.
#[must_use]
pub fn default_main_fields(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Browser => &["browser", "module", "main"],
        Platform::Node => &["main", "module"],
        Platform::Neutral => &[],
    }
}

/// Configuration for manifest parsing and resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Target platform. Controls the `browser` field and the default
    /// main-field order.
    pub platform: Platform,

    /// Extensions probed when a map key has no hit, in order.
    pub extension_order: Vec<String>,

    /// Main fields scanned in order. Empty means the platform default.
    pub main_fields: Vec<String>,

    /// Active conditions for `exports`/`imports` resolution. The
    /// `"default"` key always applies and does not need to be listed.
    pub conditions: FxHashSet<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            extension_order: DEFAULT_EXTENSION_ORDER
                .iter()
                .map(ToString::to_string)
                .collect(),
            main_fields: Vec::new(),
            conditions: FxHashSet::default(),
        }
    }
}

impl ResolveOptions {
    /// Set the target platform.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the extension probe order.
    #[must_use]
    pub fn with_extension_order(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extension_order = extensions.into_iter().collect();
        self
    }

    /// Set the main-field order.
    #[must_use]
    pub fn with_main_fields(mut self, fields: impl IntoIterator<Item = String>) -> Self {
        self.main_fields = fields.into_iter().collect();
        self
    }

    /// Set the active condition set.
    #[must_use]
    pub fn with_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = conditions.into_iter().map(Into::into).collect();
        self
    }

    /// The main fields to scan: the configured list, or the platform
    /// default when the list is empty.
    #[must_use]
    pub fn effective_main_fields(&self) -> Vec<&str> {
        if self.main_fields.is_empty() {
            default_main_fields(self.platform).to_vec()
        } else {
            self.main_fields.iter().map(String::as_str).collect()
        }
    }
}
