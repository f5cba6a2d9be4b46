//! Configuration types for msgdoc.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be
//! loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining package and render settings.
//! - [`PackagesConfig`] - Where packages are discovered.
//! - [`RenderConfig`] - Option strings controlling how comments become documentation.
//!
//! # Example
//!
//! ```
//! # use msgdoc::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.render().link_values());
//! assert_eq!(config.render().field_comment(), "");
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use msgdoc_core::options::{DescriptionSlice, OptionError, PlacementPolicy, RawAppend};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Package discovery section.
    #[serde(default)]
    packages: PackagesConfig,

    /// Rendering section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(packages: PackagesConfig, render: RenderConfig) -> Self {
        Self { packages, render }
    }

    /// Returns the package discovery configuration.
    pub fn packages(&self) -> &PackagesConfig {
        &self.packages
    }

    /// Returns the rendering configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns a mutable reference to the package discovery configuration.
    pub fn packages_mut(&mut self) -> &mut PackagesConfig {
        &mut self.packages
    }

    /// Returns a mutable reference to the rendering configuration.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }
}

/// Package discovery configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackagesConfig {
    /// Directories searched for packages, in order. Later directories win
    /// when two of them contain a package with the same name.
    #[serde(default)]
    base_paths: Vec<PathBuf>,
}

impl PackagesConfig {
    /// Creates a new [`PackagesConfig`] with the given search directories.
    pub fn new(base_paths: Vec<PathBuf>) -> Self {
        Self { base_paths }
    }

    /// Returns the configured search directories.
    ///
    /// Falls back to the current directory when none are configured.
    pub fn base_paths(&self) -> Vec<PathBuf> {
        if self.base_paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.base_paths.clone()
        }
    }

    /// Append search directories after the configured ones.
    pub fn extend_base_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.base_paths.extend(paths);
    }
}

/// Rendering configuration.
///
/// Option strings are kept verbatim and only interpreted by
/// [`RenderOptions::from_config`], so an invalid value fails the request
/// that uses it rather than the configuration load.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Placement tokens, e.g. `"up right1 quote"`.
    #[serde(default)]
    field_comment: String,

    /// Type description selection, e.g. `"0:-1, quote"`.
    #[serde(default)]
    description: String,

    /// Whether the untouched file text is appended.
    #[serde(default)]
    raw: Option<RawAppend>,

    /// Whether constant values are folded into their descriptions.
    #[serde(default = "default_link_values")]
    link_values: bool,
}

fn default_link_values() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            field_comment: String::new(),
            description: String::new(),
            raw: None,
            link_values: default_link_values(),
        }
    }
}

impl RenderConfig {
    /// Returns the placement option string.
    pub fn field_comment(&self) -> &str {
        &self.field_comment
    }

    /// Returns the description option string.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the raw placement, if any.
    pub fn raw(&self) -> Option<RawAppend> {
        self.raw
    }

    /// Returns `true` if constant values are linked into descriptions.
    pub fn link_values(&self) -> bool {
        self.link_values
    }

    /// Replace the placement option string.
    pub fn with_field_comment(mut self, field_comment: impl Into<String>) -> Self {
        self.field_comment = field_comment.into();
        self
    }

    /// Replace the description option string.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the raw placement.
    pub fn with_raw(mut self, raw: Option<RawAppend>) -> Self {
        self.raw = raw;
        self
    }

    /// Enable or disable value linking.
    pub fn with_link_values(mut self, link_values: bool) -> Self {
        self.link_values = link_values;
        self
    }
}

/// Interpreted rendering options for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    policy: PlacementPolicy,
    description: DescriptionSlice,
    raw: Option<RawAppend>,
    link_values: bool,
}

impl RenderOptions {
    /// Interpret the option strings of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError`] if the description option holds an unknown
    /// entry or a malformed slice bound.
    pub fn from_config(config: &RenderConfig) -> Result<Self, OptionError> {
        Ok(Self {
            policy: PlacementPolicy::new(config.field_comment()),
            description: config.description().parse()?,
            raw: config.raw(),
            link_values: config.link_values(),
        })
    }

    /// Returns the placement policy.
    pub fn policy(&self) -> &PlacementPolicy {
        &self.policy
    }

    /// Returns the type description selection.
    pub fn description(&self) -> DescriptionSlice {
        self.description
    }

    /// Returns the raw placement, if any.
    pub fn raw(&self) -> Option<RawAppend> {
        self.raw
    }

    /// Returns `true` if constant values are linked into descriptions.
    pub fn link_values(&self) -> bool {
        self.link_values
    }
}
