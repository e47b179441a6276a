//! # Catalog configuration: `catalog.toml`
//!
//! Client-side presentation settings, embedded into the web bundle at build time and
//! parsed with [`CatalogConfig::from_toml`].
//!
//! ## Structure
//!
//! ```toml
//! [gallery]
//! default_filter = "favorites"   # or "all"
//! preview_chars = 100            # ingredient preview length on recipe cards
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`CatalogConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`GalleryConfig`] | Gallery section: initial filter and card preview length. |
//! | [`GalleryFilter`] | `All` or `Favorites`. |
//!
//! A missing file or section is equivalent to the defaults: the gallery opens on
//! favorites and previews 100 characters.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `catalog.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// Which subset of recipes the gallery shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryFilter {
    All,
    #[default]
    Favorites,
}

/// Gallery configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Filter selected when a user signs in.
    #[serde(default)]
    pub default_filter: GalleryFilter,
    /// Ingredient characters shown on a card before the ellipsis.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_preview_chars() -> usize {
    100
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_filter: GalleryFilter::default(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl CatalogConfig {
    /// Builder method to set the initial gallery filter.
    pub fn with_default_filter(mut self, filter: GalleryFilter) -> Self {
        self.gallery.default_filter = filter;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "catalog.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
