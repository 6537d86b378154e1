//! Tagger configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resolve::DEFAULT_URI_PREFIX;

/// Configuration for a [`ChemistryTagger`](crate::ChemistryTagger).
///
/// The three matcher resource paths and the element mapping path are required;
/// [`validate`](Self::validate) reports the first one missing. Containment
/// removal defaults to on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    compound_lists: Option<PathBuf>,
    element_lists: Option<PathBuf>,
    grammar: Option<PathBuf>,
    element_map: Option<PathBuf>,
    annotation_layer: Option<String>,
    remove_contained_elements: bool,
    uri_prefix: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            compound_lists: None,
            element_lists: None,
            grammar: None,
            element_map: None,
            annotation_layer: None,
            remove_contained_elements: true,
            uri_prefix: DEFAULT_URI_PREFIX.to_string(),
        }
    }
}

impl TaggerConfig {
    /// Create a configuration with default settings and no resource paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compound-context dictionary definition path.
    #[must_use]
    pub fn with_compound_lists(mut self, path: impl Into<PathBuf>) -> Self {
        self.compound_lists = Some(path.into());
        self
    }

    /// Set the standalone dictionary definition path.
    #[must_use]
    pub fn with_element_lists(mut self, path: impl Into<PathBuf>) -> Self {
        self.element_lists = Some(path.into());
        self
    }

    /// Set the grammar definition path.
    #[must_use]
    pub fn with_grammar(mut self, path: impl Into<PathBuf>) -> Self {
        self.grammar = Some(path.into());
        self
    }

    /// Set the element mapping file path.
    #[must_use]
    pub fn with_element_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.element_map = Some(path.into());
        self
    }

    /// Set the target annotation layer name. Unset means the unnamed default
    /// layer.
    #[must_use]
    pub fn with_annotation_layer(mut self, layer: impl Into<String>) -> Self {
        self.annotation_layer = Some(layer.into());
        self
    }

    /// Set whether element mentions fully contained in a compound mention are
    /// removed.
    #[must_use]
    pub fn with_remove_contained_elements(mut self, remove: bool) -> Self {
        self.remove_contained_elements = remove;
        self
    }

    /// Set the reference base URI prepended to element symbols.
    #[must_use]
    pub fn with_uri_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.uri_prefix = prefix.into();
        self
    }

    /// Compound-context dictionary definition path.
    #[must_use]
    pub fn compound_lists(&self) -> Option<&Path> {
        self.compound_lists.as_deref()
    }

    /// Standalone dictionary definition path.
    #[must_use]
    pub fn element_lists(&self) -> Option<&Path> {
        self.element_lists.as_deref()
    }

    /// Grammar definition path.
    #[must_use]
    pub fn grammar(&self) -> Option<&Path> {
        self.grammar.as_deref()
    }

    /// Element mapping file path.
    #[must_use]
    pub fn element_map(&self) -> Option<&Path> {
        self.element_map.as_deref()
    }

    /// Target annotation layer name.
    #[must_use]
    pub fn annotation_layer(&self) -> Option<&str> {
        self.annotation_layer.as_deref()
    }

    /// Whether contained element mentions are removed.
    #[must_use]
    pub const fn remove_contained_elements(&self) -> bool {
        self.remove_contained_elements
    }

    /// Reference base URI prepended to element symbols.
    #[must_use]
    pub fn uri_prefix(&self) -> &str {
        &self.uri_prefix
    }

    /// Check that every required resource path is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first missing path.
    pub fn validate(&self) -> Result<()> {
        if self.compound_lists.is_none() {
            return Err(Error::configuration(
                "compound lists path must be specified",
            ));
        }
        if self.element_lists.is_none() {
            return Err(Error::configuration("element lists path must be specified"));
        }
        if self.grammar.is_none() {
            return Err(Error::configuration("grammar path must be specified"));
        }
        if self.element_map.is_none() {
            return Err(Error::configuration("element map path must be specified"));
        }
        Ok(())
    }
}
