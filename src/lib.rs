//! # chemtag
//!
//! Tagging of chemical element and compound mentions in free text.
//!
//! Candidate spans are produced by external matchers (a dictionary matcher for
//! known element/compound vocabulary and a grammar matcher that combines
//! dictionary hits into higher-level mentions). This crate supplies the stage
//! that follows them: the **resolution engine** that reduces their raw,
//! overlapping, redundant candidates to a clean, enriched, non-redundant
//! mention set, plus the lookup table, annotation model and configuration
//! surface around it.
//!
//! ## Quick Start
//!
//! ```rust
//! use chemtag::{key, Annotation, AnnotationCollection, Category, LookupTable, Resolver, Span};
//!
//! let table = LookupTable::from_reader("Na\nSodium\n".as_bytes())?;
//!
//! // raw candidates, as a matcher stage would hand them over
//! let mut annotations = AnnotationCollection::from_annotations(vec![
//!     Annotation::new(Category::RawElementHit, Span::new(0, 2)),
//!     Annotation::new(Category::ElementMention, Span::new(0, 2))
//!         .with_feature(key::KIND, "symbol"),
//! ]);
//!
//! Resolver::new(&table).resolve(&mut annotations, "Na in serum");
//!
//! let mention = &annotations.as_slice()[0];
//! assert_eq!(mention.category, Category::ElementMention);
//! assert_eq!(mention.feature(key::SYMBOL), Some("Na"));
//! assert_eq!(mention.feature(key::NAME), Some("sodium"));
//! # Ok::<(), chemtag::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! [`ChemistryTagger`] wires candidate sources, the lookup table and the
//! resolver together behind one `process` call. Setup failures (missing
//! resource paths, malformed mapping file) are fatal before any document is
//! processed; per-annotation offset failures during enrichment are recoverable
//! and scoped to the affected annotation.
//!
//! ## Concurrency
//!
//! The [`LookupTable`] is immutable after construction and shared without
//! locking. Each document's [`AnnotationCollection`] is owned by the
//! invocation processing it; documents may be processed fully in parallel.

#![warn(missing_docs)]

mod annotation;
mod config;
mod error;
mod lookup;
mod resolve;

pub use annotation::{key, Annotation, AnnotationCollection, Category, Span};
pub use config::TaggerConfig;
pub use error::{Error, Result};
pub use lookup::{ElementEntry, LookupTable};
pub use resolve::{ResolutionStats, Resolver, DEFAULT_URI_PREFIX};

/// Trait for candidate annotation generators.
///
/// The dictionary and grammar matchers implement this seam outside the crate;
/// anything that yields annotations of the five [`Category`] values over a
/// text buffer conforms. Unlike a sealed backend registry, this trait is open
/// on purpose: external matcher implementations are the expected case.
pub trait CandidateSource: Send + Sync {
    /// Produce raw candidate annotations for one document's text.
    ///
    /// Every returned span must reference `text`. `ElementMention` candidates
    /// carry a `kind` feature of `symbol` or `name`.
    ///
    /// # Errors
    ///
    /// Implementations surface their own I/O or matching failures; any error
    /// aborts processing of the current document only.
    fn generate(&self, text: &str) -> Result<Vec<Annotation>>;

    /// Source name for diagnostics.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// A candidate source returning a fixed annotation set, for tests.
///
/// # Example
///
/// ```rust
/// use chemtag::{key, Annotation, CandidateSource, Category, MockSource, Span};
///
/// let source = MockSource::new("dictionary").with_annotations(vec![
///     Annotation::new(Category::ElementMention, Span::new(0, 2))
///         .with_feature(key::KIND, "symbol"),
/// ]);
///
/// let candidates = source.generate("Na").unwrap();
/// assert_eq!(candidates.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    name: &'static str,
    annotations: Vec<Annotation>,
}

impl MockSource {
    /// Create a mock source with no annotations.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            annotations: Vec::new(),
        }
    }

    /// Set the annotations to return on every `generate` call.
    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

impl CandidateSource for MockSource {
    fn generate(&self, _text: &str) -> Result<Vec<Annotation>> {
        Ok(self.annotations.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// A tagger for chemical elements and compounds.
///
/// Owns the candidate sources and the lookup table, validates configuration at
/// construction, and resolves each document's candidates into the final
/// mention set. `process` takes `&self`, so one tagger serves any number of
/// documents in parallel.
pub struct ChemistryTagger {
    sources: Vec<Box<dyn CandidateSource>>,
    table: LookupTable,
    config: TaggerConfig,
}

impl std::fmt::Debug for ChemistryTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChemistryTagger")
            .field("sources", &self.sources.len())
            .field("table", &self.table)
            .field("config", &self.config)
            .finish()
    }
}

impl ChemistryTagger {
    /// Build a tagger from a validated configuration and a set of candidate
    /// sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when a required resource path is
    /// missing and [`Error::DataLoad`] when the element mapping file is
    /// unreadable or malformed. Both are fatal: no document is ever processed
    /// against a partial setup.
    pub fn from_config(
        config: TaggerConfig,
        sources: Vec<Box<dyn CandidateSource>>,
    ) -> Result<Self> {
        config.validate()?;
        let map_path = config
            .element_map()
            .ok_or_else(|| Error::configuration("element map path must be specified"))?;
        let table = LookupTable::from_path(map_path)?;
        log::debug!(
            "loaded {} element mappings from {}",
            table.len(),
            map_path.display()
        );
        Ok(Self {
            sources,
            table,
            config,
        })
    }

    /// Run every candidate source over `text` and resolve the combined raw
    /// annotations into the final mention set.
    ///
    /// # Errors
    ///
    /// Propagates the first candidate source failure. Offset failures during
    /// enrichment are recoverable and never fail the document.
    pub fn process(&self, text: &str) -> Result<AnnotationCollection> {
        let mut annotations = match self.config.annotation_layer() {
            Some(layer) => AnnotationCollection::named(layer),
            None => AnnotationCollection::new(),
        };

        for source in &self.sources {
            let candidates = source.generate(text)?;
            log::debug!("{} produced {} candidates", source.name(), candidates.len());
            annotations.extend(candidates);
        }

        Resolver::new(&self.table)
            .remove_contained_elements(self.config.remove_contained_elements())
            .with_uri_prefix(self.config.uri_prefix())
            .resolve(&mut annotations, text);

        Ok(annotations)
    }

    /// The shared lookup table.
    #[must_use]
    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    /// The configuration the tagger was built with.
    #[must_use]
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_returns_fixed_set() {
        let source = MockSource::new("grammar").with_annotations(vec![Annotation::new(
            Category::CompoundMention,
            Span::new(0, 4),
        )]);

        assert_eq!(source.name(), "grammar");
        assert_eq!(source.generate("NaCl").unwrap().len(), 1);
        assert_eq!(source.generate("other text").unwrap().len(), 1);
    }

    #[test]
    fn test_mock_source_empty_by_default() {
        let source = MockSource::new("dictionary");
        assert!(source.generate("anything").unwrap().is_empty());
    }

    #[test]
    fn test_candidate_source_is_object_safe() {
        let sources: Vec<Box<dyn CandidateSource>> = vec![
            Box::new(MockSource::new("dictionary")),
            Box::new(MockSource::new("grammar")),
        ];
        assert_eq!(sources.len(), 2);
    }
}
