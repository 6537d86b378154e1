//! Four-phase resolution of raw candidate annotations.
//!
//! The matchers leave behind overlapping and redundant candidate annotations;
//! resolution reduces them to a clean, enriched, non-redundant mention set:
//!
//! 1. discard intermediate matcher state (rejected and raw-hit categories);
//! 2. remove element mentions fully contained in a compound mention;
//! 3. enrich the surviving element mentions with canonical symbol, name and
//!    reference URI from the lookup table;
//! 4. return the mutated collection with run counters.
//!
//! Each phase is fully committed before the next begins. Removals are computed
//! first and applied as a single batch so the set being scanned is never
//! disturbed mid-iteration.

use crate::annotation::{key, AnnotationCollection, Category};
use crate::lookup::LookupTable;

/// Default reference base prepended to element symbols when building URIs.
pub const DEFAULT_URI_PREFIX: &str =
    "http://www.daml.org/2003/01/periodictable/PeriodicTable.owl#";

/// Categories recording intermediate matcher state, dropped in phase one.
const RAW_CATEGORIES: [Category; 3] = [
    Category::RejectedCandidate,
    Category::RawCompoundContextHit,
    Category::RawElementHit,
];

const KIND_SYMBOL: &str = "symbol";
const KIND_NAME: &str = "name";

/// Counters reported by one resolution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Rejected and raw-hit annotations discarded in phase one.
    pub discarded: usize,
    /// Element mentions removed for being contained in a compound mention.
    pub contained_removed: usize,
    /// Element mentions enriched with canonical features.
    pub enriched: usize,
    /// Element mentions skipped because their offsets did not resolve.
    pub offset_failures: usize,
}

/// The resolution engine.
///
/// Borrows an immutable [`LookupTable`] and runs as a pure, synchronous
/// transformation of one document's annotation collection; independent
/// documents can be resolved fully in parallel against the same table.
///
/// # Example
///
/// ```rust
/// use chemtag::{key, Annotation, AnnotationCollection, Category, LookupTable, Resolver, Span};
///
/// let table = LookupTable::from_reader("Na\nSodium\n".as_bytes()).unwrap();
/// let mut annotations = AnnotationCollection::from_annotations(vec![
///     Annotation::new(Category::ElementMention, Span::new(0, 2))
///         .with_feature(key::KIND, "symbol"),
/// ]);
///
/// Resolver::new(&table).resolve(&mut annotations, "Na levels rose");
///
/// let mention = &annotations.as_slice()[0];
/// assert_eq!(mention.feature(key::SYMBOL), Some("Na"));
/// assert_eq!(mention.feature(key::NAME), Some("sodium"));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    table: &'a LookupTable,
    remove_contained_elements: bool,
    uri_prefix: &'a str,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with default settings: containment removal on, the
    /// periodic table reference base as URI prefix.
    #[must_use]
    pub fn new(table: &'a LookupTable) -> Self {
        Self {
            table,
            remove_contained_elements: true,
            uri_prefix: DEFAULT_URI_PREFIX,
        }
    }

    /// Set whether element mentions fully contained in a compound mention are
    /// removed.
    #[must_use]
    pub fn remove_contained_elements(mut self, remove: bool) -> Self {
        self.remove_contained_elements = remove;
        self
    }

    /// Set the reference base prepended to element symbols when building URIs.
    #[must_use]
    pub fn with_uri_prefix(mut self, prefix: &'a str) -> Self {
        self.uri_prefix = prefix;
        self
    }

    /// Resolve one document's raw annotations in place.
    ///
    /// `text` is the document buffer every span in `annotations` refers to.
    /// Offset failures are scoped to the affected annotation: it keeps its
    /// category and span, loses only its enrichment, and is counted in
    /// [`ResolutionStats::offset_failures`].
    pub fn resolve(
        &self,
        annotations: &mut AnnotationCollection,
        text: &str,
    ) -> ResolutionStats {
        let mut stats = ResolutionStats {
            discarded: annotations.remove_categories(&RAW_CATEGORIES),
            ..ResolutionStats::default()
        };

        if self.remove_contained_elements {
            stats.contained_removed = remove_contained(annotations);
        }

        self.enrich(annotations, text, &mut stats);

        log::debug!(
            "resolved {} annotations: {} discarded, {} contained removed, {} enriched, {} offset failures",
            annotations.len(),
            stats.discarded,
            stats.contained_removed,
            stats.enriched,
            stats.offset_failures
        );
        stats
    }

    fn enrich(
        &self,
        annotations: &mut AnnotationCollection,
        text: &str,
        stats: &mut ResolutionStats,
    ) {
        for annotation in annotations.iter_mut() {
            if annotation.category != Category::ElementMention {
                continue;
            }

            let surface = match annotation.span.slice(text) {
                Ok(surface) => surface,
                Err(err) => {
                    log::warn!("skipping enrichment of {} at {}: {err}", annotation.category, annotation.span);
                    stats.offset_failures += 1;
                    continue;
                }
            };

            let is_symbol = annotation
                .feature(key::KIND)
                .is_some_and(|k| k.eq_ignore_ascii_case(KIND_SYMBOL));
            let is_name = annotation
                .feature(key::KIND)
                .is_some_and(|k| k.eq_ignore_ascii_case(KIND_NAME));

            if is_symbol {
                let name = self.table.by_symbol(surface).map(str::to_owned);
                annotation.set_feature(key::SYMBOL, surface);
                if let Some(name) = name {
                    annotation.set_feature(key::NAME, name);
                }
                annotation.set_feature(key::URI, format!("{}{surface}", self.uri_prefix));
                stats.enriched += 1;
            } else if is_name {
                let symbol = self.table.by_name(surface).map(str::to_owned);
                annotation.set_feature(key::NAME, surface);
                if let Some(symbol) = symbol {
                    annotation.set_feature(key::URI, format!("{}{symbol}", self.uri_prefix));
                    annotation.set_feature(key::SYMBOL, symbol);
                }
                stats.enriched += 1;
            }
            // any other kind, or no kind at all, is left unenriched
        }
    }
}

/// Remove every element mention whose span is fully contained in some compound
/// mention span. Boundary-touching mentions that extend outside stay.
fn remove_contained(annotations: &mut AnnotationCollection) -> usize {
    // collect compound spans first, then remove in one batch pass
    let compounds = annotations.spans_of(Category::CompoundMention);
    if compounds.is_empty() {
        return 0;
    }

    let before = annotations.len();
    annotations.retain(|a| {
        a.category != Category::ElementMention
            || !compounds.iter().any(|compound| compound.contains(a.span))
    });
    before - annotations.len()
}
