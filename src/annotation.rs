//! Annotation types: spans, categories, feature maps and the per-document
//! annotation collection.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Well-known feature keys used by the matchers and the resolution engine.
pub mod key {
    /// Mention kind produced by the matchers: `symbol` or `name`.
    pub const KIND: &str = "kind";
    /// Canonical element symbol, original case (`Na`).
    pub const SYMBOL: &str = "symbol";
    /// Canonical element name, lower case (`sodium`).
    pub const NAME: &str = "name";
    /// Reference identifier: URI prefix followed by the element symbol.
    pub const URI: &str = "uri";
}

/// A half-open byte-offset interval `[start, end)` over a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span. Callers must uphold `start <= end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Full containment: `other`'s bounds lie entirely within this span.
    ///
    /// A span contains itself; a span that merely touches a boundary and
    /// extends past it is not contained.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Check if this span overlaps with another.
    #[must_use]
    pub const fn overlaps(&self, other: Self) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// Byte range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Extract the text covered by this span.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Offset`] when the interval is out of range for the
    /// document or does not fall on UTF-8 character boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> Result<&'a str> {
        text.get(self.start..self.end).ok_or(Error::Offset {
            start: self.start,
            end: self.end,
            len: text.len(),
        })
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Annotation category.
///
/// The three raw categories record intermediate matcher state; only
/// [`Category::ElementMention`] and [`Category::CompoundMention`] survive
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A dictionary hit rejected by the grammar stage.
    RejectedCandidate,
    /// A dictionary hit for a symbol appearing inside a compound.
    RawCompoundContextHit,
    /// A dictionary hit for an isolated element symbol or name.
    RawElementHit,
    /// A resolved mention of a chemical element.
    ElementMention,
    /// A resolved mention of a chemical compound or ion.
    CompoundMention,
}

impl Category {
    /// Convert to label string.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::RejectedCandidate => "RejectedCandidate",
            Self::RawCompoundContextHit => "RawCompoundContextHit",
            Self::RawElementHit => "RawElementHit",
            Self::ElementMention => "ElementMention",
            Self::CompoundMention => "CompoundMention",
        }
    }

    /// Parse from a label string.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "RejectedCandidate" => Some(Self::RejectedCandidate),
            "RawCompoundContextHit" => Some(Self::RawCompoundContextHit),
            "RawElementHit" => Some(Self::RawElementHit),
            "ElementMention" => Some(Self::ElementMention),
            "CompoundMention" => Some(Self::CompoundMention),
            _ => None,
        }
    }

    /// True for intermediate matcher state discarded by resolution.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(
            self,
            Self::RejectedCandidate | Self::RawCompoundContextHit | Self::RawElementHit
        )
    }

    /// True for the final mention categories.
    #[must_use]
    pub const fn is_mention(&self) -> bool {
        matches!(self, Self::ElementMention | Self::CompoundMention)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// One annotation over a document's text: a category, a span and a feature map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation category.
    pub category: Category,
    /// Covered span.
    pub span: Span,
    /// String-keyed feature map. Ordered so serialized output is stable.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, String>,
}

impl Annotation {
    /// Create an annotation with no features.
    #[must_use]
    pub fn new(category: Category, span: Span) -> Self {
        Self {
            category,
            span,
            features: BTreeMap::new(),
        }
    }

    /// Add a feature (builder style).
    #[must_use]
    pub fn with_feature(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(key.into(), value.into());
        self
    }

    /// Look up a feature value.
    #[must_use]
    pub fn feature(&self, key: &str) -> Option<&str> {
        self.features.get(key).map(String::as_str)
    }

    /// Set a feature, replacing any existing value.
    pub fn set_feature(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.features.insert(key.into(), value.into());
    }
}

/// Ordered, mutable multiset of annotations over one document's text.
///
/// Exists for the lifetime of one document's processing and is owned
/// exclusively by the engine invocation that created it. An optional layer
/// name tags the collection for hosts that maintain several annotation
/// layers per document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layer: Option<String>,
    annotations: Vec<Annotation>,
}

impl AnnotationCollection {
    /// Create an empty collection on the unnamed default layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection on a named layer.
    #[must_use]
    pub fn named(layer: impl Into<String>) -> Self {
        Self {
            layer: Some(layer.into()),
            annotations: Vec::new(),
        }
    }

    /// Create a collection from existing annotations.
    #[must_use]
    pub fn from_annotations(annotations: Vec<Annotation>) -> Self {
        Self {
            layer: None,
            annotations,
        }
    }

    /// Layer name, if any.
    #[must_use]
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    /// Number of annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Append one annotation.
    pub fn push(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Append a batch of annotations, preserving their order.
    pub fn extend(&mut self, annotations: impl IntoIterator<Item = Annotation>) {
        self.annotations.extend(annotations);
    }

    /// Iterate over all annotations in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    /// Iterate mutably over all annotations.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Annotation> {
        self.annotations.iter_mut()
    }

    /// Iterate over annotations of one category.
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.category == category)
    }

    /// Spans of all annotations of one category, in insertion order.
    #[must_use]
    pub fn spans_of(&self, category: Category) -> Vec<Span> {
        self.of_category(category).map(|a| a.span).collect()
    }

    /// Iterate over annotations of one category fully contained in `span`.
    pub fn contained_in(
        &self,
        category: Category,
        span: Span,
    ) -> impl Iterator<Item = &Annotation> {
        self.of_category(category)
            .filter(move |a| span.contains(a.span))
    }

    /// Remove every annotation whose category is listed. Returns the number
    /// removed.
    pub fn remove_categories(&mut self, categories: &[Category]) -> usize {
        let before = self.annotations.len();
        self.annotations.retain(|a| !categories.contains(&a.category));
        before - self.annotations.len()
    }

    /// Keep only annotations matching the predicate.
    pub fn retain(&mut self, f: impl FnMut(&Annotation) -> bool) {
        self.annotations.retain(f);
    }

    /// View the annotations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl IntoIterator for AnnotationCollection {
    type Item = Annotation;
    type IntoIter = std::vec::IntoIter<Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnnotationCollection {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}

impl FromIterator<Annotation> for AnnotationCollection {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self::from_annotations(iter.into_iter().collect())
    }
}
