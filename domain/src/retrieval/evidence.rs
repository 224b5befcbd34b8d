//! Ordered evidence assembled from all retrieval sources

use super::document::{EvidenceSource, RetrievedDocument};
use crate::core::string::truncate_str;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Separator between documents in the rendered context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Evidence for one question.
///
/// Insertion order is presentation order: vector matches in their native
/// order, then keyword matches in theirs. The same chunk may appear once
/// per source unless [`RankedEvidenceSet::deduplicated`] is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedEvidenceSet {
    documents: Vec<RetrievedDocument>,
}

impl RankedEvidenceSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenate the two source lists, vector first.
    pub fn merge(vector: Vec<RetrievedDocument>, keyword: Vec<RetrievedDocument>) -> Self {
        let mut documents = vector;
        documents.extend(keyword);
        Self { documents }
    }

    pub fn documents(&self) -> &[RetrievedDocument] {
        &self.documents
    }

    pub fn iter(&self) -> impl Iterator<Item = &RetrievedDocument> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn by_source(&self, source: EvidenceSource) -> impl Iterator<Item = &RetrievedDocument> {
        self.documents.iter().filter(move |d| d.source == source)
    }

    /// Drop later copies of an id, keeping the first (vector) occurrence.
    pub fn deduplicated(self) -> Self {
        let mut seen = HashSet::new();
        let documents = self
            .documents
            .into_iter()
            .filter(|d| seen.insert(d.id.clone()))
            .collect();
        Self { documents }
    }

    /// Evidence text for prompts: each document cut to `chars_per_document`
    /// bytes on a char boundary, joined by a blank line.
    pub fn render_context(&self, chars_per_document: usize) -> String {
        self.documents
            .iter()
            .map(|d| truncate_str(&d.text, chars_per_document))
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }
}

impl IntoIterator for RankedEvidenceSet {
    type Item = RetrievedDocument;
    type IntoIter = std::vec::IntoIter<RetrievedDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, source: EvidenceSource, text: &str) -> RetrievedDocument {
        RetrievedDocument::new(id, source, 1.0, text)
    }

    fn ids(set: &RankedEvidenceSet) -> Vec<&str> {
        set.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_merge_order_is_vector_then_keyword() {
        let set = RankedEvidenceSet::merge(
            vec![
                doc("v1", EvidenceSource::Vector, "a"),
                doc("v2", EvidenceSource::Vector, "b"),
            ],
            vec![
                doc("k1", EvidenceSource::Keyword, "c"),
                doc("k2", EvidenceSource::Keyword, "d"),
            ],
        );
        assert_eq!(ids(&set), vec!["v1", "v2", "k1", "k2"]);
        assert_eq!(set.by_source(EvidenceSource::Keyword).count(), 2);
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let set = RankedEvidenceSet::merge(
            vec![doc("c1_0", EvidenceSource::Vector, "x")],
            vec![doc("c1_0", EvidenceSource::Keyword, "x")],
        );
        assert_eq!(set.len(), 2);

        let deduped = set.deduplicated();
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped.documents()[0].source, EvidenceSource::Vector);
    }

    #[test]
    fn test_render_context_truncates_each_document() {
        let set = RankedEvidenceSet::merge(
            vec![doc("v1", EvidenceSource::Vector, "abcdef")],
            vec![doc("k1", EvidenceSource::Keyword, "xyz")],
        );
        assert_eq!(set.render_context(4), "abcd\n\nxyz");
        assert_eq!(RankedEvidenceSet::empty().render_context(400), "");
    }
}
