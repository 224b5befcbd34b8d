//! Hybrid retrieval domain: documents and the merged evidence set

pub mod document;
pub mod evidence;

pub use document::{DocumentMetadata, EvidenceSource, RetrievedDocument};
pub use evidence::RankedEvidenceSet;
