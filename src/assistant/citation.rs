//! Normalized grounded answers and citation extraction.
//!
//! A grounded response carries zero or more source references in the first
//! candidate's grounding metadata. Order is the provider's relevance order
//! and is preserved; absent metadata yields an empty list, not an error.

use crate::gemini::types::{GroundingChunk, GroundingMetadata};

// ---------------------------------------------------------------------------
// Citation
// ---------------------------------------------------------------------------

/// A review excerpt attached to a maps citation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSnippet {
    pub uri: String,
    pub text: String,
}

/// One source reference attached to a generated answer.
///
/// Web-search responses produce only `Web` entries; location-search
/// responses produce only `Maps` entries.
#[derive(Debug, Clone, PartialEq)]
pub enum Citation {
    Web {
        uri: String,
        title: String,
    },
    Maps {
        uri: String,
        title: String,
        review_snippets: Vec<ReviewSnippet>,
    },
}

impl Citation {
    pub fn is_web(&self) -> bool {
        matches!(self, Citation::Web { .. })
    }

    pub fn is_maps(&self) -> bool {
        matches!(self, Citation::Maps { .. })
    }

    /// Display title of the cited source.
    pub fn title(&self) -> &str {
        match self {
            Citation::Web { title, .. } | Citation::Maps { title, .. } => title,
        }
    }

    /// URI of the cited source.
    pub fn uri(&self) -> &str {
        match self {
            Citation::Web { uri, .. } | Citation::Maps { uri, .. } => uri,
        }
    }

    fn from_chunk(chunk: &GroundingChunk) -> Option<Self> {
        if let Some(web) = &chunk.web {
            return Some(Citation::Web {
                uri: web.uri.clone(),
                title: web.title.clone(),
            });
        }
        if let Some(maps) = &chunk.maps {
            let review_snippets = maps
                .place_answer_sources
                .iter()
                .flat_map(|source| source.review_snippets.iter())
                .map(|s| ReviewSnippet {
                    uri: s.uri.clone(),
                    text: s.text.clone(),
                })
                .collect();
            return Some(Citation::Maps {
                uri: maps.uri.clone(),
                title: maps.title.clone(),
                review_snippets,
            });
        }
        None
    }

    /// Extract citations from grounding metadata, preserving provider order.
    /// Chunks carrying neither source variant are skipped.
    pub fn from_grounding(metadata: Option<&GroundingMetadata>) -> Vec<Citation> {
        metadata
            .map(|m| {
                m.grounding_chunks
                    .iter()
                    .filter_map(Citation::from_chunk)
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// GroundedAnswer
// ---------------------------------------------------------------------------

/// Normalized result of a retrieval-backed operation.
#[derive(Debug, Clone)]
pub struct GroundedAnswer {
    pub text: String,
    pub citations: Vec<Citation>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
