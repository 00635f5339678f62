use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One crawled page, keyed by its absolute URL
///
/// Every field is always present at an empty default so consumers never
/// branch on field existence; `#[serde(default)]` keeps snapshots written
/// by older versions of the record loadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    /// Absolute URL, unique within the corpus
    pub url: String,

    /// First heading found on the page, may be empty
    pub title: String,

    /// Plain-text concatenation of extracted text nodes
    pub content: String,

    /// Typed content nodes in document order; richer than `content` when present
    pub content_structure: Vec<ContentNode>,

    /// HTML meta name/property -> content value
    pub metadata: BTreeMap<String, String>,

    /// Merged JSON-LD blocks; key collisions resolve last-write-wins
    pub structured_data: serde_json::Map<String, serde_json::Value>,

    /// Question/answer pairs zipped positionally from matched element sets
    pub faqs: Vec<FaqEntry>,

    /// Texts of elements whose class matches a category keyword
    pub categories: Vec<String>,

    /// Texts of elements whose class matches a related-topic keyword
    pub related_topics: Vec<String>,

    /// First author match, empty if none found
    pub author: String,

    /// First last-updated match, empty if none found
    pub last_updated: String,
}

impl PageRecord {
    /// Creates an empty record for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// A typed node of extracted page content, preserving document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentNode {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
}

/// A question/answer pair extracted from FAQ-shaped markup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// The full ordered corpus for one site
pub type Corpus = Vec<PageRecord>;
