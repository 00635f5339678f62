//! HTML extraction: pages into records, anchors into frontier candidates
//!
//! Extraction is best-effort per field. A page without a `<main>` region,
//! without JSON-LD, or without FAQ-shaped markup simply leaves that field at
//! its empty default; nothing here aborts extraction of the remaining fields.

use crate::corpus::{ContentNode, FaqEntry, PageRecord};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Metadata keys and class-attribute keywords the extractor looks for
const AUTHOR_META_KEY: &str = "author";
const MODIFIED_META_KEY: &str = "article:modified_time";
const QUESTION_CLASS: &str = "question";
const ANSWER_CLASS: &str = "answer";
const CATEGORY_CLASS: &str = "category";
const RELATED_CLASS: &str = "related";
const AUTHOR_CLASS: &str = "author";
const UPDATED_CLASS: &str = "updated";

/// Parses one page into a [`PageRecord`]
///
/// # Arguments
///
/// * `html` - The fetched page body
/// * `url` - The absolute URL the body was fetched from
pub fn extract_record(html: &str, url: &str) -> PageRecord {
    let document = Html::parse_document(html);
    let mut record = PageRecord::new(url);

    record.title = extract_title(&document);

    if let Some(region) = main_region(&document) {
        let (content, structure) = extract_content(&region);
        record.content = content;
        record.content_structure = structure;
    }

    record.metadata = extract_metadata(&document);
    record.structured_data = extract_structured_data(&document);
    record.faqs = extract_faqs(&document);
    record.categories = texts_with_class_keyword(&document, CATEGORY_CLASS);
    record.related_topics = texts_with_class_keyword(&document, RELATED_CLASS);
    record.author = extract_author(&document, &record.metadata);
    record.last_updated = extract_last_updated(&document, &record.metadata);

    record
}

/// Extracts same-origin link targets from a page
///
/// Resolves every anchor href against `base_url`, then retains only URLs
/// whose origin matches `seed`'s origin and that carry no fragment
/// identifier. Order follows the document; duplicates are dropped.
pub fn discover_links(html: &str, base_url: &Url, seed: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = std::collections::HashSet::new();

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return links,
    };

    for element in document.select(&anchor_selector) {
        let href = match element.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };
        if href.is_empty() {
            continue;
        }

        let resolved = match base_url.join(href) {
            Ok(u) => u,
            Err(_) => continue,
        };

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }
        if resolved.origin() != seed.origin() {
            continue;
        }
        if resolved.fragment().is_some() {
            continue;
        }

        if seen.insert(resolved.to_string()) {
            links.push(resolved);
        }
    }

    links
}

/// First heading on the page, any level
fn extract_title(document: &Html) -> String {
    let selector = match Selector::parse("h1, h2, h3, h4, h5, h6") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default()
}

/// The page's main content region: `<main>`, falling back to `<article>`
fn main_region<'a>(document: &'a Html) -> Option<ElementRef<'a>> {
    for tag in ["main", "article"] {
        if let Ok(selector) = Selector::parse(tag) {
            if let Some(element) = document.select(&selector).next() {
                return Some(element);
            }
        }
    }
    None
}

/// Walks the main region and collects plain text plus typed content nodes
///
/// Headings and paragraphs feed both `content` and `content_structure`;
/// lists only appear in the structure. Paragraphs nested inside list items
/// are skipped so list text is not collected twice.
fn extract_content(region: &ElementRef) -> (String, Vec<ContentNode>) {
    let mut text_parts = Vec::new();
    let mut structure = Vec::new();

    for node in region.descendants() {
        let element = match ElementRef::wrap(node) {
            Some(el) => el,
            None => continue,
        };

        match element.value().name() {
            name @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                let text = element_text(&element);
                if text.is_empty() {
                    continue;
                }
                let level = name.as_bytes()[1] - b'0';
                text_parts.push(text.clone());
                structure.push(ContentNode::Heading { level, text });
            }
            "p" => {
                if has_list_ancestor(&element) {
                    continue;
                }
                let text = element_text(&element);
                if text.is_empty() {
                    continue;
                }
                text_parts.push(text.clone());
                structure.push(ContentNode::Paragraph { text });
            }
            "ul" | "ol" => {
                let items = list_items(&element);
                if !items.is_empty() {
                    structure.push(ContentNode::List { items });
                }
            }
            _ => {}
        }
    }

    (text_parts.join(" "), structure)
}

/// Direct and nested `<li>` texts of a list element
fn list_items(list: &ElementRef) -> Vec<String> {
    let selector = match Selector::parse("li") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    list.select(&selector)
        .map(|li| element_text(&li))
        .filter(|t| !t.is_empty())
        .collect()
}

fn has_list_ancestor(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "li")
}

/// All `<meta>` tags with a name or property attribute and a content value
fn extract_metadata(document: &Html) -> std::collections::BTreeMap<String, String> {
    let mut metadata = std::collections::BTreeMap::new();

    let selector = match Selector::parse("meta") {
        Ok(s) => s,
        Err(_) => return metadata,
    };

    for element in document.select(&selector) {
        let attrs = element.value();
        let name = attrs.attr("name").or_else(|| attrs.attr("property"));
        if let (Some(name), Some(content)) = (name, attrs.attr("content")) {
            if !name.is_empty() && !content.is_empty() {
                metadata.insert(name.to_string(), content.to_string());
            }
        }
    }

    metadata
}

/// Merges every JSON-LD block on the page into one mapping
///
/// Key collisions resolve last-write-wins in document order. A block that
/// fails to parse, or whose top level is not an object, is skipped.
fn extract_structured_data(document: &Html) -> serde_json::Map<String, serde_json::Value> {
    let mut merged = serde_json::Map::new();

    let selector = match Selector::parse(r#"script[type="application/ld+json"]"#) {
        Ok(s) => s,
        Err(_) => return merged,
    };

    for element in document.select(&selector) {
        let raw = element.text().collect::<String>();
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Object(block)) => {
                for (key, value) in block {
                    merged.insert(key, value);
                }
            }
            Ok(_) => {
                tracing::debug!("Skipping non-object JSON-LD block");
            }
            Err(e) => {
                tracing::debug!("Skipping malformed JSON-LD block: {}", e);
            }
        }
    }

    merged
}

/// Pairs question elements with answer elements positionally
///
/// A page with unequal question and answer counts yields pairs only up to
/// the shorter count; the trailing unmatched elements are dropped.
fn extract_faqs(document: &Html) -> Vec<FaqEntry> {
    let questions = texts_with_class_keyword(document, QUESTION_CLASS);
    let answers = texts_with_class_keyword(document, ANSWER_CLASS);

    questions
        .into_iter()
        .zip(answers)
        .map(|(question, answer)| FaqEntry { question, answer })
        .collect()
}

/// Texts of all elements whose class attribute contains `keyword`,
/// case-insensitively, in document order
fn texts_with_class_keyword(document: &Html, keyword: &str) -> Vec<String> {
    let selector = match Selector::parse("[class]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter(|el| {
            el.value()
                .attr("class")
                .map(|c| c.to_lowercase().contains(keyword))
                .unwrap_or(false)
        })
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .collect()
}

/// First author match: `<meta name="author">`, then any author-classed element
fn extract_author(
    document: &Html,
    metadata: &std::collections::BTreeMap<String, String>,
) -> String {
    if let Some(author) = metadata.get(AUTHOR_META_KEY) {
        return author.clone();
    }

    texts_with_class_keyword(document, AUTHOR_CLASS)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// First last-updated match: modified-time meta, then `<time datetime>`,
/// then any updated-classed element
fn extract_last_updated(
    document: &Html,
    metadata: &std::collections::BTreeMap<String, String>,
) -> String {
    if let Some(modified) = metadata.get(MODIFIED_META_KEY) {
        return modified.clone();
    }

    if let Ok(selector) = Selector::parse("time[datetime]") {
        if let Some(element) = document.select(&selector).next() {
            if let Some(datetime) = element.value().attr("datetime") {
                return datetime.to_string();
            }
        }
    }

    texts_with_class_keyword(document, UPDATED_CLASS)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Whitespace-normalized text content of an element
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
