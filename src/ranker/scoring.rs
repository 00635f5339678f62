//! Weighted multi-field term scoring
//!
//! Each query term is scanned against every record field; a field that
//! contains the term contributes its fixed weight once per term. Duplicated
//! query terms therefore contribute their weight multiple times. The
//! leadership boost is the one exception: a flat bonus, applied once, when
//! the query uses a role word and the record carries author metadata.
//!
//! Structured data is matched against one serialized string per record,
//! keys included, so a brand name repeated across JSON-LD entries counts
//! its weight once per term. The description bonus rides the per-term
//! metadata weight: each matching term on a description-like key scores
//! `metadata + description_bonus` rather than a flat +1 per key.

use crate::config::ScoringWeights;
use crate::corpus::PageRecord;

/// Metadata keys that earn the description bonus on a term match
pub const DESCRIPTION_KEYS: [&str; 3] = ["description", "og:description", "twitter:description"];

/// Query terms that mark a leadership-style question ("who is the CEO")
pub const LEADERSHIP_TERMS: [&str; 4] = ["ceo", "founder", "author", "who"];

/// A record that matched the query, with its score and the matched
/// metadata/structured/FAQ/category lines for the context block
#[derive(Debug)]
pub struct RecordMatch<'a> {
    pub record: &'a PageRecord,
    pub score: u32,
    pub info_lines: Vec<String>,
}

/// Splits a query into lowercased terms
///
/// Order is preserved and duplicates are retained: a repeated term counts
/// its weight once per repetition.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Counts how many of the query terms occur in `haystack` (pre-lowercased)
fn matching_terms(haystack: &str, terms: &[String]) -> u32 {
    terms.iter().filter(|t| haystack.contains(t.as_str())).count() as u32
}

/// Scores one record against the query terms
///
/// Returns `None` for a score of zero; such records are excluded entirely.
pub fn score_record<'a>(
    record: &'a PageRecord,
    terms: &[String],
    weights: &ScoringWeights,
) -> Option<RecordMatch<'a>> {
    let mut score = 0u32;
    let mut info_lines = Vec::new();

    score += matching_terms(&record.title.to_lowercase(), terms) * weights.title;
    score += matching_terms(&record.content.to_lowercase(), terms) * weights.content;

    // Structured data scores against one serialized haystack per record;
    // the per-entry scan below only assembles context lines
    if !record.structured_data.is_empty() {
        let serialized = serde_json::to_string(&record.structured_data)
            .unwrap_or_default()
            .to_lowercase();
        score += matching_terms(&serialized, terms) * weights.structured_data;

        for (key, value) in &record.structured_data {
            let entry = format!("{} {}", key, value).to_lowercase();
            if matching_terms(&entry, terms) > 0 {
                info_lines.push(format!("{}: {}", key, value));
            }
        }
    }

    for faq in &record.faqs {
        let combined = format!("{} {}", faq.question, faq.answer).to_lowercase();
        let matched = matching_terms(&combined, terms);
        if matched > 0 {
            score += matched * weights.faq;
            info_lines.push(format!("Q: {}", faq.question));
            info_lines.push(format!("A: {}", faq.answer));
        }
    }

    let mut author_line_present = false;
    for (key, value) in &record.metadata {
        let matched = matching_terms(&value.to_lowercase(), terms);
        if matched > 0 {
            let per_term = if DESCRIPTION_KEYS.contains(&key.as_str()) {
                weights.metadata + weights.description_bonus
            } else {
                weights.metadata
            };
            score += matched * per_term;
            info_lines.push(format!("{}: {}", key, value));
            if key == "author" {
                author_line_present = true;
            }
        }
    }

    // Leadership boost: role words in the query surface author metadata
    // even without a literal text match
    if let Some(author) = record.metadata.get("author") {
        if terms.iter().any(|t| LEADERSHIP_TERMS.contains(&t.as_str())) {
            score += weights.author_boost;
            if !author_line_present {
                info_lines.push(format!("Author: {}", author));
            }
        }
    }

    if !record.categories.is_empty() {
        let joined = record.categories.join(" ");
        let matched = matching_terms(&joined.to_lowercase(), terms);
        if matched > 0 {
            score += matched * weights.taxonomy;
            info_lines.push(format!("Categories: {}", record.categories.join(", ")));
        }
    }

    if !record.related_topics.is_empty() {
        let joined = record.related_topics.join(" ");
        let matched = matching_terms(&joined.to_lowercase(), terms);
        if matched > 0 {
            score += matched * weights.taxonomy;
            info_lines.push(format!(
                "Related topics: {}",
                record.related_topics.join(", ")
            ));
        }
    }

    if score == 0 {
        None
    } else {
        Some(RecordMatch {
            record,
            score,
            info_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ScoringWeights {
        ScoringWeights::default()
    }

    fn record_with_title_and_content(title: &str, content: &str) -> PageRecord {
        let mut record = PageRecord::new("https://example.com/page");
        record.title = title.to_string();
        record.content = content.to_string();
        record
    }

    #[test]
    fn test_query_terms_lowercase_and_keep_duplicates() {
        assert_eq!(
            query_terms("Life LIFE  insurance"),
            vec!["life", "life", "insurance"]
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        let record = record_with_title_and_content("Home", "Welcome");
        let terms = query_terms("mortgage rates");
        assert!(score_record(&record, &terms, &weights()).is_none());
    }

    #[test]
    fn test_title_weight_beats_content_weight() {
        let title_hit = record_with_title_and_content("Term insurance", "nothing relevant");
        let content_hit = record_with_title_and_content("Other page", "term insurance explained");
        let terms = query_terms("term");

        let title_score = score_record(&title_hit, &terms, &weights()).unwrap().score;
        let content_score = score_record(&content_hit, &terms, &weights()).unwrap().score;

        assert_eq!(title_score, 3);
        assert_eq!(content_score, 2);
        assert!(title_score > content_score);
    }

    #[test]
    fn test_repeated_term_counts_twice() {
        let record = record_with_title_and_content("Term insurance", "");
        let once = score_record(&record, &query_terms("term"), &weights())
            .unwrap()
            .score;
        let twice = score_record(&record, &query_terms("term term"), &weights())
            .unwrap()
            .score;
        assert_eq!(twice, once * 2);
    }

    #[test]
    fn test_description_key_bonus() {
        let mut plain = PageRecord::new("https://example.com/a");
        plain.metadata.insert("keywords".to_string(), "life insurance".to_string());

        let mut described = PageRecord::new("https://example.com/b");
        described
            .metadata
            .insert("description".to_string(), "life insurance".to_string());

        let terms = query_terms("life");
        let plain_score = score_record(&plain, &terms, &weights()).unwrap().score;
        let described_score = score_record(&described, &terms, &weights()).unwrap().score;

        assert_eq!(plain_score, 1);
        assert_eq!(described_score, 2);
    }

    #[test]
    fn test_leadership_boost_without_literal_match() {
        let mut with_author = record_with_title_and_content("Insurance guide", "guide text");
        with_author
            .metadata
            .insert("author".to_string(), "Jiten Puri".to_string());
        let without_author = record_with_title_and_content("Insurance guide", "guide text");

        let terms = query_terms("who founded the insurance company");
        let boosted = score_record(&with_author, &terms, &weights()).unwrap().score;
        let base = score_record(&without_author, &terms, &weights()).unwrap().score;

        assert_eq!(boosted, base + 2);
    }

    #[test]
    fn test_leadership_boost_surfaces_author_line() {
        let mut record = PageRecord::new("https://example.com/a");
        record.title = "Company history".to_string();
        record
            .metadata
            .insert("author".to_string(), "Jiten Puri".to_string());

        let terms = query_terms("who started company");
        let matched = score_record(&record, &terms, &weights()).unwrap();

        assert!(matched
            .info_lines
            .iter()
            .any(|l| l == "Author: Jiten Puri"));
    }

    #[test]
    fn test_no_leadership_boost_without_author_metadata() {
        let mut record = PageRecord::new("https://example.com/a");
        record.author = "Jiten Puri".to_string(); // record field, not metadata

        let terms = query_terms("who");
        assert!(score_record(&record, &terms, &weights()).is_none());
    }

    #[test]
    fn test_faq_match_contributes_and_surfaces_lines() {
        let mut record = PageRecord::new("https://example.com/a");
        record.faqs.push(crate::corpus::FaqEntry {
            question: "What is a deductible?".to_string(),
            answer: "The amount you pay before coverage starts.".to_string(),
        });

        let terms = query_terms("deductible");
        let matched = score_record(&record, &terms, &weights()).unwrap();

        assert_eq!(matched.score, 2);
        assert_eq!(matched.info_lines[0], "Q: What is a deductible?");
        assert!(matched.info_lines[1].starts_with("A: "));
    }

    #[test]
    fn test_structured_data_match() {
        let mut record = PageRecord::new("https://example.com/a");
        record.structured_data.insert(
            "name".to_string(),
            serde_json::Value::String("PolicyAdvisor".to_string()),
        );

        let terms = query_terms("policyadvisor");
        let matched = score_record(&record, &terms, &weights()).unwrap();

        assert_eq!(matched.score, 2);
        assert!(matched.info_lines[0].starts_with("name: "));
    }

    #[test]
    fn test_structured_data_term_counts_once_across_entries() {
        let mut record = PageRecord::new("https://example.com/a");
        record.structured_data.insert(
            "name".to_string(),
            serde_json::Value::String("PolicyAdvisor Insurance".to_string()),
        );
        record.structured_data.insert(
            "brand".to_string(),
            serde_json::Value::String("PolicyAdvisor Insurance".to_string()),
        );

        let terms = query_terms("insurance");
        let matched = score_record(&record, &terms, &weights()).unwrap();

        // One haystack per record: repetition across entries adds nothing
        assert_eq!(matched.score, 2);
        // Both entries still surface as context lines
        assert_eq!(matched.info_lines.len(), 2);
    }

    #[test]
    fn test_structured_data_key_match_counts() {
        let mut record = PageRecord::new("https://example.com/a");
        record.structured_data.insert(
            "insurance".to_string(),
            serde_json::Value::String("term and whole life".to_string()),
        );

        let terms = query_terms("insurance");
        let matched = score_record(&record, &terms, &weights()).unwrap();

        assert_eq!(matched.score, 2);
        assert!(matched.info_lines[0].starts_with("insurance: "));
    }

    #[test]
    fn test_title_match_outranks_repeated_structured_entries() {
        let mut structured = PageRecord::new("https://example.com/structured");
        for key in ["name", "brand", "publisher"] {
            structured.structured_data.insert(
                key.to_string(),
                serde_json::Value::String("Acme Insurance".to_string()),
            );
        }

        let mut titled = PageRecord::new("https://example.com/titled");
        titled.title = "Insurance products".to_string();

        let terms = query_terms("insurance");
        let structured_score = score_record(&structured, &terms, &weights()).unwrap().score;
        let titled_score = score_record(&titled, &terms, &weights()).unwrap().score;

        assert_eq!(structured_score, 2);
        assert_eq!(titled_score, 3);
        assert!(titled_score > structured_score);
    }

    #[test]
    fn test_categories_and_related_each_contribute() {
        let mut record = PageRecord::new("https://example.com/a");
        record.categories.push("Life Insurance".to_string());
        record.related_topics.push("Life events".to_string());

        let terms = query_terms("life");
        let matched = score_record(&record, &terms, &weights()).unwrap();

        // One taxonomy point from each sequence
        assert_eq!(matched.score, 2);
    }
}
