//! Context-block formatting
//!
//! Renders ranked records into the plain-text block injected into the
//! downstream prompt. Each record gets its title, the matched supporting
//! lines under "Additional Information", and either a structured rendering
//! of the page's content nodes or a bounded plain-text preview.

use crate::corpus::ContentNode;
use crate::ranker::scoring::RecordMatch;

/// Formats one matched record as a context block
pub fn format_block(matched: &RecordMatch, preview_chars: usize) -> String {
    let record = matched.record;
    let mut block = format!("Title: {}", record.title);

    if !matched.info_lines.is_empty() {
        block.push_str("\nAdditional Information:\n");
        block.push_str(&matched.info_lines.join("\n"));
    }

    if !record.content_structure.is_empty() {
        block.push_str("\nContent:\n");
        block.push_str(&render_structure(&record.content_structure));
    } else if !record.content.is_empty() {
        block.push_str("\nContent: ");
        block.push_str(&preview(&record.content, preview_chars));
    }

    block
}

/// Renders typed content nodes with heading/paragraph/list markup
fn render_structure(nodes: &[ContentNode]) -> String {
    let mut lines = Vec::new();

    for node in nodes {
        match node {
            ContentNode::Heading { level, text } => {
                let marks = "#".repeat((*level).clamp(1, 6) as usize);
                lines.push(format!("{} {}", marks, text));
            }
            ContentNode::Paragraph { text } => {
                lines.push(text.clone());
            }
            ContentNode::List { items } => {
                for item in items {
                    lines.push(format!("- {}", item));
                }
            }
        }
    }

    lines.join("\n")
}

/// First `max_chars` characters of the content, with a trailing ellipsis
/// when truncation actually happened
fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }

    let truncated: String = content.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::PageRecord;

    fn matched<'a>(record: &'a PageRecord, info_lines: Vec<String>) -> RecordMatch<'a> {
        RecordMatch {
            record,
            score: 1,
            info_lines,
        }
    }

    #[test]
    fn test_block_with_info_lines_and_plain_content() {
        let mut record = PageRecord::new("https://example.com/a");
        record.title = "Term life".to_string();
        record.content = "Short content".to_string();

        let block = format_block(
            &matched(&record, vec!["description: Affordable cover".to_string()]),
            1000,
        );

        assert_eq!(
            block,
            "Title: Term life\nAdditional Information:\ndescription: Affordable cover\nContent: Short content"
        );
    }

    #[test]
    fn test_long_content_truncated_with_ellipsis() {
        let mut record = PageRecord::new("https://example.com/a");
        record.title = "Long page".to_string();
        record.content = "x".repeat(1500);

        let block = format_block(&matched(&record, Vec::new()), 1000);

        assert!(block.ends_with("..."));
        // 1000 content chars plus the ellipsis
        let content_part = block.split("Content: ").nth(1).unwrap();
        assert_eq!(content_part.chars().count(), 1003);
    }

    #[test]
    fn test_short_content_has_no_ellipsis() {
        let mut record = PageRecord::new("https://example.com/a");
        record.content = "short".to_string();

        let block = format_block(&matched(&record, Vec::new()), 1000);
        assert!(!block.ends_with("..."));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let mut record = PageRecord::new("https://example.com/a");
        record.content = "é".repeat(20);

        let block = format_block(&matched(&record, Vec::new()), 10);
        let content_part = block.split("Content: ").nth(1).unwrap();
        assert_eq!(content_part, format!("{}...", "é".repeat(10)));
    }

    #[test]
    fn test_structured_content_preferred_over_plain() {
        let mut record = PageRecord::new("https://example.com/a");
        record.title = "Guide".to_string();
        record.content = "plain fallback".to_string();
        record.content_structure = vec![
            ContentNode::Heading {
                level: 2,
                text: "Coverage".to_string(),
            },
            ContentNode::Paragraph {
                text: "Details here.".to_string(),
            },
            ContentNode::List {
                items: vec!["Term".to_string(), "Whole".to_string()],
            },
        ];

        let block = format_block(&matched(&record, Vec::new()), 1000);

        assert!(block.contains("## Coverage"));
        assert!(block.contains("Details here."));
        assert!(block.contains("- Term\n- Whole"));
        assert!(!block.contains("plain fallback"));
    }
}
