use chrono::{DateTime, Utc};

use super::ContentItem;

/// 默认摘要长度（字符数）
pub const DEFAULT_EXCERPT_LEN: usize = 100;

const ELLIPSIS: &str = "...";

/// 生成文章摘要
///
/// 取第一个块中第一个子节点的文本（不限块类型）：不超过 `max_len` 个字符时原样返回，
/// 否则截取前 `max_len` 个字符并追加 `...`。没有可用文本时返回空字符串。
pub fn excerpt(item: &ContentItem, max_len: usize) -> String {
    let Some(text) = item.content.first_text() else {
        return String::new();
    };

    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// 格式化发布日期，如 `January 15, 2024`
///
/// 固定使用英文月份名，按 UTC 日期计算。
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::content::{Block, Category, Document};

    fn item_with(content: Document) -> ContentItem {
        ContentItem {
            id: "1".to_string(),
            title: "t".to_string(),
            slug: "t".to_string(),
            author: "a".to_string(),
            published_date: Utc.with_ymd_and_hms(2024, 1, 5, 11, 20, 0).unwrap(),
            content,
            category: Category {
                id: "1".to_string(),
                name: "Design".to_string(),
                slug: "design".to_string(),
            },
        }
    }

    #[test]
    fn test_excerpt_short_text_unchanged() {
        let item = item_with(Document::paragraph("short"));
        assert_eq!(excerpt(&item, 5), "short");
        assert_eq!(excerpt(&item, 100), "short");
    }

    #[test]
    fn test_excerpt_truncates_and_appends_ellipsis() {
        let item = item_with(Document::paragraph("abcdefghij"));
        let result = excerpt(&item, 4);
        assert_eq!(result, "abcd...");
        assert!(result.chars().count() <= 4 + 3);
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let item = item_with(Document::paragraph("无障碍设计指南"));
        assert_eq!(excerpt(&item, 3), "无障碍...");
    }

    #[test]
    fn test_excerpt_zero_length() {
        let item = item_with(Document::paragraph("abc"));
        assert_eq!(excerpt(&item, 0), "...");
    }

    #[test]
    fn test_excerpt_only_uses_first_text_of_first_block() {
        let item = item_with(Document::new(vec![
            Block::paragraph("first"),
            Block::paragraph("second"),
        ]));
        assert_eq!(excerpt(&item, 100), "first");
    }

    #[test]
    fn test_excerpt_without_text_is_empty() {
        assert_eq!(excerpt(&item_with(Document::default()), 10), "");

        let unknown = Block::from(serde_json::json!({ "type": "hr" }));
        assert_eq!(excerpt(&item_with(Document::new(vec![unknown])), 10), "");
    }

    #[test]
    fn test_excerpt_of_heading_first_block() {
        let heading = Block::from(serde_json::json!({
            "type": "h2",
            "children": [ { "text": "Heading" } ]
        }));
        let item = item_with(Document::new(vec![heading, Block::paragraph("body")]));
        assert_eq!(excerpt(&item, 100), "Heading");
        assert_eq!(excerpt(&item, 4), "Head...");
    }

    #[test]
    fn test_excerpt_of_paragraph_with_inline_link() {
        let paragraph = Block::from(serde_json::json!({
            "children": [
                { "text": "Intro " },
                { "type": "link", "url": "https://example.com", "children": [ { "text": "here" } ] }
            ]
        }));
        let item = item_with(Document::new(vec![paragraph]));
        assert_eq!(excerpt(&item, 100), "Intro ");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 11, 20, 0).unwrap();
        assert_eq!(format_date(&date), "January 5, 2024");

        let date = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_date(&date), "December 31, 2023");
    }
}
