use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Document, excerpt, format_date};

/// 博客文章
///
/// `slug` 全局唯一；`category` 只是对分类的只读引用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: String,
    #[serde(with = "published_date")]
    pub published_date: DateTime<Utc>,
    pub content: Document,
    pub category: Category,
}

impl ContentItem {
    /// 标题或作者中是否包含 `needle`
    ///
    /// `needle` 须已转为小写。
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }

    pub fn in_category(&self, slug: &str) -> bool {
        self.category.slug == slug
    }

    /// 转换为列表卡片视图
    pub fn to_card(&self, excerpt_len: usize) -> PostCard {
        PostCard {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            author: self.author.clone(),
            published_date: self.published_date,
            formatted_date: format_date(&self.published_date),
            excerpt: excerpt(self, excerpt_len),
            category: self.category.clone(),
        }
    }
}

/// 文章卡片
///
/// 列表页展示用，正文替换为摘要，并附带格式化后的发布日期。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: String,
    #[serde(with = "published_date")]
    pub published_date: DateTime<Utc>,
    pub formatted_date: String,
    pub excerpt: String,
    pub category: Category,
}

/// `publishedDate` 的序列化格式：`2024-01-15T10:00:00.000Z`
///
/// 反序列化同时接受 RFC 3339 和纯日期 `2024-01-15`（按 UTC 零点处理）。
pub mod published_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid publishedDate: {s}")))
    }

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
