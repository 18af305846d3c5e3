use chrono::{DateTime, Utc};
use sqlx::types::Json;

use crate::content::{Category, CategoryCount, ContentItem, Document};

/// `blog_posts` 与 `categories` 联表查询得到的一行
#[derive(Debug, sqlx::FromRow)]
pub struct ContentItemRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
    pub content: Json<Document>,
    pub category: Json<Category>,
}

impl From<ContentItemRow> for ContentItem {
    fn from(row: ContentItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            author: row.author,
            published_date: row.published_date,
            content: row.content.0,
            category: row.category.0,
        }
    }
}

/// 分类及其文章数量
#[derive(Debug, sqlx::FromRow)]
pub struct CategoryCountRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub post_count: i64,
}

impl From<CategoryCountRow> for CategoryCount {
    fn from(row: CategoryCountRow) -> Self {
        Self {
            category: Category {
                id: row.id,
                name: row.name,
                slug: row.slug,
            },
            post_count: u64::try_from(row.post_count).unwrap_or_default(),
        }
    }
}
