use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use serde::Deserialize;

use super::Result;

use crate::{
    content::{Category, CategoryCount, ContentItem, DEFAULT_EXCERPT_LEN, PostCard},
    listing::{ListQuery, ListingService, PagedResult},
    state::AppState,
    storage::Backend,
};

type Listing = ListingService<Backend>;

/// 配置文章相关路由。
///
/// 路由包括：
/// - `GET /blog-posts`：分页文章列表
/// - `GET /blog-posts/{slug}`：获取单篇文章
/// - `GET /cards`：分页文章卡片（摘要 + 格式化日期）
/// - `GET /categories`：获取所有分类
/// - `GET /categories/counts`：获取所有分类及其文章数
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/blog-posts", get(post_list))
        .route("/blog-posts/{slug}", get(post))
        .route("/cards", get(card_list))
        .route("/categories", get(category_list))
        .route("/categories/counts", get(category_counts))
}

/// 查询参数，用于文章列表分页和筛选。
///
/// 数字参数无法解析或不为正数时使用默认值，不返回错误。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    category: Option<String>,
    /// 仅 `/cards` 使用：摘要长度
    excerpt: Option<String>,
}

impl QueryParams {
    fn to_query(&self) -> ListQuery {
        let mut query = ListQuery::default()
            .with_page(parse_or(self.page.as_deref(), 0))
            .with_limit(parse_or(self.limit.as_deref(), 0));

        if let Some(search) = &self.search {
            query = query.with_search(search);
        }
        if let Some(category) = &self.category {
            query = query.with_category(category);
        }
        query
    }

    fn excerpt_len(&self) -> usize {
        self.excerpt
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_EXCERPT_LEN)
    }
}

fn parse_or(value: Option<&str>, fallback: i64) -> i64 {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(fallback)
}

/// 获取文章列表。
///
/// 支持分页、搜索和分类筛选，返回 [`PagedResult`]。
async fn post_list(
    Query(params): Query<QueryParams>,
    State(listing): State<Listing>,
) -> Result<Json<PagedResult<ContentItem>>> {
    listing.list(&params.to_query()).await.map(Json)
}

/// 获取文章卡片列表。
async fn card_list(
    Query(params): Query<QueryParams>,
    State(listing): State<Listing>,
) -> Result<Json<PagedResult<PostCard>>> {
    listing
        .list_cards(&params.to_query(), params.excerpt_len())
        .await
        .map(Json)
}

/// 根据 slug 获取单篇文章。
///
/// 如果文章不存在返回 [`crate::error::Error::NotFound`]。
async fn post(Path(slug): Path<String>, State(listing): State<Listing>) -> Result<Json<ContentItem>> {
    listing.get_by_slug(&slug).await.map(Json)
}

/// 获取所有分类。
async fn category_list(State(listing): State<Listing>) -> Result<Json<Vec<Category>>> {
    listing.list_categories().await.map(Json)
}

/// 获取所有分类及各自的文章数。
async fn category_counts(State(listing): State<Listing>) -> Result<Json<Vec<CategoryCount>>> {
    listing.category_counts().await.map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: &str, limit: &str) -> QueryParams {
        QueryParams {
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_malformed_numbers_fall_back_to_defaults() {
        let query = params("abc", "-3").to_query();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);

        let query = params(" 2 ", "9").to_query();
        assert_eq!(query.page(), 2);
        assert_eq!(query.limit(), 9);
    }

    #[test]
    fn test_excerpt_len() {
        assert_eq!(QueryParams::default().excerpt_len(), DEFAULT_EXCERPT_LEN);

        let params = QueryParams {
            excerpt: Some("40".to_string()),
            ..Default::default()
        };
        assert_eq!(params.excerpt_len(), 40);
    }
}
