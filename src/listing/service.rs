use tracing::instrument;

use crate::{
    content::{Category, CategoryCount, ContentItem, PostCard},
    error::{Error, Result},
    storage::ContentStore,
};

use super::{ListQuery, PagedResult};

/// 文章列表服务
///
/// 无状态，每次调用都从注入的 [`ContentStore`] 取一份独立快照。
/// 存储端支持查询时直接使用其结果，否则在本地执行 [`evaluate`]。
#[derive(Debug, Clone)]
pub struct ListingService<S> {
    store: S,
}

impl<S: ContentStore> ListingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 分页查询文章
    ///
    /// 结果为空不是错误，只有存储不可用时返回 [`Error::StoreUnavailable`]。
    #[instrument(skip_all, fields(page = query.page(), limit = query.limit(), search = query.search(), category = query.category()))]
    pub async fn list(&self, query: &ListQuery) -> Result<PagedResult<ContentItem>> {
        if let Some(result) = self.store.query(query).await? {
            return Ok(result);
        }

        let items = self.store.list_items().await?;
        Ok(evaluate(items, query))
    }

    /// 分页查询文章卡片（摘要 + 格式化日期）
    pub async fn list_cards(
        &self,
        query: &ListQuery,
        excerpt_len: usize,
    ) -> Result<PagedResult<PostCard>> {
        let result = self.list(query).await?;
        Ok(result.map(|item| item.to_card(excerpt_len)))
    }

    /// 按 slug 获取文章，不存在时返回 [`Error::NotFound`]
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<ContentItem> {
        self.store.find_by_slug(slug).await?.ok_or(Error::NotFound)
    }

    /// 所有分类，按存储中的写入顺序
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.store.list_categories().await
    }

    /// 每个分类的文章数量
    pub async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        self.store.category_counts().await
    }
}

/// 在完整集合上执行查询
///
/// 1. 搜索词：标题或作者包含（不区分大小写）
/// 2. 分类：slug 完全相等
/// 3. 按发布时间倒序，时间相同保持原有顺序
/// 4. 按页切片
pub fn evaluate(items: Vec<ContentItem>, query: &ListQuery) -> PagedResult<ContentItem> {
    let mut items: Vec<ContentItem> = items.into_iter().filter(|item| query.matches(item)).collect();

    // sort_by 是稳定排序
    items.sort_by(|a, b| b.published_date.cmp(&a.published_date));

    PagedResult::paginate(items, query)
}
