use crate::{
    content::{Category, CategoryCount, ContentItem},
    error::Result,
    listing::{ListQuery, PagedResult},
    seed::{Catalogue, PersistMode},
};

use super::{ContentStore, DBPool, MemoryStore, SqlxStore};

/// 运行时选定的内容存储
///
/// - [`Backend::Postgres`]：存储端完成过滤分页
/// - [`Backend::Memory`]：返回完整集合，由列表服务本地计算
#[derive(Debug, Clone)]
pub enum Backend {
    Postgres(DBPool),
    Memory(MemoryStore),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    /// 把数据集写入当前存储
    pub async fn seed(&self, catalogue: &Catalogue, mode: PersistMode) -> Result<()> {
        match self {
            Backend::Postgres(pool) => {
                catalogue
                    .persist(SqlxStore::new(pool.clone()), mode)
                    .await
            }
            Backend::Memory(store) => catalogue.persist(store.writer(), mode).await,
        }
    }
}

impl ContentStore for Backend {
    async fn list_items(&self) -> Result<Vec<ContentItem>> {
        match self {
            Backend::Postgres(pool) => pool.list_items().await,
            Backend::Memory(store) => store.list_items().await,
        }
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        match self {
            Backend::Postgres(pool) => pool.list_categories().await,
            Backend::Memory(store) => store.list_categories().await,
        }
    }

    async fn query(&self, query: &ListQuery) -> Result<Option<PagedResult<ContentItem>>> {
        match self {
            Backend::Postgres(pool) => pool.query(query).await,
            Backend::Memory(store) => store.query(query).await,
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentItem>> {
        match self {
            Backend::Postgres(pool) => pool.find_by_slug(slug).await,
            Backend::Memory(store) => store.find_by_slug(slug).await,
        }
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        match self {
            Backend::Postgres(pool) => pool.category_counts().await,
            Backend::Memory(store) => store.category_counts().await,
        }
    }
}
