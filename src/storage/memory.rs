use std::sync::{Arc, RwLock};

use crate::{
    content::{Category, ContentItem},
    error::{Error, Result},
};

use super::{ContentStore, Store};

/// 内存中的一份数据快照
#[derive(Debug, Clone, Default)]
struct Snapshot {
    categories: Vec<Category>,
    items: Vec<ContentItem>,
}

impl Snapshot {
    /// 以当前分类数据重新关联文章，引用了不存在分类的文章会被跳过
    fn joined_items(self) -> Vec<ContentItem> {
        let Snapshot { categories, items } = self;

        items
            .into_iter()
            .filter_map(|mut item| {
                match categories.iter().find(|c| c.id == item.category.id) {
                    Some(category) => {
                        item.category = category.clone();
                        Some(item)
                    }
                    None => {
                        tracing::warn!(slug = %item.slug, category = %item.category.id, "item references missing category");
                        None
                    }
                }
            })
            .collect()
    }

    fn apply(&mut self, op: Op) {
        match op {
            Op::Clean => *self = Snapshot::default(),
            Op::UpsertCategory(category) => {
                match self.categories.iter_mut().find(|c| c.id == category.id) {
                    Some(existing) => *existing = category,
                    None => self.categories.push(category),
                }
            }
            Op::UpsertItem(item) => match self.items.iter_mut().find(|i| i.slug == item.slug) {
                Some(existing) => *existing = item,
                None => self.items.push(item),
            },
        }
    }
}

/// 内存内容存储
///
/// 只提供原始集合，过滤与分页交给列表服务在本地完成。
/// 克隆得到的实例共享同一份数据。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<RwLock<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取写入器，修改在 [`Store::commit`] 时一次性生效
    pub fn writer(&self) -> MemoryWriter {
        MemoryWriter {
            store: self.clone(),
            ops: Vec::new(),
        }
    }

    fn snapshot(&self) -> Result<Snapshot> {
        self.snapshot
            .read()
            .map(|s| s.clone())
            .map_err(|_| Error::store_unavailable("memory store lock poisoned"))
    }
}

impl ContentStore for MemoryStore {
    async fn list_items(&self) -> Result<Vec<ContentItem>> {
        Ok(self.snapshot()?.joined_items())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.snapshot()?.categories)
    }
}

enum Op {
    Clean,
    UpsertCategory(Category),
    UpsertItem(ContentItem),
}

/// [`MemoryStore`] 的 [`Store`] 实现
pub struct MemoryWriter {
    store: MemoryStore,
    ops: Vec<Op>,
}

impl Store for MemoryWriter {
    fn clean(&mut self) -> &mut Self {
        self.ops.push(Op::Clean);
        self
    }

    fn upsert_category(&mut self, category: &Category) -> &mut Self {
        self.ops.push(Op::UpsertCategory(category.clone()));
        self
    }

    fn upsert_item(&mut self, item: &ContentItem) -> &mut Self {
        self.ops.push(Op::UpsertItem(item.clone()));
        self
    }

    async fn commit(self) -> Result<()> {
        let mut snapshot = self
            .store
            .snapshot
            .write()
            .map_err(|_| Error::store_unavailable("memory store lock poisoned"))?;

        for op in self.ops {
            snapshot.apply(op);
        }

        Ok(())
    }
}
