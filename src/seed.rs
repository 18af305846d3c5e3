use std::{collections::HashSet, path::Path};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    content::{Category, ContentItem, Document, published_date},
    error::{Error, Result},
    storage::{ContentStore, Store},
};

/// 内置示例数据
const BUILTIN_CATALOGUE: &str = include_str!("../seed/catalogue.toml");

/// 持久化模式
///
/// - [`PersistMode::ResetAll`]：重置所有数据，然后再写入
/// - [`PersistMode::Incremental`]：增量更新，按 id / slug 覆盖已有数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    ResetAll,
    Incremental,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    posts: Vec<SeedPost>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedPost {
    id: Option<String>,
    title: String,
    slug: String,
    author: String,
    #[serde(with = "published_date")]
    published_date: DateTime<Utc>,
    /// 分类 slug
    category: String,
    /// 完整的富文本内容
    content: Option<Document>,
    /// 只有一个段落时的简写
    text: Option<String>,
}

/// 一组待写入的分类和文章
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    pub categories: Vec<Category>,
    pub items: Vec<ContentItem>,
}

impl Catalogue {
    /// 内置示例数据：3 个分类、6 篇文章
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOGUE)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Self::resolve(toml::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Self::resolve(serde_yaml::from_str(s)?)
    }

    /// 从文件加载，按扩展名选择格式（`.toml`、`.yaml`、`.yml`）
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Err(Error::Custom("Unsupported seed file extension")),
        }
    }

    /// 校验 slug 唯一性，并把文章的分类 slug 解析为分类
    fn resolve(file: SeedFile) -> Result<Self> {
        let mut category_slugs = HashSet::new();
        for category in &file.categories {
            if !category_slugs.insert(category.slug.as_str()) {
                return Err(Error::Custom("Duplicate category slug in seed data"));
            }
        }

        let mut item_slugs = HashSet::new();
        let mut items = Vec::with_capacity(file.posts.len());

        for (index, post) in file.posts.into_iter().enumerate() {
            if !item_slugs.insert(post.slug.clone()) {
                return Err(Error::Custom("Duplicate post slug in seed data"));
            }

            let category = file
                .categories
                .iter()
                .find(|c| c.slug == post.category)
                .cloned()
                .ok_or(Error::Custom("Post references an unknown category"))?;

            let content = match (post.content, post.text) {
                (Some(content), _) => content,
                (None, Some(text)) => Document::paragraph(text),
                (None, None) => Document::default(),
            };

            items.push(ContentItem {
                id: post.id.unwrap_or_else(|| (index + 1).to_string()),
                title: post.title,
                slug: post.slug,
                author: post.author,
                published_date: post.published_date,
                content,
                category,
            });
        }

        Ok(Self {
            categories: file.categories,
            items,
        })
    }

    /// 写入存储，分类先于文章
    pub async fn persist<S: Store>(&self, mut store: S, mode: PersistMode) -> Result<()> {
        if let PersistMode::ResetAll = mode {
            store.clean();
        }

        for category in &self.categories {
            store.upsert_category(category);
        }
        for item in &self.items {
            store.upsert_item(item);
        }

        store.commit().await
    }
}

/// 存储中没有任何分类时写入数据集，返回是否执行了写入
#[instrument(skip_all)]
pub async fn seed_if_empty<S, W>(reader: &S, writer: W, catalogue: &Catalogue) -> Result<bool>
where
    S: ContentStore,
    W: Store,
{
    if !reader.list_categories().await?.is_empty() {
        tracing::info!("store already populated, skipping seed");
        return Ok(false);
    }

    catalogue.persist(writer, PersistMode::Incremental).await?;
    tracing::info!(
        categories = catalogue.categories.len(),
        posts = catalogue.items.len(),
        "seeded empty store"
    );
    Ok(true)
}
