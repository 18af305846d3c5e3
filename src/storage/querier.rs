use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder};

use crate::{
    content::{Category, CategoryCount, ContentItem},
    error::Result,
    listing::{ListQuery, PagedResult},
};

use super::{
    DBPool,
    models::{CategoryCountRow, ContentItemRow},
};

/// 内容存储的读取接口
///
/// 只有 [`ContentStore::list_items`] 和 [`ContentStore::list_categories`] 是必须实现的；
/// 能在存储端完成过滤分页的实现可以覆盖 [`ContentStore::query`]，
/// 否则由列表服务在本地计算。
pub trait ContentStore: Send + Sync {
    /// 所有文章，按写入顺序
    fn list_items(&self) -> impl Future<Output = Result<Vec<ContentItem>>> + Send;

    /// 所有分类，按写入顺序
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;

    /// 在存储端执行过滤、排序和分页
    ///
    /// 返回 `None` 表示不支持，调用方需自行计算。
    fn query(
        &self,
        _query: &ListQuery,
    ) -> impl Future<Output = Result<Option<PagedResult<ContentItem>>>> + Send {
        async { Ok(None) }
    }

    /// 按 slug 精确查找文章（区分大小写）
    fn find_by_slug(&self, slug: &str) -> impl Future<Output = Result<Option<ContentItem>>> + Send {
        async move {
            let items = self.list_items().await?;
            Ok(items.into_iter().find(|item| item.slug == slug))
        }
    }

    /// 每个分类下的文章数量，按分类顺序
    ///
    /// 默认实现基于同一份快照统计，只读取一次文章集合。
    fn category_counts(&self) -> impl Future<Output = Result<Vec<CategoryCount>>> + Send {
        async move {
            let (categories, items) = tokio::try_join!(self.list_categories(), self.list_items())?;

            let mut counts: HashMap<&str, u64> = HashMap::new();
            for item in &items {
                *counts.entry(item.category.slug.as_str()).or_default() += 1;
            }

            Ok(categories
                .iter()
                .map(|category| CategoryCount {
                    post_count: counts.get(category.slug.as_str()).copied().unwrap_or(0),
                    category: category.clone(),
                })
                .collect())
        }
    }
}

const SELECT_ITEMS: &str = r#"
    SELECT p.id, p.title, p.slug, p.author, p.published_date, p.content,
           jsonb_build_object('id', c.id, 'name', c.name, 'slug', c.slug) AS category
    FROM blog_posts p
    INNER JOIN categories c ON p.category_id = c.id
"#;

const COUNT_ITEMS: &str = r#"
    SELECT COUNT(*)
    FROM blog_posts p
    INNER JOIN categories c ON p.category_id = c.id
"#;

/// 计数与取页必须看到同一份快照
const SNAPSHOT_ISOLATION: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// PostgreSQL 的 [`ContentStore`] 实现
///
/// 过滤、排序和分页都在 SQL 中完成；`seq` 列记录写入顺序，用于同一发布时间的排序。
impl ContentStore for DBPool {
    async fn list_items(&self) -> Result<Vec<ContentItem>> {
        let rows = sqlx::query_as::<_, ContentItemRow>(&format!("{SELECT_ITEMS} ORDER BY p.seq"))
            .fetch_all(self)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
                SELECT id, name, slug
                FROM categories
                ORDER BY seq
                "#,
        )
        .fetch_all(self)
        .await?;
        Ok(rows)
    }

    async fn query(&self, query: &ListQuery) -> Result<Option<PagedResult<ContentItem>>> {
        let mut tx = self.begin().await?;
        sqlx::query(SNAPSHOT_ISOLATION).execute(&mut *tx).await?;

        let mut count = QueryBuilder::<Postgres>::new(COUNT_ITEMS);
        push_filters(&mut count, query);
        let total_docs: i64 = count.build_query_scalar().fetch_one(&mut *tx).await?;

        let mut builder = page_query(query);
        let rows = builder
            .build_query_as::<ContentItemRow>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(PagedResult::from_window(
            rows.into_iter().map(Into::into).collect(),
            u64::try_from(total_docs).unwrap_or_default(),
            query,
        )))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentItem>> {
        let row = sqlx::query_as::<_, ContentItemRow>(&format!(
            "{SELECT_ITEMS} WHERE p.slug = $1 LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(self)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            r#"
                SELECT c.id, c.name, c.slug, COUNT(p.id) AS post_count
                FROM categories c
                LEFT JOIN blog_posts p ON p.category_id = c.id
                GROUP BY c.seq, c.id, c.name, c.slug
                ORDER BY c.seq
                "#,
        )
        .fetch_all(self)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// 追加搜索词和分类过滤条件
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    builder.push(" WHERE TRUE");

    if let Some(search) = query.search() {
        let pattern = format!("%{}%", escape_like(search));
        builder
            .push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.author ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(slug) = query.category() {
        builder.push(" AND c.slug = ").push_bind(slug.to_string());
    }
}

/// 带过滤条件、排序和分页窗口的文章查询
fn page_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(SELECT_ITEMS);
    push_filters(&mut builder, query);
    builder.push(" ORDER BY p.published_date DESC, p.seq ASC");
    builder.push(" LIMIT ").push_bind(to_i64(query.limit()));
    builder.push(" OFFSET ").push_bind(to_i64(query.offset()));
    builder
}

/// 转义 LIKE 通配符，使搜索词按字面子串匹配
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("rust"), "rust");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_push_filters_sql() {
        let query = ListQuery::default()
            .with_search("design")
            .with_category("technology");
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM blog_posts p");
        push_filters(&mut builder, &query);

        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM blog_posts p WHERE TRUE AND (p.title ILIKE $1 OR p.author ILIKE $2) AND c.slug = $3"
        );
    }

    #[test]
    fn test_page_query_orders_by_date_then_insertion() {
        let builder = page_query(&ListQuery::new(2, 5).with_category("design"));
        let sql = builder.sql();

        assert!(sql.ends_with(
            "AND c.slug = $1 ORDER BY p.published_date DESC, p.seq ASC LIMIT $2 OFFSET $3"
        ));
    }

    #[test]
    fn test_snapshot_isolation_is_repeatable_read() {
        assert!(SNAPSHOT_ISOLATION.contains("REPEATABLE READ"));
    }
}
