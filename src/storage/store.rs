use sqlx::types::Json;

use crate::{
    content::{Category, ContentItem},
    error::Result,
    storage::DBPool,
};

/// 内容存储的写入接口
///
/// 修改先排队，调用 [`Store::commit`] 时一次性提交。只用于初始化数据。
pub trait Store: Send + Sync {
    /// 清空所有文章和分类
    fn clean(&mut self) -> &mut Self;
    /// 插入或更新分类，以 `id` 判断冲突
    fn upsert_category(&mut self, category: &Category) -> &mut Self;
    /// 插入或更新文章，以 `slug` 判断冲突
    fn upsert_item(&mut self, item: &ContentItem) -> &mut Self;
    /// 提交更改
    fn commit(self) -> impl Future<Output = Result<()>>;
}

/// sqlx 的 [`Store`] 实现
pub struct SqlxStore {
    pool: DBPool,
    queries: Vec<sqlx::query::Query<'static, sqlx::Postgres, sqlx::postgres::PgArguments>>,
}

impl SqlxStore {
    pub fn new(pool: DBPool) -> Self {
        Self {
            pool,
            queries: Default::default(),
        }
    }
}

impl Store for SqlxStore {
    fn clean(&mut self) -> &mut Self {
        let query = sqlx::query("TRUNCATE TABLE blog_posts, categories RESTART IDENTITY");
        self.queries.push(query);
        self
    }

    fn upsert_category(&mut self, category: &Category) -> &mut Self {
        let q = sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET
                name = EXCLUDED.name,
                slug = EXCLUDED.slug
            "#,
        )
        .bind(category.id.to_owned())
        .bind(category.name.to_owned())
        .bind(category.slug.to_owned());

        self.queries.push(q);
        self
    }

    fn upsert_item(&mut self, item: &ContentItem) -> &mut Self {
        let q = sqlx::query(
            "
            INSERT INTO blog_posts
                (id, slug, title, author, published_date, content, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (slug)
            DO UPDATE SET
                id = EXCLUDED.id,
                title = EXCLUDED.title,
                author = EXCLUDED.author,
                published_date = EXCLUDED.published_date,
                content = EXCLUDED.content,
                category_id = EXCLUDED.category_id
            ",
        )
        .bind(item.id.to_owned())
        .bind(item.slug.to_owned())
        .bind(item.title.to_owned())
        .bind(item.author.to_owned())
        .bind(item.published_date)
        .bind(Json(item.content.clone()))
        .bind(item.category.id.to_owned());

        self.queries.push(q);
        self
    }

    async fn commit(mut self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for q in self.queries.drain(..) {
            q.execute(tx.as_mut()).await?;
        }

        Ok(tx.commit().await?)
    }
}
