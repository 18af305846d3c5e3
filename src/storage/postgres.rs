use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::error::Result;

/// 数据库连接池类型
pub type DBPool = sqlx::PgPool;

/// 建表脚本，所有语句都可重复执行
pub const SCHEMA: &str = include_str!("../../sql/01-CREATE_TABLE.sql");

/// 连接池参数
///
/// 只读接口的查询都很短，连接数不需要太多；获取连接超时后请求返回 503。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 8,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(30 * 60),
        }
    }
}

impl PoolSettings {
    /// 覆盖最大连接数，最小连接数随之收紧
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self.min_connections = self.min_connections.min(self.max_connections);
        self
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .test_before_acquire(true)
    }
}

/// 按给定参数连接 PostgreSQL
pub async fn new_db_pool(conn_url: &str, settings: &PoolSettings) -> Result<DBPool> {
    let pool = settings.options().connect(conn_url).await?;
    tracing::debug!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "database pool connected"
    );
    Ok(pool)
}

/// 在一个事务中执行建表脚本
pub async fn migrate(db: &DBPool, script: &str) -> Result<()> {
    let mut tx = db.begin().await?;
    for sql in statements(script) {
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}

/// 去掉 `--` 行注释后按 `;` 拆分语句
///
/// 脚本中的字符串字面量不能包含 `--` 或 `;`。
fn statements(script: &str) -> Vec<String> {
    let stripped: Vec<&str> = script
        .lines()
        .map(|line| line.split_once("--").map_or(line, |(code, _)| code))
        .collect();

    stripped
        .join("\n")
        .split(';')
        .map(str::trim)
        .filter(|sql| !sql.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_skip_comments_and_blanks() {
        let script = "-- schema\nCREATE TABLE a (id INT); -- trailing\n\n;\nCREATE INDEX b ON a (id);\n";
        assert_eq!(
            statements(script),
            vec!["CREATE TABLE a (id INT)", "CREATE INDEX b ON a (id)"]
        );
    }

    #[test]
    fn test_schema_statements() {
        let statements = statements(SCHEMA);
        assert_eq!(statements.len(), 4);
        assert!(statements.iter().all(|sql| sql.contains("IF NOT EXISTS")));
    }

    #[test]
    fn test_with_max_connections() {
        let settings = PoolSettings::default().with_max_connections(0);
        assert_eq!(settings.max_connections, 1);
        assert_eq!(settings.min_connections, 1);

        let settings = PoolSettings::default().with_max_connections(20);
        assert_eq!(settings.max_connections, 20);
        assert_eq!(settings.min_connections, PoolSettings::default().min_connections);
    }
}
