use std::{env, path::PathBuf};

/// 默认监听地址
pub const DEFAULT_ADDR: &str = "0.0.0.0:3001";

/// 日志过滤环境变量
pub const LOG_ENV: &str = "BLOGDESK_LOG";

/// 运行配置，启动时从环境变量读取一次
///
/// - `BLOGDESK_ADDR`：监听地址，默认 [`DEFAULT_ADDR`]
/// - `DATABASE_URL`：设置时使用 PostgreSQL，否则使用内存存储
/// - `BLOGDESK_DB_MAX_CONNECTIONS`：数据库最大连接数，无法解析时忽略
/// - `BLOGDESK_SEED_FILE`：初始化数据文件，未设置时使用内置示例数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: String,
    pub database_url: Option<String>,
    pub db_max_connections: Option<u32>,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            addr: non_empty("BLOGDESK_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            database_url: non_empty("DATABASE_URL"),
            db_max_connections: non_empty("BLOGDESK_DB_MAX_CONNECTIONS")
                .and_then(|v| v.trim().parse().ok()),
            seed_file: non_empty("BLOGDESK_SEED_FILE").map(PathBuf::from),
        }
    }
}
