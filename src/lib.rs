pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod listing;
pub mod seed;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::{Config, LOG_ENV};
use error::Result;
use seed::Catalogue;
use state::AppState;
use storage::{Backend, MemoryStore, PoolSettings, SCHEMA, SqlxStore, migrate, new_db_pool};

/// 初始化日志输出
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env(LOG_ENV))
        .init();
}

/// 根据配置连接内容存储，使用 PostgreSQL 时确保表结构存在
pub async fn connect_backend(config: &Config) -> Result<Backend> {
    let backend = match &config.database_url {
        Some(url) => {
            let mut settings = PoolSettings::default();
            if let Some(max) = config.db_max_connections {
                settings = settings.with_max_connections(max);
            }
            let pool = new_db_pool(url, &settings).await?;
            migrate(&pool, SCHEMA).await?;
            Backend::Postgres(pool)
        }
        None => Backend::Memory(MemoryStore::new()),
    };
    tracing::info!(backend = backend.name(), "content store ready");
    Ok(backend)
}

/// 加载初始化数据：配置了文件则读取文件，否则使用内置示例数据
pub fn load_catalogue(config: &Config) -> Result<Catalogue> {
    match &config.seed_file {
        Some(path) => Catalogue::load(path),
        None => Catalogue::builtin(),
    }
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env();
    let backend = connect_backend(&config).await?;
    let catalogue = load_catalogue(&config)?;

    match &backend {
        Backend::Postgres(pool) => {
            seed::seed_if_empty(pool, SqlxStore::new(pool.clone()), &catalogue).await?
        }
        Backend::Memory(store) => seed::seed_if_empty(store, store.writer(), &catalogue).await?,
    };

    api::run_server(AppState::new(backend), &config.addr).await
}
