use axum::extract::FromRef;

use crate::{listing::ListingService, storage::Backend};

/// 应用程序上下文
///
/// [`AppState`] 封装了内容存储和列表服务，供各个路由共享。
#[derive(Clone, FromRef)]
pub struct AppState {
    listing: ListingService<Backend>,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(backend: Backend) -> Self {
        Self {
            listing: ListingService::new(backend),
        }
    }
}
