use std::io;

use axum::{http::StatusCode, response::IntoResponse};

pub type Result<T> = core::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 内容存储不可用（连接失败、查询失败、内存存储锁中毒等）
    #[error("content store unavailable: {0}")]
    StoreUnavailable(#[source] BoxError),

    #[error("Not Found")]
    NotFound,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Custom(&'static str),
}

impl Error {
    pub fn store_unavailable(err: impl Into<BoxError>) -> Self {
        Error::StoreUnavailable(err.into())
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::store_unavailable(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::StoreUnavailable(e) => {
                tracing::error!(%e, "content store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
            }
            .into_response(),
            Error::NotFound => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
            e @ (Error::Io(_) | Error::Toml(_) | Error::Yaml(_) | Error::Custom(_)) => {
                tracing::error!(%e, "seed data error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
        }
    }
}
