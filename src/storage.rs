mod backend;
mod memory;
mod models;
mod postgres;
mod querier;
mod store;

pub use self::{
    backend::Backend,
    memory::{MemoryStore, MemoryWriter},
    postgres::{DBPool, PoolSettings, SCHEMA, migrate, new_db_pool},
    querier::ContentStore,
    store::{SqlxStore, Store},
};
