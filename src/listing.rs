mod paged;
mod query;
mod service;

pub use self::{
    paged::PagedResult,
    query::{DEFAULT_LIMIT, DEFAULT_PAGE, ListQuery},
    service::{ListingService, evaluate},
};
