mod category;
mod format;
mod item;
mod rich_text;

pub use self::{
    category::{Category, CategoryCount},
    format::{DEFAULT_EXCERPT_LEN, excerpt, format_date},
    item::{ContentItem, PostCard, published_date},
    rich_text::{Block, Document, TextSpan},
};
