use crate::content::ContentItem;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// 文章列表查询条件
///
/// 每次请求新建。页码和每页数量不合法（<= 0）时回退到默认值，
/// 去除首尾空白后为空的搜索词和空的分类 slug 视为未设置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u64,
    limit: u64,
    search: Option<String>,
    category: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            category: None,
        }
    }
}

impl ListQuery {
    pub fn new(page: i64, limit: i64) -> Self {
        Self::default().with_page(page).with_limit(limit)
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = normalize(page, DEFAULT_PAGE);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = normalize(limit, DEFAULT_LIMIT);
        self
    }

    pub fn with_search(mut self, search: impl AsRef<str>) -> Self {
        let search = search.as_ref().trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    pub fn with_category(mut self, slug: impl AsRef<str>) -> Self {
        let slug = slug.as_ref();
        self.category = (!slug.is_empty()).then(|| slug.to_string());
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// 当前页第一条记录在完整结果中的下标（从 0 开始）
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// 文章是否同时满足搜索词和分类条件
    pub fn matches(&self, item: &ContentItem) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|s| item.matches_search(&s.to_lowercase()));
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|slug| item.in_category(slug));

        search_ok && category_ok
    }
}

fn normalize(value: i64, default: u64) -> u64 {
    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_values_fall_back_to_defaults() {
        let query = ListQuery::new(0, -5);
        assert_eq!(query.page(), DEFAULT_PAGE);
        assert_eq!(query.limit(), DEFAULT_LIMIT);

        let query = ListQuery::new(-1, 0);
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);

        let query = ListQuery::new(3, 9);
        assert_eq!(query.page(), 3);
        assert_eq!(query.limit(), 9);
    }

    #[test]
    fn test_blank_search_and_category_are_ignored() {
        let query = ListQuery::default().with_search("   ").with_category("");
        assert_eq!(query.search(), None);
        assert_eq!(query.category(), None);

        let query = ListQuery::default().with_search("  Design ");
        assert_eq!(query.search(), Some("Design"));
    }

    #[test]
    fn test_offset() {
        assert_eq!(ListQuery::new(1, 10).offset(), 0);
        assert_eq!(ListQuery::new(3, 4).offset(), 8);
        assert_eq!(ListQuery::new(i64::MAX, i64::MAX).offset(), u64::MAX);
    }
}
