use serde::{Deserialize, Serialize};

use super::ListQuery;

/// 分页结果
///
/// 包含当前页数据以及分页元信息，字段以 camelCase 输出。
///
/// - `total_pages = ceil(total_docs / limit)`，无数据时为 0
/// - `docs.len() <= limit`
/// - `paging_counter = (page - 1) * limit + 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub page: u64,
    pub paging_counter: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
}

impl<T> PagedResult<T> {
    /// 用已经切好的一页数据和过滤后的总数构建分页结果
    pub fn from_window(docs: Vec<T>, total_docs: u64, query: &ListQuery) -> Self {
        let page = query.page();
        let limit = query.limit();
        let total_pages = total_docs.div_ceil(limit);

        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;

        Self {
            docs,
            total_docs,
            limit,
            total_pages,
            page,
            paging_counter: query.offset().saturating_add(1),
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }

    /// 对完整的（已过滤、已排序）集合切出查询指定的一页
    ///
    /// 页码超出范围时返回空的 `docs`。
    pub fn paginate(all: Vec<T>, query: &ListQuery) -> Self {
        let total_docs = all.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        let docs = all.into_iter().skip(offset).take(limit).collect();
        Self::from_window(docs, total_docs, query)
    }

    /// 转换每一条数据，分页元信息保持不变
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            limit: self.limit,
            total_pages: self.total_pages,
            page: self.page,
            paging_counter: self.paging_counter,
            has_prev_page: self.has_prev_page,
            has_next_page: self.has_next_page,
            prev_page: self.prev_page,
            next_page: self.next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection() {
        let result = PagedResult::<u32>::paginate(vec![], &ListQuery::default());

        assert!(result.docs.is_empty());
        assert_eq!(result.total_docs, 0);
        assert_eq!(result.total_pages, 0);
        assert!(!result.has_next_page);
        assert!(!result.has_prev_page);
        assert_eq!(result.next_page, None);
        assert_eq!(result.prev_page, None);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for (total, limit, pages) in [(1, 1, 1), (10, 10, 1), (11, 10, 2), (25, 7, 4), (6, 9, 1)] {
            let all: Vec<u64> = (0..total).collect();
            let result = PagedResult::paginate(all, &ListQuery::new(1, limit as i64));
            assert_eq!(result.total_pages, pages, "total={total} limit={limit}");
            assert!(result.docs.len() as u64 <= limit);
        }
    }

    #[test]
    fn test_middle_page_metadata() {
        let all: Vec<u32> = (1..=25).collect();
        let result = PagedResult::paginate(all, &ListQuery::new(2, 10));

        assert_eq!(result.docs, (11..=20).collect::<Vec<_>>());
        assert_eq!(result.paging_counter, 11);
        assert!(result.has_prev_page);
        assert!(result.has_next_page);
        assert_eq!(result.prev_page, Some(1));
        assert_eq!(result.next_page, Some(3));
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let all: Vec<u32> = (1..=3).collect();
        let result = PagedResult::paginate(all, &ListQuery::new(5, 2));

        assert!(result.docs.is_empty());
        assert_eq!(result.total_docs, 3);
        assert_eq!(result.total_pages, 2);
        assert!(!result.has_next_page);
        assert_eq!(result.next_page, None);
        assert_eq!(result.prev_page, Some(4));
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = PagedResult::paginate(vec!["a"], &ListQuery::default());
        let value = serde_json::to_value(&result).expect("序列化失败");

        assert_eq!(
            value,
            serde_json::json!({
                "docs": ["a"],
                "totalDocs": 1,
                "limit": 10,
                "totalPages": 1,
                "page": 1,
                "pagingCounter": 1,
                "hasPrevPage": false,
                "hasNextPage": false,
                "prevPage": null,
                "nextPage": null
            })
        );
    }

    #[test]
    fn test_map_keeps_metadata() {
        let result = PagedResult::paginate(vec![1, 2, 3], &ListQuery::new(2, 2)).map(|n| n * 10);
        assert_eq!(result.docs, vec![30]);
        assert_eq!(result.page, 2);
        assert_eq!(result.total_docs, 3);
    }
}
