use serde::{Deserialize, Serialize};

/// 文章分类
///
/// `slug` 在所有分类中唯一，被文章引用后不再变更。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// 带文章数量的分类，用于分类总览页
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_count_flattens_category() {
        let count = CategoryCount {
            category: Category {
                id: "1".to_string(),
                name: "Technology".to_string(),
                slug: "technology".to_string(),
            },
            post_count: 3,
        };

        let value = serde_json::to_value(&count).expect("序列化失败");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1",
                "name": "Technology",
                "slug": "technology",
                "postCount": 3
            })
        );
    }
}
