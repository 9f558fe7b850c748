//! Paged result sets returned by list operations

use serde::{Deserialize, Serialize};

/// One page of a resource collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionModel<T> {
    #[serde(default = "Vec::new")]
    pub item: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub records_per_page: u32,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<String>,
}

impl<T> CollectionModel<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.item.len()
    }
}

impl<T> Default for CollectionModel<T> {
    fn default() -> Self {
        Self {
            item: Vec::new(),
            page: 0,
            records_per_page: 0,
            total_records: 0,
            search_query: None,
            sort: None,
            embed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_platform_page() {
        let page: CollectionModel<String> = serde_json::from_str(
            r#"{"item":["a","b"],"page":2,"recordsPerPage":2,"totalRecords":9,"searchQuery":"x"}"#,
        )
        .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.records_per_page, 2);
        assert_eq!(page.total_records, 9);
        assert_eq!(page.search_query.as_deref(), Some("x"));
    }

    #[test]
    fn missing_items_mean_empty_page() {
        let page: CollectionModel<String> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
    }
}
