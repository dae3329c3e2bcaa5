use serde::Serialize;

/// Header carrying the total number of records across all pages.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Paging and sorting parameters for list and search requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    /// `property,direction` pairs, e.g. `id,asc`.
    pub sort: Vec<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: vec!["id,asc".to_string()],
        }
    }
}

impl PageRequest {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// The following page, or `None` past the last addressable page.
    pub fn next(&self) -> Option<Self> {
        Some(Self {
            page: self.page.checked_add(1)?,
            ..self.clone()
        })
    }

    /// Query pairs in the order the backend expects; `sort` may repeat.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        query.extend(self.sort.iter().map(|s| ("sort", s.clone())));
        query
    }
}

/// One page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// From `X-Total-Count`; absent when the backend does not send it.
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: Option<u64>) -> Self {
        Self { items, total_count }
    }

    /// Whether pages after `request` may hold more records.
    pub fn has_more(&self, request: &PageRequest) -> bool {
        if request.page == u32::MAX {
            return false;
        }
        match self.total_count {
            Some(total) => (u64::from(request.page) + 1) * u64::from(request.size) < total,
            None => self.items.len() as u64 >= u64::from(request.size),
        }
    }
}

pub(crate) fn parse_total_count(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_default_request_query() {
        let query = PageRequest::default().to_query();
        assert_eq!(
            query,
            vec![
                ("page", "0".to_string()),
                ("size", "20".to_string()),
                ("sort", "id,asc".to_string())
            ]
        );
    }

    #[test]
    fn test_has_more_uses_total_count() {
        let request = PageRequest::with_size(2);
        let page = Page::new(vec![1, 2], Some(5));
        assert!(page.has_more(&request));
        let last = PageRequest {
            page: 2,
            ..request.clone()
        };
        assert!(!Page::new(vec![5], Some(5)).has_more(&last));
    }

    #[test]
    fn test_has_more_without_total_uses_page_fill() {
        let request = PageRequest::with_size(2);
        assert!(Page::new(vec![1, 2], None).has_more(&request));
        assert!(!Page::new(vec![1], None).has_more(&request));
    }

    #[test]
    fn test_last_addressable_page_has_no_successor() {
        let last = PageRequest {
            page: u32::MAX,
            ..PageRequest::default()
        };
        assert!(!Page::<i32>::new(vec![], Some(5)).has_more(&last));
        assert!(!Page::new(vec![0; 20], None).has_more(&last));
        assert_eq!(last.next(), None);

        let request = PageRequest::default();
        assert_eq!(request.next().map(|r| r.page), Some(1));
    }

    #[test]
    fn test_parse_total_count_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_total_count(&headers), None);
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("42"));
        assert_eq!(parse_total_count(&headers), Some(42));
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("lots"));
        assert_eq!(parse_total_count(&headers), None);
    }
}
