//! Listing request and response shapes

use drive_types::{Entry, PageToken};
use serde::{Deserialize, Serialize};

/// Corpus searched by every listing
pub const DRIVE_SPACE: &str = "drive";

/// One page request of a `list children` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// Filter expression (`q`); empty means no filter
    pub query: String,
    /// Corpus to search
    pub spaces: String,
    /// Field projection; `None` lets the store return every field
    pub fields: Option<String>,
    /// Cursor of the page to fetch; `None` for the first page
    pub page_token: Option<PageToken>,
}

impl ListRequest {
    /// Creates a first-page request for the given filter expression
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            spaces: DRIVE_SPACE.to_string(),
            fields: None,
            page_token: None,
        }
    }

    /// Sets the field projection
    pub fn with_fields(mut self, fields: Option<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the page cursor
    pub fn with_page_token(mut self, page_token: Option<PageToken>) -> Self {
        self.page_token = page_token;
        self
    }
}

/// One page of a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    /// Entries on this page, in store order
    #[serde(default)]
    pub files: Vec<Entry>,
    /// Cursor of the next page, absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<PageToken>,
}

impl ListPage {
    /// Creates a final page
    pub fn last(files: Vec<Entry>) -> Self {
        Self {
            files,
            next_page_token: None,
        }
    }

    /// Creates a page followed by more pages
    pub fn with_next(files: Vec<Entry>, next_page_token: PageToken) -> Self {
        Self {
            files,
            next_page_token: Some(next_page_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_types::FileId;

    #[test]
    fn test_list_request_defaults() {
        let request = ListRequest::new("'root' in parents");
        assert_eq!(request.query, "'root' in parents");
        assert_eq!(request.spaces, "drive");
        assert_eq!(request.fields, None);
        assert_eq!(request.page_token, None);
    }

    #[test]
    fn test_list_page_wire_shape() {
        let page: ListPage = serde_json::from_str(
            r#"{"files": [{"id": "a"}], "nextPageToken": "T"}"#,
        )
        .unwrap();
        assert_eq!(page.files, vec![Entry::with_id(&FileId::new("a"))]);
        assert_eq!(page.next_page_token, Some(PageToken::new("T")));

        let last: ListPage = serde_json::from_str(r#"{}"#).unwrap();
        assert!(last.files.is_empty());
        assert!(last.next_page_token.is_none());
    }
}
