//! Filter expressions and field projections sent to the store

use drive_types::FileId;

/// Field carrying the listing cursor
pub const PAGE_TOKEN_FIELD: &str = "nextPageToken";

/// Projection used for single-level lookups
pub const ID_ONLY_FIELDS: &str = "files(id)";

/// Filter selecting the children of `parent`, narrowed by `query`
///
/// - parent and query: `'<parent>' in parents and <query>`
/// - parent only: `'<parent>' in parents`
/// - query only: the query verbatim
/// - neither: the empty string (no filter)
///
/// An empty parent ID or empty query counts as absent.
pub fn children_filter(parent: Option<&FileId>, query: Option<&str>) -> String {
    let parent = parent.filter(|p| !p.is_empty());
    let query = query.filter(|q| !q.is_empty());

    match (parent, query) {
        (Some(parent), Some(query)) => format!("'{}' in parents and {}", parent, query),
        (Some(parent), None) => format!("'{}' in parents", parent),
        (None, Some(query)) => query.to_string(),
        (None, None) => String::new(),
    }
}

/// Query matching entries named exactly `name`
///
/// The name is not escaped.
pub fn name_query(name: &str) -> String {
    format!("name='{}'", name)
}

/// Ensures a projection includes the page cursor
///
/// `None` stays `None`: the store then returns every field, cursor
/// included.
pub fn with_page_token_field(fields: Option<&str>) -> Option<String> {
    let fields = fields.filter(|f| !f.is_empty())?;
    if fields.contains(PAGE_TOKEN_FIELD) {
        Some(fields.to_string())
    } else {
        Some(format!("{},{}", PAGE_TOKEN_FIELD, fields))
    }
}
