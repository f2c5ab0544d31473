//! Request identity carried through the host's web-request context.
//!
//! Zellij hands the context map of a web request back unchanged with its
//! result, so the `(query, page)` pair is stored there when the request is sent
//! and read back when the response arrives.

use crate::search::{PageNumber, Query, SearchRequest};
use std::collections::BTreeMap;

const KIND_KEY: &str = "moviesearch";
const KIND_SEARCH: &str = "search_movie";
const QUERY_KEY: &str = "query";
const PAGE_KEY: &str = "page";

#[must_use]
pub fn encode(request: &SearchRequest) -> BTreeMap<String, String> {
    BTreeMap::from([
        (KIND_KEY.to_string(), KIND_SEARCH.to_string()),
        (QUERY_KEY.to_string(), request.query().as_str().to_string()),
        (PAGE_KEY.to_string(), request.page().get().to_string()),
    ])
}

/// Reads a request back from a response context.
///
/// Returns `None` for contexts that were not produced by [`encode`].
#[must_use]
pub fn decode(context: &BTreeMap<String, String>) -> Option<SearchRequest> {
    if context.get(KIND_KEY).map(String::as_str) != Some(KIND_SEARCH) {
        return None;
    }
    let query = Query::parse(context.get(QUERY_KEY)?).ok()?;
    let page = context.get(PAGE_KEY)?.parse().ok().and_then(PageNumber::new)?;
    Some(SearchRequest::new(query, page))
}
