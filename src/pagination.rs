//! Page requests from `page`/`per_page` query parameters and the matching
//! `X-Total-Count`/`Link` response headers.
//!
//! `page` is 1-based on the wire and 0-based in [`PageRequest`].

use crate::repository::{Page, PageRequest};
use axum::http::{header::LINK, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_OFFSET: u32 = 1;
pub const MIN_OFFSET: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
pub const X_TOTAL_PAGES: HeaderName = HeaderName::from_static("x-total-pages");

/// Query string of list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size, at most 100.
    pub per_page: Option<i64>,
}

impl PageParams {
    /// Effective (page, per_page) after defaults and bounds.
    pub fn normalized(&self) -> (u32, u32) {
        let page = match self.page {
            Some(p) if p >= MIN_OFFSET as i64 => p.min(u32::MAX as i64) as u32,
            _ => DEFAULT_OFFSET,
        };
        let per_page = match self.per_page {
            Some(l) if l >= 1 && l <= MAX_LIMIT as i64 => l as u32,
            _ => DEFAULT_LIMIT,
        };
        (page, per_page)
    }
}

pub fn generate_page_request(params: &PageParams) -> PageRequest {
    let (page, per_page) = params.normalized();
    PageRequest::new(page - 1, per_page)
}

pub fn generate_pagination_headers<T>(page: &Page<T>, base_url: &str, params: &PageParams) -> HeaderMap {
    let (offset, limit) = params.normalized();
    let link_to = |n: u32, rel: &str| format!("<{}?page={}&per_page={}>; rel=\"{}\"", base_url, n, limit, rel);

    let mut links = Vec::with_capacity(4);
    if offset < page.total_pages {
        links.push(link_to(offset + 1, "next"));
    }
    if offset > 1 {
        links.push(link_to(offset - 1, "prev"));
    }
    links.push(link_to(page.total_pages, "last"));
    links.push(link_to(1, "first"));

    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(page.total_elements));
    headers.insert(X_TOTAL_PAGES, HeaderValue::from(page.total_pages));
    if let Ok(v) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(LINK, v);
    }
    headers
}
