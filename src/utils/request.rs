use axum::{
    extract::Query,
    http::{header::HeaderName, request::Parts, HeaderMap, Request, Uri},
};
use std::collections::HashMap;

pub const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// What the template selectors need to know about an incoming request.
pub trait PaginationRequest {
    /// Whether the request was issued by client-side script.
    fn is_ajax(&self) -> bool;

    fn query_param(&self, name: &str) -> Option<String>;
}

pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(&X_REQUESTED_WITH)
        .and_then(|header| header.to_str().ok())
        .map(|value| value == XML_HTTP_REQUEST)
        .unwrap_or(false)
}

/// Reads `name` from the URI query string. A repeated parameter keeps its last value.
pub fn query_param(uri: &Uri, name: &str) -> Option<String> {
    Query::<HashMap<String, String>>::try_from_uri(uri)
        .ok()
        .and_then(|Query(mut params)| params.remove(name))
}

impl PaginationRequest for Parts {
    fn is_ajax(&self) -> bool {
        is_ajax(&self.headers)
    }

    fn query_param(&self, name: &str) -> Option<String> {
        query_param(&self.uri, name)
    }
}

impl<B> PaginationRequest for Request<B> {
    fn is_ajax(&self) -> bool {
        is_ajax(self.headers())
    }

    fn query_param(&self, name: &str) -> Option<String> {
        query_param(self.uri(), name)
    }
}

impl<T: PaginationRequest + ?Sized> PaginationRequest for &T {
    fn is_ajax(&self) -> bool {
        (**self).is_ajax()
    }

    fn query_param(&self, name: &str) -> Option<String> {
        (**self).query_param(name)
    }
}
