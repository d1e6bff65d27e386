//! HTTP Client
//!
//! Outbound request plumbing shared by the proxy, the page loaders and
//! the CLI.
//!
//! - [`Fetch`]: pluggable transport (network or in-process router)
//! - [`fetch_json`]: one request, JSON decode, typed error on non-2xx
//! - [`ApiClient`]: base-URL-bound convenience wrapper

mod fetch;
mod http;

pub use fetch::{Fetch, FetchError, FetchRequest, FetchResponse, LocalFetch, ReqwestFetch};
pub use http::{fetch_json, join_url, path_segment, ApiClient, ClientError, RequestOptions};
