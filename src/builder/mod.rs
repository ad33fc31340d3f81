//! Wire-request construction.
//!
//! Deterministically turns a canonical [`RequestItem`] plus a resolver
//! snapshot into a concrete, placeholder-free wire request. This is a pure
//! function of its inputs: no I/O happens here, and the same request and
//! snapshot always produce the same wire request.

use crate::models::request::{ApiKeyLocation, AuthKind, BodyKind, HttpMethod, RequestItem};
use crate::variables::Resolver;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use url::form_urlencoded;

/// Body payload of a built wire request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireBody {
    /// No payload (also used for the unsupported Binary kind).
    None,
    /// Raw text with the media type derived from the declared subtype.
    Raw {
        content: String,
        content_type: &'static str,
    },
    /// Multipart form fields, one per enabled non-blank pair.
    FormData(Vec<(String, String)>),
    /// Form-encoded pairs.
    UrlEncoded(Vec<(String, String)>),
}

/// A fully resolved, ready-to-send HTTP request.
///
/// Headers, URL and body are concrete; no `{{placeholder}}` spans remain
/// except those that had no value in the active environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Ordered header list. Duplicate names are legal and preserved.
    pub headers: Vec<(String, String)>,
    pub body: WireBody,
}

/// Builds a wire request from a canonical request and a variable snapshot.
///
/// Steps run in fixed order: resolve the base URL, merge enabled query
/// parameters, append query-placed API-key auth, add enabled headers in
/// stored order, append the auth-derived header, and encode the body for the
/// active kind. The body is computed even for methods that carry none on the
/// wire (GET, HEAD, OPTIONS) so it can be inspected; the executor skips it
/// there.
///
/// When a user header and an auth-derived header share a name, both are
/// emitted. HTTP permits repeated headers and silently overwriting the
/// user's entry would hide what was sent.
pub fn build(request: &RequestItem, resolver: &Resolver) -> WireRequest {
    WireRequest {
        method: request.method,
        url: build_url(request, resolver),
        headers: build_headers(request, resolver),
        body: build_body(request, resolver),
    }
}

fn build_url(request: &RequestItem, resolver: &Resolver) -> String {
    let mut url = resolver.resolve(&request.url);

    let enabled_params: Vec<_> = request
        .params
        .iter()
        .filter(|p| p.enabled && !p.key.trim().is_empty())
        .collect();

    if !enabled_params.is_empty() {
        let query = enabled_params
            .iter()
            .map(|p| {
                format!(
                    "{}={}",
                    url_encode(&resolver.resolve(&p.key)),
                    url_encode(&resolver.resolve(&p.value))
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        url = append_query(url, &query);
    }

    // Query-placed API-key auth runs after parameter merging so it always
    // lands at the end of the query string.
    if request.auth.kind == AuthKind::ApiKey
        && request.auth.api_key_location == ApiKeyLocation::Query
    {
        let key = resolver.resolve(&request.auth.api_key_name);
        let value = resolver.resolve(&request.auth.api_key_value);
        url = append_query(url, &format!("{}={}", key, value));
    }

    url
}

fn append_query(url: String, query: &str) -> String {
    if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}

fn url_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn build_headers(request: &RequestItem, resolver: &Resolver) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .filter(|h| h.enabled && !h.key.trim().is_empty())
        .map(|h| (resolver.resolve(&h.key), resolver.resolve(&h.value)))
        .collect();

    match request.auth.kind {
        AuthKind::Bearer => {
            let token = resolver.resolve(&request.auth.bearer_token);
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        AuthKind::Basic => {
            let username = resolver.resolve(&request.auth.basic_username);
            let password = resolver.resolve(&request.auth.basic_password);
            let credentials = STANDARD.encode(format!("{}:{}", username, password));
            headers.push(("Authorization".to_string(), format!("Basic {}", credentials)));
        }
        AuthKind::ApiKey => {
            if request.auth.api_key_location == ApiKeyLocation::Header {
                headers.push((
                    resolver.resolve(&request.auth.api_key_name),
                    resolver.resolve(&request.auth.api_key_value),
                ));
            }
        }
        AuthKind::None => {}
    }

    headers
}

fn build_body(request: &RequestItem, resolver: &Resolver) -> WireBody {
    match request.body.kind {
        BodyKind::None | BodyKind::Binary => WireBody::None,
        BodyKind::Raw => WireBody::Raw {
            content: resolver.resolve(&request.body.raw),
            content_type: request.body.raw_kind.content_type(),
        },
        BodyKind::FormData => WireBody::FormData(resolve_pairs(&request.body.form_data, resolver)),
        BodyKind::UrlEncoded => {
            WireBody::UrlEncoded(resolve_pairs(&request.body.url_encoded, resolver))
        }
    }
}

fn resolve_pairs(
    pairs: &[crate::models::request::KeyValuePair],
    resolver: &Resolver,
) -> Vec<(String, String)> {
    pairs
        .iter()
        .filter(|p| p.enabled && !p.key.trim().is_empty())
        .map(|p| (resolver.resolve(&p.key), resolver.resolve(&p.value)))
        .collect()
}
