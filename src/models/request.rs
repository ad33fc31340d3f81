//! Canonical request data models.
//!
//! This module defines the structured, protocol-agnostic representation of an
//! HTTP request used throughout the client: the method, ordered header and
//! query-parameter lists, the tagged body variant, and the auth descriptor.

use super::id::IdGenerator;
use serde::{Deserialize, Serialize};

/// HTTP request method.
///
/// The subset of RFC 7231 / RFC 5789 methods exposed in the request editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    #[default]
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    /// Parses a string into an HttpMethod, case-insensitively.
    ///
    /// Unknown method names fall back to `GET` so that imported commands with
    /// exotic methods still produce a usable request.
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "GET" => HttpMethod::GET,
            "POST" => HttpMethod::POST,
            "PUT" => HttpMethod::PUT,
            "DELETE" => HttpMethod::DELETE,
            "PATCH" => HttpMethod::PATCH,
            "HEAD" => HttpMethod::HEAD,
            "OPTIONS" => HttpMethod::OPTIONS,
            _ => HttpMethod::GET,
        }
    }

    /// Whether the method conventionally carries a request body on the wire.
    pub fn carries_body(&self) -> bool {
        !matches!(
            self,
            HttpMethod::GET | HttpMethod::HEAD | HttpMethod::OPTIONS
        )
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in an ordered header or query-parameter list.
///
/// Order is preserved because duplicate keys are legal in HTTP and must
/// round-trip; `enabled` lets an entry exist but be excluded from the built
/// request without deleting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
    pub enabled: bool,
    #[serde(default)]
    pub description: String,
}

impl KeyValuePair {
    /// Creates an enabled pair with an empty description.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
            description: String::new(),
        }
    }
}

/// Declared subtype of a raw body, mapping to a concrete media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RawBodyKind {
    #[default]
    Json,
    Xml,
    Text,
    Html,
    JavaScript,
}

impl RawBodyKind {
    /// Returns the media type used when the raw body is sent.
    pub fn content_type(&self) -> &'static str {
        match self {
            RawBodyKind::Json => "application/json",
            RawBodyKind::Xml => "application/xml",
            RawBodyKind::Text => "text/plain",
            RawBodyKind::Html => "text/html",
            RawBodyKind::JavaScript => "application/javascript",
        }
    }
}

/// Payload encoding strategy for a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BodyKind {
    #[default]
    None,
    Raw,
    FormData,
    UrlEncoded,
    /// Opaque payload; the builder never produces a wire body for it.
    Binary,
}

/// Request body holding the data of every variant at once.
///
/// `kind` selects the active variant. Switching kinds does not discard the
/// data held by inactive variants, so a user can flip between them without
/// losing edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestBody {
    pub kind: BodyKind,
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub raw_kind: RawBodyKind,
    #[serde(default)]
    pub form_data: Vec<KeyValuePair>,
    #[serde(default)]
    pub url_encoded: Vec<KeyValuePair>,
}

/// How credentials are attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthKind {
    #[default]
    None,
    Bearer,
    Basic,
    ApiKey,
}

/// Where an API-key credential is placed in the built request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ApiKeyLocation {
    #[default]
    Header,
    Query,
}

/// Auth descriptor for a request.
///
/// Fields belonging to inactive kinds may hold stale data from earlier edits;
/// the builder only reads the fields of the active `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    pub kind: AuthKind,
    #[serde(default)]
    pub bearer_token: String,
    #[serde(default)]
    pub basic_username: String,
    #[serde(default)]
    pub basic_password: String,
    #[serde(default)]
    pub api_key_name: String,
    #[serde(default)]
    pub api_key_value: String,
    #[serde(default)]
    pub api_key_location: ApiKeyLocation,
}

impl AuthConfig {
    /// Creates a Bearer descriptor with the given token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            kind: AuthKind::Bearer,
            bearer_token: token.into(),
            ..Self::default()
        }
    }

    /// Creates a Basic descriptor with the given credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            kind: AuthKind::Basic,
            basic_username: username.into(),
            basic_password: password.into(),
            ..Self::default()
        }
    }

    /// Creates an ApiKey descriptor.
    pub fn api_key(
        name: impl Into<String>,
        value: impl Into<String>,
        location: ApiKeyLocation,
    ) -> Self {
        Self {
            kind: AuthKind::ApiKey,
            api_key_name: name.into(),
            api_key_value: value.into(),
            api_key_location: location,
            ..Self::default()
        }
    }
}

/// Current time as epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A saved request definition.
///
/// The URL, header values, query values and raw body text may contain
/// `{{variable}}` placeholders that are resolved against the active
/// environment when the request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    /// Stable identifier used by the collection store and the editor session.
    pub id: String,

    /// Display name shown in the collection tree.
    pub name: String,

    pub method: HttpMethod,

    pub url: String,

    /// Ordered query parameters merged into the URL at build time.
    #[serde(default)]
    pub params: Vec<KeyValuePair>,

    /// Ordered request headers.
    #[serde(default)]
    pub headers: Vec<KeyValuePair>,

    #[serde(default)]
    pub body: RequestBody,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Stored but not interpreted by this crate.
    #[serde(default)]
    pub pre_request_script: String,

    /// Stored but not interpreted by this crate.
    #[serde(default)]
    pub test_script: String,

    /// Owning folder id, or None when the request lives at the root.
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Creation time, epoch milliseconds.
    pub created_at: i64,

    /// Last modification time, epoch milliseconds.
    pub updated_at: i64,
}

impl RequestItem {
    /// Creates a request with defaults (GET, empty URL, no body, no auth)
    /// and a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_generator(name, &super::id::UuidGenerator)
    }

    /// Creates a request with defaults, drawing the id from `ids`.
    pub fn with_generator(name: impl Into<String>, ids: &dyn IdGenerator) -> Self {
        let now = now_millis();
        Self {
            id: ids.generate(),
            name: name.into(),
            method: HttpMethod::GET,
            url: String::new(),
            params: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::default(),
            auth: AuthConfig::default(),
            pre_request_script: String::new(),
            test_script: String::new(),
            parent_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the request as modified now.
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    /// Returns a copy with a fresh id, a "(Copy)" name suffix and fresh
    /// timestamps. The parent folder is preserved.
    pub fn duplicate(&self) -> Self {
        self.duplicate_with(&super::id::UuidGenerator)
    }

    /// Like [`duplicate`](Self::duplicate) but with an explicit id source.
    pub fn duplicate_with(&self, ids: &dyn IdGenerator) -> Self {
        let now = now_millis();
        Self {
            id: ids.generate(),
            name: format!("{} (Copy)", self.name),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

impl Default for RequestItem {
    fn default() -> Self {
        Self::new("New Request")
    }
}
