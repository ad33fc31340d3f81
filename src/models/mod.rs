//! Data models for requests, responses, and collection items.
//!
//! This module contains the core data structures used throughout the client
//! for representing canonical requests, captured responses, and the folders
//! that organize them.

pub mod folder;
pub mod id;
pub mod request;
pub mod response;

pub use folder::FolderItem;
pub use id::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use request::{
    ApiKeyLocation, AuthConfig, AuthKind, BodyKind, HttpMethod, KeyValuePair, RawBodyKind,
    RequestBody, RequestItem,
};
pub use response::HttpResponse;
