//! Raptor Client core library
//!
//! The engine behind the Raptor HTTP client: imports curl commands, stores
//! them in a collection, resolves environment variables and executes the
//! resulting requests. The embedding UI layer owns windows and editors and
//! calls into this crate for everything else.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Canonical request, body, auth, folder and response shapes
//! - **curl**: Tokenizer and interpreter for pasted curl commands
//! - **variables**: `{{name}}` template resolution over environment snapshots
//! - **environment**: Shared store of named variable environments
//! - **builder**: Pure assembly of a wire-ready request from a model + resolver
//! - **executor**: Blocking HTTP execution and per-send background dispatch
//! - **collection**: Folder/request/draft storage with listeners and persistence
//! - **session**: Tracking of which requests have an open editor
//!
//! # The send pipeline
//!
//! Sending a request is a fixed pipeline:
//! 1. Take a [`variables::Resolver`] snapshot from the
//!    [`environment::EnvironmentStore`]
//! 2. [`builder::build`] the [`models::RequestItem`] into a
//!    [`builder::WireRequest`] (pure, no I/O)
//! 3. [`executor::execute`] the wire request, capturing an
//!    [`models::HttpResponse`] with timing and size metrics
//!
//! Transport failures never surface as errors: they become a response with
//! status code 0 so the UI renders every outcome the same way.
//! [`executor::dispatch`] runs the whole pipeline on a background thread,
//! one thread per send.
//!
//! # Importing curl commands
//!
//! ```
//! use raptor_client::curl::parse_command;
//! use raptor_client::models::HttpMethod;
//!
//! let request = parse_command(
//!     "curl -X POST https://api.example.com/users -H 'Content-Type: application/json' -d '{\"name\":\"ada\"}'",
//! )
//! .unwrap();
//!
//! assert_eq!(request.method, HttpMethod::POST);
//! assert_eq!(request.url, "https://api.example.com/users");
//! assert_eq!(request.name, "POST /users");
//! ```

pub mod builder;
pub mod collection;
pub mod curl;
pub mod environment;
pub mod executor;
pub mod models;
pub mod session;
pub mod variables;
