//! Wire-request execution.
//!
//! Performs the network round trip for a built [`WireRequest`] and captures a
//! normalized [`HttpResponse`] with timing and size metrics. Transport-level
//! failures (connection refused, timeout, DNS, TLS) are converted into the
//! status-0 sentinel response rather than propagated, so callers handle
//! failed and successful sends through the same type.

use crate::builder::{self, WireBody, WireRequest};
use crate::models::request::{HttpMethod, RequestItem};
use crate::models::response::HttpResponse;
use crate::variables::Resolver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Connect/read/write timeout applied to every request.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Reason phrases for the statuses a server most commonly returns without
/// one of its own.
fn default_status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    started.elapsed().as_millis() as i64
}

/// Builds and executes a request in one step.
///
/// The clock starts before variable resolution begins, so the reported
/// elapsed time covers building as well as the network round trip, matching
/// what a user perceives between pressing send and seeing the response.
pub fn send(request: &RequestItem, resolver: &Resolver) -> HttpResponse {
    let started = Instant::now();
    let wire = builder::build(request, resolver);
    execute_from(&wire, started)
}

/// Executes an already-built wire request.
pub fn execute(wire: &WireRequest) -> HttpResponse {
    execute_from(wire, Instant::now())
}

/// Dispatches a send on a dedicated background thread, invoking
/// `on_complete` with the captured response.
///
/// Each send owns its thread; there is no pool, no queueing and no
/// cancellation. The resolver snapshot is moved into the thread, so later
/// environment edits cannot race the build.
pub fn dispatch<F>(
    request: RequestItem,
    resolver: Resolver,
    on_complete: F,
) -> std::thread::JoinHandle<()>
where
    F: FnOnce(HttpResponse) + Send + 'static,
{
    std::thread::spawn(move || {
        let response = send(&request, &resolver);
        on_complete(response);
    })
}

fn execute_from(wire: &WireRequest, started: Instant) -> HttpResponse {
    let client = match reqwest::blocking::Client::builder()
        .connect_timeout(TIMEOUT)
        .timeout(TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
    {
        Ok(client) => client,
        Err(err) => return HttpResponse::transport_failure(err, elapsed_ms(started)),
    };

    let method = match wire.method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    };

    let mut request_builder = client.request(method, &wire.url);

    for (name, value) in &wire.headers {
        request_builder = request_builder.header(name.as_str(), value.as_str());
    }

    // The builder computes a body even for GET/HEAD/OPTIONS; the transport
    // drops it for those methods.
    if wire.method.carries_body() {
        request_builder = match &wire.body {
            WireBody::None => request_builder,
            WireBody::Raw {
                content,
                content_type,
            } => request_builder
                .header(reqwest::header::CONTENT_TYPE, *content_type)
                .body(content.clone()),
            WireBody::FormData(pairs) => {
                let mut form = reqwest::blocking::multipart::Form::new();
                for (key, value) in pairs {
                    form = form.text(key.clone(), value.clone());
                }
                request_builder.multipart(form)
            }
            WireBody::UrlEncoded(pairs) => request_builder.form(pairs),
        };
    }

    let response = match request_builder.send() {
        Ok(response) => response,
        Err(err) => {
            log::debug!("{} {} failed: {}", wire.method, wire.url, err);
            return HttpResponse::transport_failure(err, elapsed_ms(started));
        }
    };

    let status = response.status();
    let status_code = status.as_u16();
    let status_text = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| default_status_text(status_code).to_string());

    let mut headers: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(value.to_string());
        }
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/plain")
        .to_string();

    // Reading the body consumes the response; elapsed time is measured after
    // the body is fully read.
    let body = match response.text() {
        Ok(body) => body,
        Err(err) => return HttpResponse::transport_failure(err, elapsed_ms(started)),
    };

    let response_time_ms = elapsed_ms(started);
    let response_size = body.len() as u64;

    HttpResponse {
        status_code,
        status_text,
        headers,
        body,
        content_type,
        response_time_ms,
        response_size,
        timestamp: crate::models::request::now_millis(),
    }
}
