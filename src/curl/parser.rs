//! Transfer-command interpreter.
//!
//! Walks the token stream produced by [`tokenize`](crate::curl::tokenizer::tokenize)
//! and populates a [`RequestItem`]. Parsing is deliberately forgiving: every
//! unrecognized or malformed construct degrades into a no-op or a best-effort
//! guess instead of an error, so that commands copied from browsers, docs and
//! scripts import as something usable.

use crate::curl::tokenizer::tokenize;
use crate::models::id::IdGenerator;
use crate::models::request::{
    AuthKind, BodyKind, HttpMethod, KeyValuePair, RawBodyKind, RequestItem,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Errors surfaced to the caller when interpreting a command.
///
/// Malformed flags, bad header formats and unbalanced quotes are handled
/// best-effort inside the interpreter and never reach this type; the only
/// hard failure is an input with nothing to interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input string is empty or contains only whitespace.
    EmptyCommand,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyCommand => write!(f, "Command is empty"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a curl-style command into a canonical request.
///
/// The request id is drawn from the default UUID generator.
///
/// # Examples
///
/// ```
/// use raptor_client::curl::parser::parse_command;
/// use raptor_client::models::{BodyKind, HttpMethod};
///
/// let request = parse_command(r#"curl -d '{"a":1}' http://x"#).unwrap();
/// assert_eq!(request.method, HttpMethod::POST);
/// assert_eq!(request.body.kind, BodyKind::Raw);
/// ```
pub fn parse_command(command: &str) -> Result<RequestItem, ParseError> {
    parse_command_with(command, &crate::models::id::UuidGenerator)
}

/// Like [`parse_command`] but with an explicit id source.
pub fn parse_command_with(
    command: &str,
    ids: &dyn IdGenerator,
) -> Result<RequestItem, ParseError> {
    if command.trim().is_empty() {
        return Err(ParseError::EmptyCommand);
    }

    let tokens = tokenize(command);
    let mut request = RequestItem::with_generator("Imported Request", ids);

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();

        match token {
            "curl" => {}

            "-X" | "--request" => {
                if let Some(value) = tokens.get(i + 1) {
                    i += 1;
                    request.method = HttpMethod::from_str(value);
                }
            }

            "-H" | "--header" => {
                if let Some(header) = tokens.get(i + 1) {
                    i += 1;
                    // Split on the first colon; a missing colon or a colon at
                    // position 0 drops the entry.
                    if let Some(colon) = header.find(':') {
                        if colon > 0 {
                            let key = header[..colon].trim();
                            let value = header[colon + 1..].trim();
                            request.headers.push(KeyValuePair::new(key, value));
                        }
                    }
                }
            }

            "-d" | "--data" | "--data-raw" | "--data-binary" => {
                if let Some(data) = tokens.get(i + 1) {
                    i += 1;
                    request.body.kind = BodyKind::Raw;
                    request.body.raw = data.clone();

                    let trimmed = data.trim();
                    if trimmed.starts_with('{') || trimmed.starts_with('[') {
                        request.body.raw_kind = RawBodyKind::Json;
                    }

                    // curl upgrades GET to POST when a body is supplied
                    if request.method == HttpMethod::GET {
                        request.method = HttpMethod::POST;
                    }
                }
            }

            "--data-urlencode" => {
                if let Some(param) = tokens.get(i + 1) {
                    i += 1;
                    if let Some(eq) = param.find('=') {
                        if eq > 0 {
                            request
                                .body
                                .url_encoded
                                .push(KeyValuePair::new(&param[..eq], &param[eq + 1..]));
                            request.body.kind = BodyKind::UrlEncoded;
                        }
                    }
                    if request.method == HttpMethod::GET {
                        request.method = HttpMethod::POST;
                    }
                }
            }

            "-F" | "--form" => {
                if let Some(field) = tokens.get(i + 1) {
                    i += 1;
                    if let Some(eq) = field.find('=') {
                        if eq > 0 {
                            request
                                .body
                                .form_data
                                .push(KeyValuePair::new(&field[..eq], &field[eq + 1..]));
                            request.body.kind = BodyKind::FormData;
                        }
                    }
                    if request.method == HttpMethod::GET {
                        request.method = HttpMethod::POST;
                    }
                }
            }

            "-u" | "--user" => {
                if let Some(credentials) = tokens.get(i + 1) {
                    i += 1;
                    if let Some(colon) = credentials.find(':') {
                        if colon > 0 {
                            request.auth.kind = AuthKind::Basic;
                            request.auth.basic_username = credentials[..colon].to_string();
                            request.auth.basic_password = credentials[colon + 1..].to_string();
                        }
                    }
                }
            }

            "-A" | "--user-agent" => {
                if let Some(value) = tokens.get(i + 1) {
                    i += 1;
                    request.headers.push(KeyValuePair::new("User-Agent", value));
                }
            }

            "-e" | "--referer" => {
                if let Some(value) = tokens.get(i + 1) {
                    i += 1;
                    request.headers.push(KeyValuePair::new("Referer", value));
                }
            }

            "-b" | "--cookie" => {
                if let Some(value) = tokens.get(i + 1) {
                    i += 1;
                    request.headers.push(KeyValuePair::new("Cookie", value));
                }
            }

            flag if flag.starts_with('-') => {
                // Unrecognized flag. If the next token is neither another flag
                // nor a URL, assume it is this flag's argument and skip it so
                // it cannot be misread as the target URL.
                if let Some(next) = tokens.get(i + 1) {
                    if !next.starts_with('-') && !is_url(next) {
                        i += 1;
                    }
                }
            }

            other if is_url(other) || request.url.is_empty() => {
                request.url = strip_outer_quotes(other).to_string();
            }

            _ => {}
        }

        i += 1;
    }

    extract_embedded_auth(&mut request);
    request.name = display_name(&request);

    Ok(request)
}

/// Moves an embedded `Authorization` header into the auth descriptor.
///
/// `Bearer <token>` becomes Bearer auth; `Basic <base64>` becomes Basic auth
/// when the payload decodes to `user:pass`. A decoding failure leaves the
/// header untouched and the auth unchanged.
fn extract_embedded_auth(request: &mut RequestItem) {
    let position = request
        .headers
        .iter()
        .position(|h| h.key.eq_ignore_ascii_case("Authorization"));

    let Some(position) = position else {
        return;
    };

    let value = request.headers[position].value.trim().to_string();

    // Slice through get(): a multibyte character straddling the prefix
    // boundary yields None instead of panicking.
    if has_prefix(&value, "Bearer ") {
        request.auth.kind = AuthKind::Bearer;
        request.auth.bearer_token = value["Bearer ".len()..].trim().to_string();
        request.headers.remove(position);
    } else if has_prefix(&value, "Basic ") {
        if let Some((username, password)) = decode_basic_credentials(value["Basic ".len()..].trim())
        {
            request.auth.kind = AuthKind::Basic;
            request.auth.basic_username = username;
            request.auth.basic_password = password;
            request.headers.remove(position);
        }
    }
}

/// Case-insensitive ASCII prefix check. A prefix boundary falling inside a
/// multibyte character is simply not a match.
fn has_prefix(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(prefix))
}

/// Decodes a base64 `user:pass` payload. Returns None on any failure: bad
/// base64, non-UTF-8 bytes, or a missing/leading colon.
fn decode_basic_credentials(encoded: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let colon = decoded.find(':')?;
    if colon == 0 {
        return None;
    }
    Some((
        decoded[..colon].to_string(),
        decoded[colon + 1..].to_string(),
    ))
}

/// Derives the display name `"<METHOD> <path-or-/>"` from the request URL,
/// falling back to `"<METHOD> Request"` when the URL does not parse.
fn display_name(request: &RequestItem) -> String {
    match url::Url::parse(&request.url) {
        Ok(parsed) => {
            let path = parsed.path();
            let path = if path.is_empty() { "/" } else { path };
            format!("{} {}", request.method, path)
        }
        Err(_) => format!("{} Request", request.method),
    }
}

fn is_url(token: &str) -> bool {
    let cleaned = strip_outer_quotes(token);
    cleaned.starts_with("http://") || cleaned.starts_with("https://")
}

/// Strips one matching pair of outer single quotes, then one matching pair of
/// outer double quotes.
fn strip_outer_quotes(token: &str) -> &str {
    let stripped = strip_surrounding(token, '\'');
    strip_surrounding(stripped, '"')
}

fn strip_surrounding(s: &str, quote: char) -> &str {
    if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
