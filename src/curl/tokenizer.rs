//! Shell-style tokenizer for transfer commands.
//!
//! Splits a command line into tokens on unquoted whitespace, honoring single
//! quotes, double quotes, and backslash escapes. Line continuations
//! (backslash followed by a newline) are normalized to a space before the
//! scan so multi-line commands pasted from a terminal tokenize the same as
//! single-line ones.

/// Tokenizes a command string.
///
/// Rules, applied left to right:
/// - a backslash outside single quotes escapes the following character,
///   which is appended literally whatever it is;
/// - a single quote toggles single-quote mode unless inside double quotes;
/// - a double quote toggles double-quote mode unless inside single quotes;
/// - whitespace outside both quote modes flushes the current token.
///
/// Unbalanced quotes are not an error: the scan simply runs to the end with
/// the mode flag still set. This matches the best-effort parsing policy used
/// by the command interpreter.
///
/// # Examples
///
/// ```
/// use raptor_client::curl::tokenizer::tokenize;
///
/// let tokens = tokenize("curl -X POST 'http://a.com/x y'");
/// assert_eq!(tokens, vec!["curl", "-X", "POST", "http://a.com/x y"]);
/// ```
pub fn tokenize(command: &str) -> Vec<String> {
    let normalized = command
        .replace("\\\r\n", " ")
        .replace("\\\n", " ");
    let normalized = normalized.trim();

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_pending = false;

    for ch in normalized.chars() {
        if escape_pending {
            current.push(ch);
            escape_pending = false;
            continue;
        }

        match ch {
            '\\' if !in_single_quote => {
                escape_pending = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            c if c.is_whitespace() && !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
