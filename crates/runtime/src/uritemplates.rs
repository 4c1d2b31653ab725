//! Simple string expansion of URI templates
//!
//! Only `{var}` expressions are supported, which is all the api reference
//! uses. Values are percent-encoded except for unreserved characters.

use crate::error::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Expand `{var}` expressions of `template` with the values `lookup` finds
///
/// An undefined variable expands to the empty string.
///
/// # Examples
/// ```
/// use lolgen_runtime::uritemplates::expand;
///
/// let url = expand("/summoner/by-name/{summonerNames}", |name| {
///     (name == "summonerNames").then(|| "Riot Schmick".to_string())
/// })
/// .unwrap();
/// assert_eq!(url, "/summoner/by-name/Riot%20Schmick");
/// ```
pub fn expand<F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| invalid(template, "unclosed expression"))?;
        let name = &after[..close];

        if name.is_empty() {
            return Err(invalid(template, "empty expression"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err(invalid(template, &format!("unsupported expression {{{name}}}")));
        }

        if let Some(value) = lookup(name) {
            out.extend(utf8_percent_encode(&value, UNRESERVED));
        }
        rest = &after[close + 1..];
    }

    if rest.contains('}') {
        return Err(invalid(template, "unmatched '}'"));
    }
    out.push_str(rest);
    Ok(out)
}

fn invalid(template: &str, reason: &str) -> Error {
    Error::UriTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
