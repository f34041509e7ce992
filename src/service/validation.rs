//! Request validation for bookmark bodies.

use crate::error::AppError;
use crate::model::{BookmarkPatch, NewBookmark};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

pub const MISSING_TITLE: &str = "Missing 'title' in request body";
pub const INVALID_URL: &str = "'url' must be a valid URL";
pub const INVALID_RATING: &str = "'rating' must be an integer between 0 and 5";
pub const INVALID_DESCRIPTION: &str = "'description' must be a string";
pub const EMPTY_PATCH: &str =
    "Request body must contain either 'title','url','rating' or 'description'";

type Check = fn(&Map<String, Value>) -> bool;

/// Creation rules, evaluated in order; the first failing one answers the request.
const CREATE_RULES: &[(Check, &str)] = &[
    (has_title, MISSING_TITLE),
    (has_web_url, INVALID_URL),
    (has_valid_rating, INVALID_RATING),
    (has_valid_description, INVALID_DESCRIPTION),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Check a POST body and extract the creation payload. Unknown keys are ignored.
    pub fn validate_new(body: &Map<String, Value>) -> Result<NewBookmark, AppError> {
        if let Some((_, message)) = CREATE_RULES.iter().find(|(check, _)| !check(body)) {
            return Err(AppError::Validation((*message).to_string()));
        }
        Ok(NewBookmark {
            title: str_field(body, "title").unwrap_or_default().to_string(),
            url: str_field(body, "url").unwrap_or_default().to_string(),
            description: str_field(body, "description").map(str::to_string),
            rating: body.get("rating").and_then(as_rating).unwrap_or_default(),
        })
    }

    /// A PATCH body must name at least one updatable field. Values are not checked.
    pub fn validate_patch(body: &Map<String, Value>) -> Result<BookmarkPatch, AppError> {
        let patch = BookmarkPatch::from_body(body);
        if patch.is_empty() {
            return Err(AppError::Validation(EMPTY_PATCH.to_string()));
        }
        Ok(patch)
    }
}

fn str_field<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn has_title(body: &Map<String, Value>) -> bool {
    str_field(body, "title").is_some_and(|s| !s.is_empty())
}

fn has_web_url(body: &Map<String, Value>) -> bool {
    str_field(body, "url").is_some_and(is_web_uri)
}

fn has_valid_rating(body: &Map<String, Value>) -> bool {
    body.get("rating").and_then(as_rating).is_some()
}

fn has_valid_description(body: &Map<String, Value>) -> bool {
    matches!(body.get("description"), None | Some(Value::Null) | Some(Value::String(_)))
}

/// Integral JSON number in [0, 5]. `3.0` counts as an integer, `"3"` does not.
fn as_rating(v: &Value) -> Option<i32> {
    let n = v.as_f64()?;
    if n.fract() != 0.0 || !(0.0..=5.0).contains(&n) {
        return None;
    }
    Some(n as i32)
}

fn web_uri_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^(?i:https?)://([^\s/?#<>"{}|\\^`]+)([/?#][^\s<>"{}|\\^`]*)?$"#)
            .expect("static regex")
    })
}

fn host_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*$|^\[[0-9A-Fa-f:.]+\]$")
            .expect("static regex")
    })
}

/// Absolute http(s) URL with a syntactically valid host and optional port.
pub fn is_web_uri(s: &str) -> bool {
    let Some(caps) = web_uri_re().captures(s) else {
        return false;
    };
    let authority = caps.get(1).map_or("", |m| m.as_str());
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = match host_port.rfind(':') {
        Some(i) if !host_port.ends_with(']') => {
            let port = &host_port[i + 1..];
            let numeric = !port.is_empty() && port.chars().all(|c| c.is_ascii_digit());
            if !numeric || port.parse::<u16>().is_err() {
                return false;
            }
            &host_port[..i]
        }
        _ => host_port,
    };
    !host.is_empty() && host_re().is_match(host)
}
