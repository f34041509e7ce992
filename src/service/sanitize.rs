//! Output sanitization: neutralize executable markup in text returned to clients.
//!
//! Whitelisted tags survive with their whitelisted attributes only. Every other
//! tag, and any stray angle bracket, is escaped.

use crate::model::Bookmark;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "img" => &["src", "alt", "title", "width", "height"],
        "b" | "strong" | "em" | "i" | "u" | "p" | "br" | "ul" | "ol" | "li" | "code" | "pre"
        | "blockquote" | "span" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => &[],
        _ => return None,
    };
    Some(attrs)
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)([^<>]*)>").expect("static regex"))
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("static regex")
    })
}

fn escape_brackets(s: &str) -> Cow<'_, str> {
    if s.contains(['<', '>']) {
        Cow::Owned(s.replace('<', "&lt;").replace('>', "&gt;"))
    } else {
        Cow::Borrowed(s)
    }
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(?:#[xX]([0-9A-Fa-f]+)|#([0-9]+)|([A-Za-z]+));?").expect("static regex")
    })
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name.to_ascii_lowercase().as_str() {
        "colon" => ':',
        "tab" => '\t',
        "newline" => '\n',
        "nbsp" => '\u{a0}',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "lt" => '<',
        "gt" => '>',
        "lpar" => '(',
        "rpar" => ')',
        "sol" => '/',
        "semi" => ';',
        _ => return None,
    })
}

/// Decode numeric and common named character references the way a browser
/// would before resolving an attribute value. Unknown names are left as-is.
fn decode_entities(value: &str) -> Cow<'_, str> {
    entity_re().replace_all(value, |caps: &regex::Captures| {
        let decoded = if let Some(hex) = caps.get(1) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = caps.get(2) {
            dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
        } else {
            caps.get(3).and_then(|m| named_entity(m.as_str()))
        };
        match decoded {
            Some(c) => c.to_string(),
            None if caps.get(3).is_some() => caps[0].to_string(),
            None => char::REPLACEMENT_CHARACTER.to_string(),
        }
    })
}

/// `false` for links whose scheme, after entity decoding and dropping
/// whitespace and control characters, is executable.
fn safe_link(value: &str) -> bool {
    let v: String = decode_entities(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    !(v.starts_with("javascript:") || v.starts_with("vbscript:") || v.starts_with("data:"))
}

/// Rebuild a whitelisted tag keeping only permitted attributes.
fn rebuild_tag(closing: bool, name: &str, attrs: &str, allowed: &[&str]) -> String {
    if closing {
        return format!("</{}>", name);
    }
    let self_closing = attrs.trim_end().ends_with('/');
    let mut out = format!("<{}", name);
    for caps in attr_re().captures_iter(attrs) {
        let attr = caps[1].to_ascii_lowercase();
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str());
        match value {
            Some(v) => {
                if (attr == "href" || attr == "src") && !safe_link(v) {
                    continue;
                }
                out.push_str(&format!(" {}=\"{}\"", attr, v.replace('"', "&quot;")));
            }
            None => out.push_str(&format!(" {}", attr)),
        }
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}

/// Strip executable markup from `input`.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in tag_re().captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_brackets(&input[last..whole.start()]));
        let name = caps[2].to_ascii_lowercase();
        match allowed_attributes(&name) {
            Some(allowed) => out.push_str(&rebuild_tag(!caps[1].is_empty(), &name, &caps[3], allowed)),
            None => out.push_str(&escape_brackets(whole.as_str())),
        }
        last = whole.end();
    }
    out.push_str(&escape_brackets(&input[last..]));
    out
}

/// Copy of `bookmark` with display text sanitized. Storage keeps the raw values.
pub fn sanitize_bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        title: sanitize(&bookmark.title),
        description: bookmark.description.as_deref().map(sanitize),
        ..bookmark
    }
}
