//! Tolerant tag extraction over raw SOAP response bodies.
//!
//! This is deliberately NOT an XML parser. Upstream responses are not
//! reliably schema-conformant, so the contract here is bounded pattern
//! extraction: find a named tag regardless of namespace prefix or case,
//! take its inner text, and treat absence as an empty value. Strict
//! tokenizers reject exactly the bodies this service has to live with.

use regex::Regex;
use std::sync::LazyLock;

static GET_TOKEN_RESULT: LazyLock<Regex> = LazyLock::new(|| tag_pattern("GetTokenResult"));
static LEGE: LazyLock<Regex> = LazyLock::new(|| tag_pattern("Lege"));

/// Pattern matching `<prefix:Name ...>inner</prefix:Name>` with any (or no)
/// namespace prefix, case-insensitively, dot matching newlines.
pub fn tag_pattern(name: &str) -> Regex {
    Regex::new(&format!(
        r"(?is)<(?:[\w.-]+:)?{name}\b[^>]*>(.*?)</(?:[\w.-]+:)?{name}\s*>"
    ))
    .unwrap()
}

/// Inner text of the first match of `re`, entity-unescaped and trimmed.
/// Absent tag (including self-closing "nil" markers) yields "".
pub fn tag_value(fragment: &str, re: &Regex) -> String {
    re.captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str().trim()))
        .unwrap_or_default()
}

/// The opaque token out of a GetToken response body, if present.
pub fn token_result(body: &str) -> Option<String> {
    let token = tag_value(body, &GET_TOKEN_RESULT);
    if token.is_empty() { None } else { Some(token) }
}

/// Lazy iterator over the repeating `<a:Lege>` result fragments.
pub fn lege_fragments(body: &str) -> impl Iterator<Item = &str> {
    LEGE.captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Reverse of the escaping applied on the way out. `&amp;` last so already
/// unescaped entities are not double-expanded.
pub fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_result_found_regardless_of_prefix_and_case() {
        let body = "<s:Envelope><s:Body><GetTokenResponse>\
                    <gettokenresult>abc-123</gettokenresult>\
                    </GetTokenResponse></s:Body></s:Envelope>";
        assert_eq!(token_result(body).as_deref(), Some("abc-123"));

        let prefixed = "<x:GetTokenResult> tok </x:GetTokenResult>";
        assert_eq!(token_result(prefixed).as_deref(), Some("tok"));
    }

    #[test]
    fn token_result_absent_or_empty_is_none() {
        assert_eq!(token_result("<Fault>boom</Fault>"), None);
        assert_eq!(token_result("<GetTokenResult></GetTokenResult>"), None);
        assert_eq!(token_result("<GetTokenResult/>"), None);
    }

    #[test]
    fn fragments_split_on_repeating_element() {
        let body = "<a:Legi>\
                    <a:Lege><a:Titlu>one</a:Titlu></a:Lege>\
                    <a:Lege><a:Titlu>two</a:Titlu></a:Lege>\
                    </a:Legi>";
        let frags: Vec<&str> = lege_fragments(body).collect();
        assert_eq!(frags.len(), 2);
        assert!(frags[0].contains("one"));
        assert!(frags[1].contains("two"));
    }

    #[test]
    fn lege_does_not_match_longer_element_names() {
        let body = "<a:LegeModel><a:Titlu>nope</a:Titlu></a:LegeModel>";
        assert_eq!(lege_fragments(body).count(), 0);
    }

    #[test]
    fn tag_value_unescapes_entities() {
        let re = tag_pattern("Titlu");
        let fragment = "<a:Titlu>Codul &amp; legea &lt;I&gt;</a:Titlu>";
        assert_eq!(tag_value(fragment, &re), "Codul & legea <I>");
    }

    #[test]
    fn tag_value_spans_newlines() {
        let re = tag_pattern("Text");
        let fragment = "<a:Text>line one\nline two</a:Text>";
        assert_eq!(tag_value(fragment, &re), "line one\nline two");
    }

    #[test]
    fn missing_tag_is_empty_string() {
        let re = tag_pattern("Emitent");
        assert_eq!(tag_value("<a:Titlu>x</a:Titlu>", &re), "");
    }
}
