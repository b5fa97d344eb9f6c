//! Mapping of raw result fragments to normalized legislative-act records.

use crate::soap::extract::{tag_pattern, tag_value};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const PREVIEW_CHARS: usize = 500;
const DETAIL_URL_BASE: &str = "https://legislatie.just.ro/Public/DetaliiDocument";

static TITLU: LazyLock<Regex> = LazyLock::new(|| tag_pattern("Titlu"));
static NUMAR: LazyLock<Regex> = LazyLock::new(|| tag_pattern("Numar"));
static TIP_ACT: LazyLock<Regex> = LazyLock::new(|| tag_pattern("TipAct"));
static EMITENT: LazyLock<Regex> = LazyLock::new(|| tag_pattern("Emitent"));
static DATA_VIGOARE: LazyLock<Regex> = LazyLock::new(|| tag_pattern("DataVigoare"));
static PUBLICATIE: LazyLock<Regex> = LazyLock::new(|| tag_pattern("Publicatie"));
static TEXT: LazyLock<Regex> = LazyLock::new(|| tag_pattern("Text"));
static LINK: LazyLock<Regex> = LazyLock::new(|| tag_pattern("LinkDetaliiDocument"));

/// One legislative act as returned to API clients.
///
/// Derived entirely from a single upstream fragment; there is no identity
/// beyond what the fragment carries. `id` comes from the trailing path
/// segment of the fragment's detail-page link.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Lege {
    pub id: String,
    pub title: String,
    pub number: String,
    #[serde(rename = "type")]
    pub act_type: String,
    pub issuer: String,
    pub effective_date: String,
    pub publication: String,
    pub text_preview: String,
    pub text_full: String,
    pub url: String,
}

impl Lege {
    /// Build a record from one raw `<a:Lege>` fragment.
    ///
    /// Returns `None` for fragments without a non-empty title; those are
    /// noise rows the upstream occasionally emits.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let title = tag_value(fragment, &TITLU);
        if title.is_empty() {
            return None;
        }

        let id = trailing_segment(&tag_value(fragment, &LINK));
        let url = if id.is_empty() {
            String::new()
        } else {
            format!("{DETAIL_URL_BASE}/{id}")
        };
        let text_full = tag_value(fragment, &TEXT);

        Some(Self {
            id,
            title,
            number: tag_value(fragment, &NUMAR),
            act_type: tag_value(fragment, &TIP_ACT),
            issuer: tag_value(fragment, &EMITENT),
            effective_date: tag_value(fragment, &DATA_VIGOARE),
            publication: tag_value(fragment, &PUBLICATIE),
            text_preview: preview(&text_full),
            text_full,
            url,
        })
    }
}

/// First `PREVIEW_CHARS` characters, char-boundary safe.
fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn trailing_segment(link: &str) -> String {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_owned()
}
