//! Placeholder substitution engine.
//!
//! Opens the template archive, rewrites every slide part, optionally stores
//! the logo asset, and re-serializes the container. Substitution across
//! slide parts is a scatter-gather: each part is transformed on its own
//! blocking task and all results are joined before serialization.

use std::sync::Arc;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::common::{build_output_name, format_ordinal_date};
use super::{GeneratedDeck, TemplateError, TemplateParams};
use crate::archive::PptxArchive;

pub const COMPANY_TOKEN: &str = "{{COMPANY_NAME}}";
pub const DATE_TOKEN: &str = "{{DATE_LONG}}";
pub const LOGO_TOKEN: &str = "{{LOGO}}";

/// Where the logo blob is stored. The asset is not wired into any slide
/// relationship; `{{LOGO}}` is only stripped from slide text. Full embedding
/// would require OOXML relationship-part editing, which this service does
/// not do.
pub const LOGO_PART_PATH: &str = "ppt/media/logo.png";

lazy_static! {
    static ref SLIDE_PART_RE: Regex = Regex::new(r"^ppt/slides/slide[0-9]+\.xml$").unwrap();
}

/// Generate a finished deck from template bytes and request values.
pub async fn generate(
    template: &[u8],
    company_name: &str,
    date: NaiveDate,
    logo: Option<Vec<u8>>,
) -> Result<GeneratedDeck, TemplateError> {
    let date_long = format_ordinal_date(date);
    let params = TemplateParams {
        company_name: company_name.trim().to_string(),
        date_long: date_long.clone(),
        logo,
    };

    let bytes = process(template, &params).await?;

    Ok(GeneratedDeck {
        filename: build_output_name(company_name, date),
        bytes,
        date_long,
    })
}

/// Apply `params` to the template archive and return the output bytes.
///
/// Any failure aborts the whole request; a partially substituted deck is
/// never produced.
pub async fn process(template: &[u8], params: &TemplateParams) -> Result<Vec<u8>, TemplateError> {
    let mut archive = PptxArchive::open(template)?;

    let slide_paths = archive.matching_paths(&SLIDE_PART_RE);
    if slide_paths.is_empty() {
        log::warn!(
            "template has no parts matching ppt/slides/slideN.xml; slide text will be unchanged"
        );
    } else {
        log::debug!("substituting placeholders in {} slide part(s)", slide_paths.len());
    }

    // Read and decode every slide up front so an unreadable part fails the
    // request before any task runs.
    let mut sources = Vec::with_capacity(slide_paths.len());
    for path in slide_paths {
        let text = archive.read_text(&path)?;
        sources.push((path, text));
    }

    let shared = Arc::new(params.clone());
    let tasks: Vec<_> = sources
        .into_iter()
        .map(|(path, text)| {
            let params = Arc::clone(&shared);
            tokio::task::spawn_blocking(move || {
                let replaced = substitute_tokens(&text, &params.company_name, &params.date_long);
                (path, replaced)
            })
        })
        .collect();

    for task in tasks {
        let (path, replaced) = task
            .await
            .map_err(|e| TemplateError::TaskJoin(e.to_string()))?;
        archive.write_part(&path, replaced.into_bytes());
    }

    if let Some(logo) = &params.logo {
        archive.write_part(LOGO_PART_PATH, logo.clone());
    }

    Ok(archive.serialize()?)
}

/// Single-pass literal replacement of the three tokens.
///
/// Replacement values are emitted verbatim and never re-scanned, so a
/// company name containing a `{{...}}` sequence passes through unchanged.
pub fn substitute_tokens(text: &str, company_name: &str, date_long: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(at) = rest.find("{{") {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];

        if tail.starts_with(COMPANY_TOKEN) {
            out.push_str(company_name);
            rest = &tail[COMPANY_TOKEN.len()..];
        } else if tail.starts_with(DATE_TOKEN) {
            out.push_str(date_long);
            rest = &tail[DATE_TOKEN.len()..];
        } else if tail.starts_with(LOGO_TOKEN) {
            // Layout marker only; always stripped.
            rest = &tail[LOGO_TOKEN.len()..];
        } else {
            out.push_str("{{");
            rest = &tail[2..];
        }
    }

    out.push_str(rest);
    out
}
