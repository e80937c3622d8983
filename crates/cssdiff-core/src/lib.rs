//! Stylesheet loading and class-diff pipeline for cssdiff.
//!
//! # Scope
//!
//! This crate provides:
//! - **Configuration** - an explicit per-run settings value (no global state)
//! - **Input Acquisition** - stylesheet text from a file path or HTTP(S) URL
//! - **Class Pipeline** - load, parse, and extract one stylesheet's class set
//! - **Set-Diff Engine** - classes present in From but absent from To
//!
//! The pipeline is single-threaded and single-shot: the two stylesheet loads
//! are independent, run sequentially, and share nothing until the final diff,
//! which is a pure computation over two materialized class sets. Rendering
//! the result is the front end's job; this crate never prints.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::time::Duration;

use cssdiff_css::{parse_css_text, stylesheet_classes};
use serde::Serialize;
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Output verbosity for the command-line front end.
///
/// Display policy only: it gates what the caller prints and never affects
/// the computed diff. Parses ASCII-case-insensitively from `quiet`,
/// `normal`, or `loud`. Levels are ordered: `Quiet < Normal < Loud`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verbosity {
    /// Print only the removed class names.
    Quiet,
    /// Also print the version banner and summary lines.
    #[default]
    Normal,
    /// Additionally report fetch progress and parse errors.
    Loud,
}

/// Settings for one diff run, passed explicitly into the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// First stylesheet location (file path or URL). Classes that disappear
    /// from here are reported.
    pub from: String,
    /// Second stylesheet location (file path or URL).
    pub to: String,
    /// Output verbosity (display policy only; does not affect the result).
    pub verbosity: Verbosity,
}

/// Error type for stylesheet loading.
///
/// A distinct kind from parse errors: a stylesheet that fails to load never
/// reaches the parser, while parse errors ride along inside a
/// [`ClassReport`] next to whatever still parsed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read a local file.
    #[error("failed to read '{path}': {source}")]
    File {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to fetch a URL.
    #[error("failed to fetch '{url}': {message}")]
    Network {
        /// The URL that could not be fetched.
        url: String,
        /// What went wrong with the request.
        message: String,
    },
}

/// The classes extracted from one stylesheet, plus the parse errors the
/// document produced on the way.
///
/// Partial-success policy: parse errors never discard the rule sets that did
/// parse, so `classes` and `parse_errors` can both be non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
    /// Deduplicated class names in first-occurrence order.
    pub classes: Vec<String>,
    /// Non-fatal parse-error messages for this document.
    pub parse_errors: Vec<String>,
}

/// The outcome of one diff run.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    /// Classes present in From but absent from To, in ordinal order.
    pub removed: Vec<String>,
    /// Parse errors from the From stylesheet.
    pub from_errors: Vec<String>,
    /// Parse errors from the To stylesheet.
    pub to_errors: Vec<String>,
}

/// Recognized URL schemes for remote stylesheets.
const URL_SCHEMES: &[&str] = &["http://", "https://"];

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a location names a remote stylesheet rather than a local file.
///
/// Scheme prefix comparison is ASCII case-insensitive: `HTTP://...` counts.
#[must_use]
pub fn is_url(location: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| {
        location
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Load raw stylesheet text from a file path or URL.
///
/// # Errors
///
/// Returns [`LoadError::File`] when a local path cannot be read, or
/// [`LoadError::Network`] when a URL cannot be fetched.
pub fn load_stylesheet_text(location: &str) -> Result<String, LoadError> {
    if is_url(location) {
        fetch_url(location)
    } else {
        fs::read_to_string(location).map_err(|source| LoadError::File {
            path: location.to_owned(),
            source,
        })
    }
}

/// Fetch stylesheet text from a URL.
fn fetch_url(url: &str) -> Result<String, LoadError> {
    let network_error = |message: String| LoadError::Network {
        url: url.to_owned(),
        message,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| network_error(format!("failed to create HTTP client: {e}")))?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(|e| network_error(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(network_error(format!("HTTP error: {}", response.status())));
    }

    response
        .text()
        .map_err(|e| network_error(format!("failed to read response body: {e}")))
}

/// Parse stylesheet text and extract its deduplicated class set.
///
/// Parse failures never abort the report: whatever parsed contributes
/// classes, and the error messages ride alongside for the caller's
/// verbosity policy.
#[must_use]
pub fn classes_from_text(css: &str) -> ClassReport {
    let output = parse_css_text(css);
    ClassReport {
        classes: stylesheet_classes(&output.stylesheet),
        parse_errors: output.errors,
    }
}

/// Load one stylesheet and extract its class set.
///
/// # Errors
///
/// Propagates the [`LoadError`]; extraction is never run on a stylesheet
/// that failed to load.
pub fn load_classes(location: &str) -> Result<ClassReport, LoadError> {
    let css = load_stylesheet_text(location)?;
    Ok(classes_from_text(&css))
}

/// Classes present in `from_classes` but absent from `to_classes`, sorted
/// ascending by ordinal code-point comparison (not locale-aware: `Zebra`
/// sorts before `apple`).
///
/// Pure and failure-free. The inputs are already deduplicated, so the
/// output carries no duplicates; it is empty when From's classes are a
/// subset of To's.
#[must_use]
pub fn diff(from_classes: &[String], to_classes: &[String]) -> Vec<String> {
    let to: HashSet<&str> = to_classes.iter().map(String::as_str).collect();

    let mut removed: Vec<String> = from_classes
        .iter()
        .filter(|class| !to.contains(class.as_str()))
        .cloned()
        .collect();
    removed.sort_unstable();
    removed
}

/// Run the whole pipeline for a configuration: load both stylesheets,
/// extract their class sets, and diff them.
///
/// The two loads run sequentially and share no state until the final diff.
/// `config.verbosity` does not affect the computed report.
///
/// # Errors
///
/// Propagates the first [`LoadError`]; the diff is never computed over a
/// stylesheet that failed to load.
pub fn run(config: &Config) -> Result<DiffReport, LoadError> {
    let from = load_classes(&config.from)?;
    let to = load_classes(&config.to)?;

    let removed = diff(&from.classes, &to.classes);

    Ok(DiffReport {
        removed,
        from_errors: from.parse_errors,
        to_errors: to.parse_errors,
    })
}
