// src/utils/url.rs

//! Station URL validation and helpers.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{AppError, Result};

/// Host serving the station status pages.
pub const STATION_HOST: &str = "danskretursystem.dk";

/// Path prefix every station page lives under.
pub const STATION_PATH_PREFIX: &str = "/pantstation/";

/// Validate a station page URL and normalize it to end with `/`.
///
/// # Examples
/// ```
/// use pantstation::utils::url::normalize_station_url;
///
/// assert_eq!(
///     normalize_station_url(" https://danskretursystem.dk/pantstation/odense ").unwrap(),
///     "https://danskretursystem.dk/pantstation/odense/"
/// );
/// assert!(normalize_station_url("http://danskretursystem.dk/pantstation/odense/").is_err());
/// ```
pub fn normalize_station_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_url(raw, "URL is empty"));
    }

    let mut parsed = Url::parse(trimmed).map_err(|e| AppError::invalid_url(trimmed, e))?;

    if parsed.scheme() != "https" {
        return Err(AppError::invalid_url(trimmed, "scheme must be https"));
    }
    if parsed.host_str() != Some(STATION_HOST) {
        return Err(AppError::invalid_url(
            trimmed,
            format!("host must be {STATION_HOST}"),
        ));
    }
    if parsed.port().is_some() || !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(AppError::invalid_url(
            trimmed,
            "URL must not carry a port or credentials",
        ));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(AppError::invalid_url(
            trimmed,
            "URL must not carry a query or fragment",
        ));
    }
    if !parsed.path().starts_with(STATION_PATH_PREFIX) {
        return Err(AppError::invalid_url(
            trimmed,
            format!("path must start with {STATION_PATH_PREFIX}"),
        ));
    }

    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }

    Ok(parsed.to_string())
}

/// Build a stable identifier for a station from its URL, falling back to its name.
///
/// The last non-empty path segment is percent-decoded and lowercased, Danish
/// letters are transliterated and every other run of non-alphanumeric
/// characters becomes `_`.
pub fn station_slug(url: &str, name: &str) -> String {
    let segment = Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path_segments()?
            .rev()
            .find(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
    });
    slugify(segment.as_deref().unwrap_or(name))
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let mapped = match c {
            'æ' => "ae",
            'ø' => "o",
            'å' => "a",
            _ if c.is_ascii_alphanumeric() => {
                if pending_separator && !slug.is_empty() {
                    slug.push('_');
                }
                pending_separator = false;
                slug.push(c);
                continue;
            }
            _ => {
                pending_separator = true;
                continue;
            }
        };
        if pending_separator && !slug.is_empty() {
            slug.push('_');
        }
        pending_separator = false;
        slug.push_str(mapped);
    }

    slug
}
