//! Spreadsheet share-link handling.
//!
//! Merchants paste whatever URL their browser shows (`/edit#gid=0`,
//! `/edit?usp=sharing`, `/view`). All of them carry the document id after a
//! `spreadsheets/d/` segment, which is enough to build the CSV export URL.

use regex::Regex;
use reqwest::Url;

use crate::error::ImportError;

fn sheet_path_regex() -> Regex {
    Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").expect("valid regex")
}

fn invalid(url: &str, reason: impl Into<String>) -> ImportError {
    ImportError::InvalidUrl {
        url: url.to_owned(),
        reason: reason.into(),
    }
}

fn parse_http_url(sheet_url: &str) -> Result<Url, ImportError> {
    let trimmed = sheet_url.trim();
    if trimmed.is_empty() {
        return Err(invalid(sheet_url, "URL is empty"));
    }
    let url = Url::parse(trimmed).map_err(|e| invalid(sheet_url, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            sheet_url,
            format!("unsupported scheme \"{}\"", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(sheet_url, "URL has no host"));
    }
    Ok(url)
}

/// Extracts the spreadsheet document id from a share URL.
///
/// Given `"https://docs.google.com/spreadsheets/d/1AbC-x_9/edit#gid=0"`,
/// returns `"1AbC-x_9"`.
///
/// # Errors
///
/// Returns [`ImportError::InvalidUrl`] when the input is not an absolute
/// http(s) URL or has no `spreadsheets/d/<id>` path segment.
pub fn extract_sheet_id(sheet_url: &str) -> Result<String, ImportError> {
    let url = parse_http_url(sheet_url)?;
    sheet_path_regex()
        .captures(url.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| invalid(sheet_url, "no spreadsheets/d/<id> segment in path"))
}

/// Builds the CSV export URL for a spreadsheet share link.
///
/// Scheme, host, and port of the input are preserved, so
/// `https://docs.google.com/spreadsheets/d/<id>/edit` maps to
/// `https://docs.google.com/spreadsheets/d/<id>/export?format=csv`.
/// A tab selected with `gid` (in the fragment or query) is carried over.
///
/// # Errors
///
/// Same as [`extract_sheet_id`].
pub fn csv_export_url(sheet_url: &str) -> Result<String, ImportError> {
    let url = parse_http_url(sheet_url)?;
    let re = sheet_path_regex();
    let caps = re
        .captures(url.path())
        .ok_or_else(|| invalid(sheet_url, "no spreadsheets/d/<id> segment in path"))?;
    let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
        return Err(invalid(sheet_url, "no spreadsheets/d/<id> segment in path"));
    };
    let prefix = &url.path()[..whole.start()];

    let mut export = url.clone();
    export.set_fragment(None);
    export.set_query(None);
    export.set_path(&format!("{prefix}/spreadsheets/d/{}/export", id.as_str()));
    {
        let mut query = export.query_pairs_mut();
        query.append_pair("format", "csv");
        if let Some(gid) = selected_gid(&url) {
            query.append_pair("gid", &gid);
        }
    }
    Ok(export.to_string())
}

/// Reads the tab id from `?gid=` or `#gid=`. Non-numeric values are ignored.
fn selected_gid(url: &Url) -> Option<String> {
    let from_query = url
        .query_pairs()
        .find(|(k, _)| k == "gid")
        .map(|(_, v)| v.into_owned());
    let from_fragment = || {
        url.fragment()?
            .split('&')
            .find_map(|part| part.strip_prefix("gid="))
            .map(ToOwned::to_owned)
    };
    from_query
        .or_else(from_fragment)
        .filter(|gid| !gid.is_empty() && gid.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
#[path = "sheet_url_test.rs"]
mod tests;
