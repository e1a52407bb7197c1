//! Remote catalog download
//!
//! Google Sheets links are rewritten into a CSV export of one worksheet;
//! any other URL is expected to serve CSV directly. Failures are reported
//! once, without retry.

use super::spreadsheet::read_csv_rows;
use crate::error::{IdMatchError, Result};
use regex::Regex;
use reqwest::header::{HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::path::Path;

const USER_AGENT_VALUE: &str = concat!("laptop-id/", env!("CARGO_PKG_VERSION"));

lazy_static::lazy_static! {
    static ref SHEET_ID_RE: Regex =
        Regex::new(r"docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)").unwrap();
}

#[derive(Deserialize)]
struct TokenFile {
    access_token: String,
}

/// URL actually requested for a catalog locator.
pub fn export_url(url: &str, worksheet: &str) -> Result<reqwest::Url> {
    let parsed = match SHEET_ID_RE.captures(url) {
        Some(caps) => reqwest::Url::parse_with_params(
            &format!("https://docs.google.com/spreadsheets/d/{}/gviz/tq", &caps[1]),
            &[("tqx", "out:csv"), ("sheet", worksheet)],
        ),
        None => reqwest::Url::parse(url),
    };
    parsed.map_err(|e| IdMatchError::SourceUnavailable(format!("{}: {}", url, e)))
}

/// Bearer token from a credentials file: `{"access_token": ...}` or plain text.
pub fn read_token(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        IdMatchError::SourceUnavailable(format!("credentials {}: {}", path.display(), e))
    })?;

    let token = match serde_json::from_str::<TokenFile>(&content) {
        Ok(file) => file.access_token,
        Err(_) => content.trim().to_string(),
    };
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(IdMatchError::SourceUnavailable(format!(
            "credentials {}: no access token",
            path.display()
        )));
    }
    Ok(token)
}

/// Downloads the catalog as raw CSV rows.
pub async fn fetch_rows(
    url: &str,
    worksheet: &str,
    credentials: Option<&Path>,
) -> Result<Vec<Vec<String>>> {
    let target = export_url(url, worksheet)?;
    let token = credentials.map(read_token).transpose()?;

    tracing::info!(url = %target, worksheet, "fetching remote catalog");

    let client = reqwest::Client::new();
    let mut request = client
        .get(target.clone())
        .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|e| IdMatchError::SourceUnavailable(format!("{}: {}", target, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IdMatchError::SourceUnavailable(format!(
            "{}: HTTP {}",
            target, status
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| IdMatchError::SourceUnavailable(format!("{}: {}", target, e)))?;

    read_csv_rows(body.as_ref())
        .map_err(|e| IdMatchError::SourceUnavailable(format!("{}: {}", target, e)))
}
