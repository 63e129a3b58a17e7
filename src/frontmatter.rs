//! Front-matter parsing and serialization.
//!
//! A document opens with a header fenced by `---` lines, followed by the
//! body:
//!
//! ```text
//! ---
//! layout: post
//! title: Deploying with Caddy
//! date: 2024-08-08 10:00:00 +0800
//! categories: deployment caddy
//! ---
//! Body text, never interpreted here.
//! ```
//!
//! Header lines are `key: value` pairs, split on the first `:`. `title` and
//! `date` are required; `categories` is a whitespace-separated token list,
//! possibly empty; unknown keys are preserved as opaque strings rather than
//! rejected. [`parse`] and [`serialize`] are pure functions and inverses of
//! each other over parsed metadata, so round-trips are testable.

use crate::document::FrontMatter;
use crate::error::MetadataError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

/// Header fence, on its own line before and after the metadata block.
pub const DELIMITER: &str = "---";

/// Recognized header field names.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const DATE: &str = "date";
    pub const CATEGORIES: &str = "categories";
    pub const LAYOUT: &str = "layout";
}

// ============================================================================
// Parsing
// ============================================================================

/// Split a raw document into parsed front-matter and the remaining body.
///
/// Pure function of the input text. The body is returned exactly as written
/// after the closing delimiter line; an empty body is valid.
///
/// # Errors
///
/// Fails when the opening delimiter is missing, the header is never closed,
/// a header line has no `key: value` shape, a required field (`title`,
/// `date`) is absent, or the date does not parse as a calendar date.
pub fn parse(raw: &str) -> Result<(FrontMatter, String), MetadataError> {
    let Some(first_end) = raw.find('\n') else {
        // A lone delimiter line opens a header that never closes.
        return Err(if trimmed(raw) == DELIMITER {
            MetadataError::UnterminatedHeader
        } else {
            MetadataError::MissingHeader
        });
    };
    if trimmed(&raw[..first_end]) != DELIMITER {
        return Err(MetadataError::MissingHeader);
    }

    // Scan for the closing delimiter, collecting header lines on the way.
    let mut pos = first_end + 1;
    let mut line_no = 1usize;
    let mut header: Vec<(usize, &str)> = Vec::new();
    let mut body_start = None;

    while pos < raw.len() {
        let (line_end, next) = match raw[pos..].find('\n') {
            Some(i) => (pos + i, pos + i + 1),
            None => (raw.len(), raw.len()),
        };
        line_no += 1;
        let line = raw[pos..line_end].trim_end_matches('\r');
        if line.trim() == DELIMITER {
            body_start = Some(next);
            break;
        }
        header.push((line_no, line));
        pos = next;
    }

    let body_start = body_start.ok_or(MetadataError::UnterminatedHeader)?;
    let meta = parse_header(&header)?;
    Ok((meta, raw[body_start..].to_owned()))
}

/// Extract typed fields from collected header lines.
fn parse_header(header: &[(usize, &str)]) -> Result<FrontMatter, MetadataError> {
    let mut title = None;
    let mut date = None;
    let mut categories = Vec::new();
    let mut layout = None;
    let mut extras = BTreeMap::new();

    for &(line_no, line) in header {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(MetadataError::InvalidLine(line_no));
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(MetadataError::InvalidLine(line_no));
        }
        match key {
            fields::TITLE => title = Some(value.to_owned()),
            fields::DATE => date = Some(value.to_owned()),
            fields::CATEGORIES => categories = split_categories(value),
            fields::LAYOUT => layout = (!value.is_empty()).then(|| value.to_owned()),
            _ => {
                extras.insert(key.to_owned(), value.to_owned());
            }
        }
    }

    let title = title.ok_or(MetadataError::MissingField(fields::TITLE))?;
    let date = date.ok_or(MetadataError::MissingField(fields::DATE))?;
    let published_at = parse_date(&date).ok_or(MetadataError::InvalidDate(date))?;

    Ok(FrontMatter {
        title,
        published_at,
        categories,
        layout,
        extras,
    })
}

/// Split a whitespace-separated category list, dropping duplicates.
/// First occurrence wins.
fn split_categories(value: &str) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for token in value.split_whitespace() {
        if !categories.iter().any(|c| c == token) {
            categories.push(token.to_owned());
        }
    }
    categories
}

/// Parse the accepted date shapes.
///
/// | Shape | Example |
/// |-------|---------|
/// | date | `2024-01-25` |
/// | datetime | `2024-01-25 10:00:00` or `2024-01-25T10:00:00` |
/// | datetime + offset | `2024-01-25 10:00:00 +0800` (normalized to UTC) |
fn parse_date(value: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%z"];

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime);
        }
    }
    for format in OFFSET_FORMATS {
        if let Ok(datetime) = DateTime::parse_from_str(value, format) {
            return Some(datetime.naive_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Strip a trailing carriage return, then surrounding whitespace.
fn trimmed(line: &str) -> &str {
    line.trim_end_matches('\r').trim()
}

// ============================================================================
// Serialization
// ============================================================================

/// Render front-matter back to header text.
///
/// The output opens and closes with the delimiter and maps back to an equal
/// [`FrontMatter`] through [`parse`] (given an empty body). A midnight
/// timestamp serializes as a bare date.
pub fn serialize(meta: &FrontMatter) -> String {
    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    if let Some(layout) = &meta.layout {
        out.push_str(&format!("{}: {layout}\n", fields::LAYOUT));
    }
    out.push_str(&format!("{}: {}\n", fields::TITLE, meta.title));
    let date = if meta.published_at.time() == NaiveTime::MIN {
        meta.published_at.format("%Y-%m-%d")
    } else {
        meta.published_at.format("%Y-%m-%d %H:%M:%S")
    };
    out.push_str(&format!("{}: {date}\n", fields::DATE));
    if !meta.categories.is_empty() {
        out.push_str(&format!(
            "{}: {}\n",
            fields::CATEGORIES,
            meta.categories.join(" ")
        ));
    }
    for (key, value) in &meta.extras {
        out.push_str(&format!("{key}: {value}\n"));
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out
}
