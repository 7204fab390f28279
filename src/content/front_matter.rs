//! Splitting and validating the YAML header of a stored post.
//!
//! The header is deserialized loosely first, then mapped field by field into a
//! [`ContentRecord`]. Anything missing or malformed rejects the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::models::record::ContentRecord;
use crate::rendering::text::reading_time;

const FENCE: &str = "---";

/// The header exactly as authored. Every key is optional here; required keys
/// are enforced by [`parse_record`].
#[derive(Debug, Default, Deserialize)]
struct RawFrontMatter {
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    author: Option<String>,
    tags: Option<Vec<String>>,
    category: Option<String>,
    featured: Option<bool>,
    #[serde(rename = "readingTime", alias = "reading_time")]
    reading_time: Option<i64>,
    image: Option<String>,
}

#[derive(Serialize)]
struct FrontMatterOut<'a> {
    title: &'a str,
    description: &'a str,
    date: String,
    author: &'a str,
    tags: &'a [String],
    category: &'a str,
    featured: bool,
    #[serde(rename = "readingTime")]
    reading_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
}

/// Split `raw` into its YAML header and markdown body.
///
/// The first line must be `---`; the header ends at the next `---` line.
pub fn split_front_matter(raw: &str) -> Result<(&str, &str), RecordError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');

    let first = lines.next().ok_or(RecordError::MissingFrontMatter)?;
    if first.trim_end() != FENCE {
        return Err(RecordError::MissingFrontMatter);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Ok((&raw[start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(RecordError::UnterminatedFrontMatter)
}

/// Parse a publication date: `YYYY-MM-DD`, RFC 3339, or a naive
/// `YYYY-MM-DD[T ]HH:MM:SS` taken as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, RecordError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(RecordError::MissingField(field))
}

/// Trim tags, drop blank ones and remove case-insensitive duplicates,
/// keeping the first spelling.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let key = tag.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            out.push(tag.to_string());
        }
    }
    out
}

/// Parse and validate the stored text of one post.
///
/// `words_per_minute` is used only when the header has no reading time.
pub fn parse_record(
    slug: &str,
    raw: &str,
    words_per_minute: u32,
) -> Result<ContentRecord, RecordError> {
    let (header, body) = split_front_matter(raw)?;
    let front: RawFrontMatter = if header.trim().is_empty() {
        RawFrontMatter::default()
    } else {
        serde_yaml::from_str(header)?
    };

    let title = required(front.title, "title")?;
    let description = required(front.description, "description")?;
    let date_raw = required(front.date, "date")?;
    let author = required(front.author, "author")?;
    let tags = front.tags.ok_or(RecordError::MissingField("tags"))?;
    let category = required(front.category, "category")?;

    let date = parse_date(&date_raw).ok_or_else(|| RecordError::InvalidField {
        field: "date",
        reason: format!("'{}' is not an ISO-8601 date", date_raw),
    })?;

    let reading_time = match front.reading_time {
        Some(minutes) if minutes >= 1 => {
            u32::try_from(minutes).map_err(|_| RecordError::InvalidField {
                field: "readingTime",
                reason: format!("{} minutes is out of range", minutes),
            })?
        }
        Some(minutes) => {
            return Err(RecordError::InvalidField {
                field: "readingTime",
                reason: format!("expected a positive number of minutes, got {}", minutes),
            })
        }
        None => reading_time(body, words_per_minute),
    };

    let image = front
        .image
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty());

    Ok(ContentRecord {
        slug: slug.to_string(),
        title,
        description,
        date,
        author,
        tags: normalize_tags(tags),
        category,
        featured: front.featured.unwrap_or(false),
        reading_time,
        image,
        body: body.to_string(),
    })
}

/// Like [`parse_record`] for raw bytes from a store.
pub fn parse_bytes(
    slug: &str,
    bytes: &[u8],
    words_per_minute: u32,
) -> Result<ContentRecord, RecordError> {
    let raw = std::str::from_utf8(bytes).map_err(|_| RecordError::Encoding)?;
    parse_record(slug, raw, words_per_minute)
}

/// Serialize a record back into the stored text format.
///
/// The reading time is always written out, so parsing the result yields an
/// equal record.
pub fn write_record(record: &ContentRecord) -> Result<String, RecordError> {
    let date = if record.date.num_seconds_from_midnight() == 0 && record.date.nanosecond() == 0 {
        record.date.format("%Y-%m-%d").to_string()
    } else {
        record.date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    };

    let header = serde_yaml::to_string(&FrontMatterOut {
        title: &record.title,
        description: &record.description,
        date,
        author: &record.author,
        tags: &record.tags,
        category: &record.category,
        featured: record.featured,
        reading_time: record.reading_time,
        image: record.image.as_deref(),
    })?;

    Ok(format!("{FENCE}\n{header}{FENCE}\n{}", record.body))
}
