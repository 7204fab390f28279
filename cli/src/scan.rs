use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio::content::front_matter::parse_bytes;
use folio::models::record::ContentRecord;
use folio::rendering::text::DEFAULT_WORDS_PER_MINUTE;
use folio::storage::client::{is_valid_slug, CONTENT_EXTENSIONS};
use serde::Serialize;
use walkdir::WalkDir;

/// Outcome of reading one file from the content directory.
pub type Entry = Result<ContentRecord, Problem>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub path: PathBuf,
    pub slug: String,
    pub field: Option<String>,
    pub message: String,
}

/// Position of the file's extension in the server's lookup order.
fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    CONTENT_EXTENSIONS.iter().position(|e| *e == ext)
}

fn slug_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Read and parse every post directly inside `dir`, in file name order.
///
/// Subdirectories are ignored, matching what the server serves. When several
/// files share a slug, the one the server would read is validated and the
/// others are reported as duplicates.
pub fn scan_dir(dir: &Path) -> Result<Vec<Entry>> {
    let mut files = Vec::new();
    for item in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let item = item.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !item.file_type().is_file() {
            continue;
        }
        if let Some(rank) = extension_rank(item.path()) {
            files.push((item.path().to_path_buf(), rank));
        }
    }

    let mut owners: HashMap<String, (PathBuf, usize)> = HashMap::new();
    for (path, rank) in &files {
        let slug = slug_of(path);
        let replace = owners
            .get(&slug)
            .map(|(_, owner_rank)| rank < owner_rank)
            .unwrap_or(true);
        if replace {
            owners.insert(slug, (path.clone(), *rank));
        }
    }

    let mut entries = Vec::with_capacity(files.len());
    for (path, _) in files {
        let slug = slug_of(&path);

        let problem = |field: Option<&str>, message: String| Problem {
            path: path.clone(),
            slug: slug.clone(),
            field: field.map(str::to_string),
            message,
        };

        let owner = owners.get(&slug).map(|(p, _)| p);
        let entry = if !is_valid_slug(&slug) {
            Err(problem(
                None,
                "file name is not a valid slug (letters, digits, '-' and '_')".to_string(),
            ))
        } else if let Some(owner) = owner.filter(|owner| **owner != path) {
            Err(problem(
                None,
                format!("duplicate slug, shadowed by {}", owner.display()),
            ))
        } else {
            let bytes =
                std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            parse_bytes(&slug, &bytes, DEFAULT_WORDS_PER_MINUTE)
                .map_err(|e| problem(e.field(), e.to_string()))
        };

        entries.push(entry);
    }

    Ok(entries)
}

/// The records that parsed successfully.
pub fn valid_records(entries: Vec<Entry>) -> Vec<ContentRecord> {
    entries.into_iter().filter_map(|e| e.ok()).collect()
}
