//! Filesystem boundary: collect raw source texts for a load.
//!
//! The core never reads files itself; this module is the thin collaborator
//! that walks a content directory and hands raw texts to
//! [`ContentStore::load`](crate::ContentStore::load). Hosts that fetch
//! documents some other way can skip it entirely and construct
//! [`SourceText`] values directly.

use crate::config::ContentConfig;
use crate::document::SourceText;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Walk the content directory and read every recognized document.
///
/// Files are matched by extension (case-insensitive), nested directories
/// included, in filename order. Identifiers come from [`derive_id`].
///
/// # Errors
///
/// Fails on the first I/O error, with the offending path in the context.
/// Parse errors are not this module's concern; they surface later, from
/// `load`, aggregated across all documents.
pub fn collect_sources(config: &ContentConfig) -> Result<Vec<SourceText>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(&config.content).sort_by_file_name() {
        let entry = entry.with_context(|| {
            format!(
                "failed to walk content directory `{}`",
                config.content.display()
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_recognized_extension(path, config) {
            continue;
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        sources.push(SourceText {
            id: derive_id(path),
            raw,
        });
    }

    debug!(
        count = sources.len(),
        content = %config.content.display(),
        "collected sources"
    );
    Ok(sources)
}

fn has_recognized_extension(path: &Path, config: &ContentConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            config
                .extensions
                .iter()
                .any(|recognized| recognized.eq_ignore_ascii_case(ext))
        })
}

/// Derive a stable document identifier from a source path.
///
/// The file stem is slugified after stripping a `YYYY-MM-DD-` date prefix,
/// the common post-filename convention:
/// `2024-08-08-Deploying with Caddy.md` becomes `deploying-with-caddy`.
pub fn derive_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    slug::slugify(strip_date_prefix(&stem))
}

/// Strip a leading `YYYY-MM-DD-` prefix if present.
fn strip_date_prefix(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    let is_date_prefix = bytes.len() > 11
        && bytes[..11]
            .iter()
            .enumerate()
            .all(|(i, &b)| match i {
                4 | 7 | 10 => b == b'-',
                _ => b.is_ascii_digit(),
            });
    if is_date_prefix { &stem[11..] } else { stem }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write(dir: &Path, name: &str, contents: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn config_for(dir: &Path) -> ContentConfig {
        ContentConfig {
            content: dir.to_path_buf(),
            ..ContentConfig::default()
        }
    }

    #[test]
    fn test_derive_id_strips_date_prefix() {
        let id = derive_id(Path::new("posts/2024-08-08-deploying-with-caddy.md"));
        assert_eq!(id, "deploying-with-caddy");
    }

    #[test]
    fn test_derive_id_without_date_prefix() {
        assert_eq!(derive_id(Path::new("about.md")), "about");
    }

    #[test]
    fn test_derive_id_slugifies() {
        assert_eq!(
            derive_id(Path::new("2024-01-25-Python Performance!.md")),
            "python-performance"
        );
    }

    #[test]
    fn test_strip_date_prefix_requires_full_shape() {
        // Too short, wrong separators, or non-digits: left alone.
        assert_eq!(strip_date_prefix("2024-08-08"), "2024-08-08");
        assert_eq!(strip_date_prefix("2024_08_08-post"), "2024_08_08-post");
        assert_eq!(strip_date_prefix("not-a-date-post"), "not-a-date-post");
        assert_eq!(strip_date_prefix("2024-08-08-post"), "post");
    }

    #[test]
    fn test_collect_sources_filters_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "2024-01-25-python-perf.md",
            "---\ntitle: Python Perf\ndate: 2024-01-25\n---\n",
        );
        write(
            dir.path(),
            "nested/2024-08-08-caddy.markdown",
            "---\ntitle: Caddy\ndate: 2024-08-08\n---\n",
        );
        write(dir.path(), "notes.txt", "not a document");
        write(dir.path(), "no-extension", "also not a document");

        let sources = collect_sources(&config_for(dir.path())).unwrap();
        let mut ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["caddy", "python-perf"]);
    }

    #[test]
    fn test_collect_sources_case_insensitive_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "shouting.MD",
            "---\ntitle: Loud\ndate: 2024-01-01\n---\n",
        );
        let sources = collect_sources(&config_for(dir.path())).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].id, "shouting");
    }

    #[test]
    fn test_collect_sources_missing_directory_fails_with_path() {
        let config = config_for(&PathBuf::from("/nonexistent/folio-content"));
        let err = collect_sources(&config).unwrap_err();
        assert!(format!("{err:#}").contains("folio-content"));
    }

    #[test]
    fn test_collect_sources_feeds_store() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "2024-08-08-caddy.md",
            "---\ntitle: Caddy\ndate: 2024-08-08\ncategories: deployment caddy\n---\nBody\n",
        );

        let sources = collect_sources(&config_for(dir.path())).unwrap();
        let store = crate::ContentStore::new();
        let snapshot = store.load(sources).unwrap();
        let document = snapshot.get("caddy").unwrap();
        assert_eq!(document.meta.title, "Caddy");
        assert_eq!(document.body, "Body\n");
    }
}
