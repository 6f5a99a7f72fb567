//! Source page discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

/// A markdown file found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourcePage {
    /// Page name: path relative to the source directory, without the `.md`
    /// extension, with `/` separators (e.g. "guide/install").
    pub name: String,
    /// Path to the markdown file.
    pub path: PathBuf,
}

/// Collect every `*.md` file under `source_dir`, sorted by page name.
///
/// Hidden files and directories are skipped. Returns an empty Vec if the
/// source directory doesn't exist.
pub(crate) fn scan(source_dir: &Path) -> Vec<SourcePage> {
    let mut pages = Vec::new();
    if source_dir.is_dir() {
        scan_directory(source_dir, "", &mut pages);
    }
    pages.sort_by(|a, b| a.name.cmp(&b.name));
    pages
}

fn scan_directory(dir_path: &Path, prefix: &str, pages: &mut Vec<SourcePage>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        tracing::warn!(dir = %dir_path.display(), "Cannot read source directory");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            scan_directory(&path, &join_name(prefix, &file_name), pages);
        } else if let Some(stem) = file_name.strip_suffix(".md") {
            pages.push(SourcePage {
                name: join_name(prefix, stem),
                path,
            });
        }
    }
}

fn join_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_scan_nested_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("index.md"));
        touch(&dir.path().join("guide/setup.md"));
        touch(&dir.path().join("guide/advanced/tuning.md"));
        touch(&dir.path().join("about.md"));

        let names: Vec<_> = scan(dir.path()).into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["about", "guide/advanced/tuning", "guide/setup", "index"]
        );
    }

    #[test]
    fn test_scan_skips_hidden_and_other_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("page.md"));
        touch(&dir.path().join(".draft.md"));
        touch(&dir.path().join(".git/notes.md"));
        touch(&dir.path().join("image.png"));
        touch(&dir.path().join("README.markdown"));

        let pages = scan(dir.path());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, "page");
        assert_eq!(pages[0].path, dir.path().join("page.md"));
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(&dir.path().join("nope")).is_empty());
    }
}
