//! Discovery of syntax-tree export files.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One discovered export: the path on disk plus the identity the
/// record set will use for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AstFile {
    pub path: PathBuf,
    pub file_id: String,
}

/// Walk `input_dir` for `*.json` exports. The file_id is the
/// input-relative path with `/` separators and the `.json` suffix
/// stripped, so `exports/src/a.ts.json` identifies file `src/a.ts`.
pub fn discover(input_dir: &Path) -> Vec<AstFile> {
    let mut files: Vec<AstFile> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("skipping unreadable directory entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .map(|entry| AstFile {
            file_id: file_id_for(input_dir, entry.path()),
            path: entry.into_path(),
        })
        .collect();

    // Deterministic processing and record order.
    files.sort();
    files
}

fn file_id_for(input_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(input_dir).unwrap_or(path);
    let mut id = relative.to_string_lossy().replace('\\', "/");
    if let Some(stripped) = id.strip_suffix(".json") {
        id = stripped.to_string();
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn finds_json_exports_and_derives_file_ids() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/services")).unwrap();
        fs::write(root.join("src/app.ts.json"), "{}").unwrap();
        fs::write(root.join("src/services/auth.ts.json"), "{}").unwrap();
        fs::write(root.join("notes.txt"), "not an export").unwrap();

        let files = discover(root);
        let ids: Vec<&str> = files.iter().map(|f| f.file_id.as_str()).collect();
        assert_eq!(ids, vec!["src/app.ts", "src/services/auth.ts"]);
        assert!(files[0].path.ends_with("src/app.ts.json"));
    }

    #[test]
    fn empty_directory_yields_no_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_empty());
    }
}
