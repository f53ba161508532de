//! Document tree walking.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Files under `root` with the given extension, as `(relative, absolute)`
/// pairs sorted by relative path. Relative paths use `/` separators.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn collect_files(root: &Path, extension: &str) -> io::Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    walk_dir(root, root, extension, &mut files)?;
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn walk_dir(
    base: &Path,
    current: &Path,
    extension: &str,
    files: &mut Vec<(String, PathBuf)>,
) -> io::Result<()> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir(base, &path, extension, files)?;
        } else if path.extension().is_some_and(|ext| ext == extension)
            && let Ok(relative) = path.strip_prefix(base)
        {
            let relative = relative.to_string_lossy().replace('\\', "/");
            files.push((relative, path));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collect_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/c")).unwrap();
        fs::write(dir.path().join("z.html"), "").unwrap();
        fs::write(dir.path().join("b/c/d.html"), "").unwrap();
        fs::write(dir.path().join("b/notes.txt"), "").unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();

        let files = collect_files(dir.path(), "html").unwrap();
        let relative: Vec<_> = files.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(relative, vec!["a.html", "b/c/d.html", "z.html"]);
        assert_eq!(files[1].1, dir.path().join("b/c/d.html"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_files(&dir.path().join("missing"), "md").is_err());
    }
}
