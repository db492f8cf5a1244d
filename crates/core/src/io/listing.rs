//! Directory listing restricted to raster file extensions

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Whether `path` has one of `extensions`, compared case-insensitively.
///
/// Extensions are given without the leading dot (`"png"`, `"jpg"`).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
}

/// List regular files in `dir` whose extension is in `extensions`.
///
/// The result is sorted by file name so that processing order does not
/// depend on the order the filesystem returns entries in.
pub fn list_rasters<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match_ignores_case() {
        let exts = ["png", "jpg"];
        assert!(has_extension(Path::new("a/frame_0001.PNG"), &exts));
        assert!(has_extension(Path::new("b.Jpg"), &exts));
        assert!(!has_extension(Path::new("c.jpeg"), &exts));
        assert!(!has_extension(Path::new("no_extension"), &exts));
    }

    #[test]
    fn test_listing_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "c.txt", "d.tiff"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = list_rasters(dir.path(), &["png", "jpg"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
    }
}
