//! Input file discovery.
//!
//! Finds candidate MassLynx exports under a root directory by extension.
//! Results are sorted so runs over the same tree are reproducible.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

/// Default extension of MassLynx ASCII exports.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Whether `path` has the given extension (case-insensitive, without the dot).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// List files under `root` with the given extension.
///
/// Without `recursive` only direct children are considered. Symbolic links
/// are followed in both modes. Entries that cannot be read while walking,
/// including link loops, are skipped with a warning.
pub fn discover_input_files(
    root: &Path,
    recursive: bool,
    extension: &str,
) -> io::Result<Vec<PathBuf>> {
    let mut files = if recursive {
        walk_recursive(root, extension)
    } else {
        list_directory(root, extension)?
    };

    files.sort();
    debug!(
        "Discovered {} .{} file(s) under {}",
        files.len(),
        extension,
        root.display()
    );
    Ok(files)
}

fn list_directory(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }
    Ok(files)
}

fn walk_recursive(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extension))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn test_flat_and_recursive_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b.txt"));
        touch(&root.join("a.TXT"));
        touch(&root.join("notes.md"));
        fs::create_dir(root.join("nested")).unwrap();
        touch(&root.join("nested").join("c.txt"));
        fs::create_dir(root.join("folder.txt")).unwrap();

        let flat = discover_input_files(root, false, "txt").unwrap();
        assert_eq!(flat, vec![root.join("a.TXT"), root.join("b.txt")]);

        let deep = discover_input_files(root, true, "txt").unwrap();
        assert_eq!(
            deep,
            vec![
                root.join("a.TXT"),
                root.join("b.txt"),
                root.join("nested").join("c.txt"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_found_in_both_modes() {
        let store = tempfile::tempdir().unwrap();
        let target = store.path().join("export.txt");
        touch(&target);

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::os::unix::fs::symlink(&target, root.join("link.txt")).unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        std::os::unix::fs::symlink(&target, root.join("nested").join("deep.txt")).unwrap();

        let flat = discover_input_files(root, false, "txt").unwrap();
        assert_eq!(flat, vec![root.join("link.txt")]);

        let deep = discover_input_files(root, true, "txt").unwrap();
        assert_eq!(
            deep,
            vec![root.join("link.txt"), root.join("nested").join("deep.txt")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a.txt"));
        fs::create_dir(root.join("nested")).unwrap();
        std::os::unix::fs::symlink(root, root.join("nested").join("back")).unwrap();

        let deep = discover_input_files(root, true, "txt").unwrap();
        assert_eq!(deep, vec![root.join("a.txt")]);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_input_files(&dir.path().join("absent"), false, "txt").is_err());
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("x/run.Txt"), "txt"));
        assert!(!has_extension(Path::new("x/run.txt.bak"), "txt"));
        assert!(!has_extension(Path::new("x/txt"), "txt"));
    }
}
