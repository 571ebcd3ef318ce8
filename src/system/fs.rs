// src/system/fs.rs

use std::fs::File;
use std::path::{Path, PathBuf};

/// True if `path` names a regular file this process can open for reading.
pub fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

/// Resolves `path` against `cwd` unless it is already absolute.
pub fn make_absolute(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    dunce::simplified(&joined).to_path_buf()
}

/// Reads a whole file, replacing invalid UTF-8 rather than failing on it.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_readable_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("rc");
        std::fs::write(&file, "startup --batch\n").unwrap();

        assert!(is_readable_file(&file));
        assert!(!is_readable_file(dir.path()));
        assert!(!is_readable_file(&dir.path().join("missing")));
    }

    #[test]
    fn test_make_absolute() {
        let cwd = Path::new("/work/dir");
        assert_eq!(make_absolute(Path::new("a/b.rc"), cwd), PathBuf::from("/work/dir/a/b.rc"));
        assert_eq!(make_absolute(Path::new("/etc/b.rc"), cwd), PathBuf::from("/etc/b.rc"));
    }

    #[test]
    fn test_read_lossy_replaces_bad_bytes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("rc");
        std::fs::write(&file, b"build --a\xff\n").unwrap();
        let text = read_lossy(&file).unwrap();
        assert!(text.starts_with("build --a"));
        assert!(text.contains('\u{FFFD}'));
    }
}
