use super::{DirEntry, FileSystem, FileType};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).context(format!("Failed to read file {:?}", path))?;
        // Sources are not required to be UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Immediate children of `path`. Hidden entries and anything matched by
    /// the repository's ignore files are skipped.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !path.is_dir() {
            anyhow::bail!("Failed to read directory {:?}: not a directory", path);
        }

        let mut result = Vec::new();
        for entry in WalkBuilder::new(path).max_depth(Some(1)).build() {
            let entry = entry.context(format!("Failed to read directory {:?}", path))?;
            if entry.depth() == 0 {
                continue;
            }

            // Links are classified by what they point at; dangling ones stay symlinks.
            let file_type = if entry.path().is_dir() {
                FileType::Directory
            } else if entry.path().is_file() {
                FileType::File
            } else {
                FileType::Symlink
            };
            result.push(DirEntry {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().to_string(),
                file_type,
            });
        }
        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("figures")).unwrap();
        fs::File::create(base.join("paper.tex"))
            .unwrap()
            .write_all(b"\\documentclass{article}")
            .unwrap();
        fs::File::create(base.join("figures/plot.gpi"))
            .unwrap()
            .write_all(b"plot sin(x)")
            .unwrap();

        dir
    }

    #[test]
    fn test_exists() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(fs.exists(&temp.path().join("paper.tex")));
        assert!(!fs.exists(&temp.path().join("missing.tex")));
    }

    #[test]
    fn test_is_dir_and_is_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(&temp.path().join("figures")));
        assert!(!fs.is_dir(&temp.path().join("paper.tex")));
        assert!(fs.is_file(&temp.path().join("paper.tex")));
        assert!(!fs.is_file(temp.path()));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("paper.tex")).unwrap();
        assert_eq!(content, "\\documentclass{article}");
    }

    #[test]
    fn test_read_to_string_tolerates_latin1() {
        let temp = create_test_dir();
        fs::write(temp.path().join("latin.tex"), b"caf\xe9").unwrap();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("latin.tex")).unwrap();
        assert!(content.starts_with("caf"));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.read_to_string(&temp.path().join("missing.tex")).is_err());
    }

    #[test]
    fn test_read_dir() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert_eq!(names, vec!["figures", "paper.tex"]);
        assert!(entries[1].is_file());
    }

    #[test]
    fn test_read_dir_skips_hidden_entries() {
        let temp = create_test_dir();
        fs::write(temp.path().join(".draft.tex"), "\\documentclass{article}").unwrap();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).unwrap();
        assert!(entries.iter().all(|e| !e.file_name().starts_with('.')));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_dir_follows_symlinks() {
        let temp = create_test_dir();
        let shared = TempDir::new().unwrap();
        fs::write(shared.path().join("talk.tex"), "\\documentclass{seminar}").unwrap();
        std::os::unix::fs::symlink(shared.path().join("talk.tex"), temp.path().join("talk.tex")).unwrap();
        std::os::unix::fs::symlink(shared.path().join("gone.mk"), temp.path().join("gone.mk")).unwrap();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).unwrap();
        let talk = entries.iter().find(|e| e.file_name() == "talk.tex").unwrap();
        assert!(talk.is_file());
        let gone = entries.iter().find(|e| e.file_name() == "gone.mk").unwrap();
        assert_eq!(gone.file_type, FileType::Symlink);
    }

    #[test]
    fn test_read_dir_of_file_fails() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.read_dir(&temp.path().join("paper.tex")).is_err());
    }
}
