//! Directory walking implementation using walkdir.

use super::{filter::ExtensionSet, ScanDepth, ScanResult};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct MediaScanner {
    config: ScanConfig,
    filter: ExtensionSet,
}

impl MediaScanner {
    /// Create a new scanner accepting the given extensions
    pub fn new(config: ScanConfig, filter: ExtensionSet) -> Self {
        Self { config, filter }
    }

    /// Collect matching files at every depth under `root`
    pub fn scan_tree(&self, root: &Path, events: &EventSender) -> Result<ScanResult, ScanError> {
        self.scan(root, ScanDepth::Recursive, events)
    }

    /// Collect matching files directly inside `root`, ignoring subdirectories
    pub fn scan_dir(&self, root: &Path, events: &EventSender) -> Result<ScanResult, ScanError> {
        self.scan(root, ScanDepth::Shallow, events)
    }

    fn scan(
        &self,
        root: &Path,
        depth: ScanDepth,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let root = std::path::absolute(root).map_err(|source| ScanError::ReadDirectory {
            path: root.to_path_buf(),
            source,
        })?;

        events.send(Event::Scan(ScanEvent::Started {
            root: root.clone(),
            depth,
        }));

        let mut walker = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks);

        if depth == ScanDepth::Shallow {
            walker = walker.max_depth(1);
        }

        let include_hidden = self.config.include_hidden;
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry_result in walker
            .into_iter()
            .filter_entry(|entry| include_hidden || !is_hidden(entry))
        {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && self.filter.matches(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");

                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                    let error = ScanError::ReadDirectory {
                        path: path.clone(),
                        source,
                    };
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    errors.push(error);
                }
            }
        }

        sort_and_dedup(&mut files);

        events.send(Event::Scan(ScanEvent::Completed {
            root,
            total_files: files.len(),
        }));

        Ok(ScanResult { files, errors })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Order paths by their raw string form and drop exact repeats
fn sort_and_dedup(files: &mut Vec<PathBuf>) {
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_media(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(b"\x00\x00\x00\x14ftypqt  ").unwrap();
        path
    }

    fn scanner() -> MediaScanner {
        MediaScanner::new(ScanConfig::default(), ExtensionSet::default())
    }

    fn names(result: &ScanResult) -> Vec<String> {
        result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();

        let result = scanner().scan_tree(temp_dir.path(), &null_sender()).unwrap();

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_tree_traverses_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("2024").join("trip");
        fs::create_dir_all(&nested).unwrap();

        create_test_media(temp_dir.path(), "root.mov");
        create_test_media(&nested, "nested.MP4");

        let result = scanner().scan_tree(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(result.files.len(), 2);
        assert!(result.files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn scan_dir_ignores_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("sub");
        fs::create_dir(&nested).unwrap();

        create_test_media(temp_dir.path(), "top.mkv");
        create_test_media(&nested, "deep.mkv");

        let result = scanner().scan_dir(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(names(&result), vec!["top.mkv"]);
    }

    #[test]
    fn scan_dir_skips_directories_named_like_media() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("folder.mov")).unwrap();
        create_test_media(temp_dir.path(), "clip.mov");

        let result = scanner().scan_dir(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(names(&result), vec!["clip.mov"]);
    }

    #[test]
    fn scan_excludes_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        create_test_media(temp_dir.path(), "clip.mov");
        create_test_media(temp_dir.path(), "notes.txt");
        create_test_media(temp_dir.path(), "still.jpg");

        let result = scanner().scan_tree(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(names(&result), vec!["clip.mov"]);
    }

    #[test]
    fn scan_results_are_sorted() {
        let temp_dir = TempDir::new().unwrap();
        create_test_media(temp_dir.path(), "c.mov");
        create_test_media(temp_dir.path(), "a.mov");
        create_test_media(temp_dir.path(), "b.mov");

        let result = scanner().scan_dir(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(names(&result), vec!["a.mov", "b.mov", "c.mov"]);
    }

    #[test]
    fn scan_includes_hidden_files_by_default() {
        let temp_dir = TempDir::new().unwrap();
        create_test_media(temp_dir.path(), "visible.mov");
        create_test_media(temp_dir.path(), ".hidden.mov");

        let result = scanner().scan_dir(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn scan_can_skip_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        let hidden_dir = temp_dir.path().join(".cache");
        fs::create_dir(&hidden_dir).unwrap();
        create_test_media(temp_dir.path(), "visible.mov");
        create_test_media(temp_dir.path(), ".hidden.mov");
        create_test_media(&hidden_dir, "cached.mov");

        let config = ScanConfig {
            include_hidden: false,
            ..Default::default()
        };
        let scanner = MediaScanner::new(config, ExtensionSet::default());
        let result = scanner.scan_tree(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(names(&result), vec!["visible.mov"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_entry_is_collected_and_reported() {
        use crate::events::EventChannel;

        let temp_dir = TempDir::new().unwrap();
        create_test_media(temp_dir.path(), "clip.mov");
        std::os::unix::fs::symlink(
            temp_dir.path().join("gone.mov"),
            temp_dir.path().join("dangling.mov"),
        )
        .unwrap();

        let config = ScanConfig {
            follow_symlinks: true,
            ..Default::default()
        };
        let scanner = MediaScanner::new(config, ExtensionSet::default());
        let (sender, receiver) = EventChannel::new();
        let result = scanner.scan_dir(temp_dir.path(), &sender).unwrap();
        drop(sender);

        assert_eq!(names(&result), vec!["clip.mov"]);
        assert_eq!(result.errors.len(), 1);
        let reported: Vec<PathBuf> = receiver
            .iter()
            .filter_map(|event| match event {
                Event::Scan(ScanEvent::Error { path, .. }) => Some(path),
                _ => None,
            })
            .collect();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].ends_with("dangling.mov"));
    }

    #[test]
    fn scan_nonexistent_directory_returns_error() {
        let result = scanner().scan_tree(Path::new("/nonexistent/path/12345"), &null_sender());

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }

    #[test]
    fn sort_uses_string_order_and_removes_repeats() {
        let mut files = vec![
            PathBuf::from("/src/a/x.mov"),
            PathBuf::from("/src/a b/x.mov"),
            PathBuf::from("/src/a/x.mov"),
        ];

        sort_and_dedup(&mut files);

        assert_eq!(
            files,
            vec![PathBuf::from("/src/a b/x.mov"), PathBuf::from("/src/a/x.mov")]
        );
    }
}
