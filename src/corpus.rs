use std::fs;
use std::path::{Path, PathBuf};

/// Suffix that marks a corpus file
pub const CORPUS_SUFFIX: &str = ".txt";

/// Corpus files in processing order: sorted once, then read-only
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileQueue {
    files: Vec<PathBuf>,
}

impl FileQueue {
    /// Collects the regular `*.txt` files directly inside `dir`, sorted by name.
    ///
    /// A missing or unreadable directory degrades to an empty queue with a warning.
    pub fn discover(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                log::warn!(
                    "No input file could be found in the {} directory: {}",
                    dir.display(),
                    e
                );
                return Self::default();
            }
        };

        let mut files = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let name = entry.file_name();
            if !name.to_string_lossy().ends_with(CORPUS_SUFFIX) {
                continue;
            }
            // Follows symlinks, like opening the file would
            if !entry.path().is_file() {
                log::warn!("Skipping {}: not a regular file", entry.path().display());
                continue;
            }
            log::debug!("{} added to queue", entry.path().display());
            files.push(entry.path());
        }
        Self::from_paths(files)
    }

    /// Builds a queue from explicit paths, sorted by their byte representation
    pub fn from_paths(mut files: Vec<PathBuf>) -> Self {
        files.sort_by(|a, b| {
            a.as_os_str()
                .as_encoded_bytes()
                .cmp(b.as_os_str().as_encoded_bytes())
        });
        log::debug!("Sorted file queue of {} files", files.len());
        Self { files }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
