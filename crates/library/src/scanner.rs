//! Scanner: lists a photo directory and keeps the displayable image files.

use std::path::{Path, PathBuf};

use platform::PictureRef;
use walkdir::WalkDir;

/// Extensions the frame renderer can decode.
const PICTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Failures while building the content pool. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The directory holds no displayable pictures.
    #[error("no pictures found in {}", dir.display())]
    Empty {
        /// Directory that was scanned.
        dir: PathBuf,
    },
    /// The directory could not be listed.
    #[error("cannot read picture directory {}", dir.display())]
    Io {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

/// Stateless helper for extension filtering.
pub struct Scanner;

impl Scanner {
    /// Returns `true` when `ext` is a supported picture extension.
    ///
    /// The comparison is **case-insensitive**. Supported: `jpg`, `jpeg`, `png`.
    pub fn is_supported_extension(ext: &str) -> bool {
        PICTURE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }

    /// Returns `true` when `path` names a file with a supported extension.
    pub fn is_picture(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(Self::is_supported_extension)
    }
}

/// The finite, non-empty set of pictures the slideshow draws from.
#[derive(Debug, Clone)]
pub struct PictureLibrary {
    dir: PathBuf,
    pictures: Vec<PictureRef>,
}

impl PictureLibrary {
    /// Scan `dir` (not recursively) for pictures, sorted by file name.
    ///
    /// Sub-directories and files with other extensions are skipped.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let dir = dir.as_ref().to_path_buf();
        let mut pictures = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| LibraryError::Io {
                dir: dir.clone(),
                source,
            })?;
            if entry.file_type().is_file() && Scanner::is_picture(entry.path()) {
                pictures.push(PictureRef::new(entry.into_path()));
            } else {
                tracing::debug!(path = %entry.path().display(), "skipping non-picture entry");
            }
        }

        if pictures.is_empty() {
            return Err(LibraryError::Empty { dir });
        }
        tracing::info!(dir = %dir.display(), count = pictures.len(), "picture library loaded");
        Ok(Self { dir, pictures })
    }

    /// Directory the pool was scanned from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The pictures, sorted by file name.
    pub fn pictures(&self) -> &[PictureRef] {
        &self.pictures
    }

    /// Consume the library and return the pool.
    pub fn into_pictures(self) -> Vec<PictureRef> {
        self.pictures
    }

    /// Number of pictures; never zero.
    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    /// Always `false`: an empty scan is rejected by [`PictureLibrary::scan`].
    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_recognises_jpg() {
        assert!(Scanner::is_supported_extension("jpg"));
        assert!(Scanner::is_supported_extension("jpeg"));
    }

    #[test]
    fn test_scanner_recognises_png() {
        assert!(Scanner::is_supported_extension("png"));
    }

    #[test]
    fn test_scanner_rejects_other_files() {
        assert!(!Scanner::is_supported_extension("flac"));
        assert!(!Scanner::is_supported_extension("gif"));
        assert!(!Scanner::is_supported_extension(""));
    }

    #[test]
    fn test_scanner_extension_case_insensitive() {
        assert!(Scanner::is_supported_extension("JPG"));
        assert!(Scanner::is_supported_extension("Png"));
    }

    #[test]
    fn test_is_picture_needs_an_extension() {
        assert!(Scanner::is_picture(Path::new("/photos/cat.JPEG")));
        assert!(!Scanner::is_picture(Path::new("/photos/jpg")));
        assert!(!Scanner::is_picture(Path::new("/photos/notes.txt")));
    }
}
