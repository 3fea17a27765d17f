use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

/// Writes generated files below a destination directory.
#[derive(Debug, Clone)]
pub struct FileWriter {
    root: PathBuf,
}

impl FileWriter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileWriter { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Writes `contents` to `relative`, creating missing parent directories.
    /// An existing file is replaced without asking.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a directory can not be created or the file can
    /// not be written.
    pub fn write(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.root.join(relative);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::io("failed to create", parent, e))?;
        }

        std::fs::write(&path, contents).map_err(|e| ScaffoldError::io("failed to write", &path, e))?;

        crate::create!(path);

        Ok(path)
    }
}
