use std::path::{Path, PathBuf};

use anyhow::Result;

pub trait FsExt {
    // Converts the provided relative path to be based from the path of the currently working directory.
    // If the path is absolute, then it returns the absolute path.
    fn relative_to_cwd(&self) -> Result<PathBuf>
    where
        Self: AsRef<Path>,
    {
        let cwd_dir = std::env::current_dir()?;

        Ok(cwd_dir.join(self))
    }

    /// Whether the path names a gzip compressed file.
    fn is_gzip(&self) -> bool
    where
        Self: AsRef<Path>,
    {
        self.as_ref()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    }
}

impl FsExt for String {}

impl FsExt for &str {}

impl FsExt for PathBuf {}
