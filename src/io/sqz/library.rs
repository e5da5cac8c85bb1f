//! Named access to the containers of a game data directory.
//!
//! Assets live as `NAME.SQZ` and music tracks as `NAME.TRK` under one
//! directory (`sqz` by default). The library resolves names, unpacks them,
//! and can dump the raw decoded bytes as `NAME.BIN` for inspection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Result, SqzError};

use super::constants::resources::{
    ASSET_EXTENSION, DEFAULT_DIRECTORY, RAW_EXTENSION, TRACK_EXTENSION,
};
use super::reader::{SqzReader, SqzReaderConfiguration};

#[derive(Debug, Clone)]
pub struct SqzLibrary {
    root: PathBuf,
    config: SqzReaderConfiguration,
}

impl Default for SqzLibrary {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTORY)
    }
}

impl SqzLibrary {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            config: SqzReaderConfiguration::default(),
        }
    }

    pub fn with_config(mut self, config: SqzReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the asset container `NAME.SQZ`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{ASSET_EXTENSION}"))
    }

    /// Path of the music track `NAME.TRK`.
    pub fn track_path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{TRACK_EXTENSION}"))
    }

    pub fn unpack(&self, name: &str) -> Result<Vec<u8>> {
        self.unpack_path(&self.path_for(name))
    }

    pub fn unpack_track(&self, name: &str) -> Result<Vec<u8>> {
        self.unpack_path(&self.track_path_for(name))
    }

    /// Like [`unpack`](Self::unpack), but a missing asset is `Ok(None)`.
    /// Corrupt assets still fail.
    pub fn unpack_optional(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.unpack(name) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(name, "optional asset not present");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Unpack several assets in parallel, keeping the input order.
    pub fn unpack_all<'a>(&self, names: &[&'a str]) -> Vec<(&'a str, Result<Vec<u8>>)> {
        names
            .par_iter()
            .map(|&name| (name, self.unpack(name)))
            .collect()
    }

    /// Write the decoded bytes of `NAME.SQZ` to `out_dir/NAME.BIN`.
    pub fn export_raw<P: AsRef<Path>>(&self, name: &str, out_dir: P) -> Result<PathBuf> {
        let data = self.unpack(name)?;
        let out_dir = out_dir.as_ref();
        fs::create_dir_all(out_dir)?;
        let out_path = out_dir.join(format!("{name}.{RAW_EXTENSION}"));
        fs::write(&out_path, &data)?;
        tracing::info!(name, bytes = data.len(), path = %out_path.display(), "exported raw asset");
        Ok(out_path)
    }

    fn unpack_path(&self, path: &Path) -> Result<Vec<u8>> {
        let reader = SqzReader::from_file(path).map_err(|e| match e {
            SqzError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                SqzError::ResourceNotFound(path.display().to_string())
            }
            other => other,
        })?;
        reader.with_config(self.config.clone()).read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let lib = SqzLibrary::new("data");
        assert_eq!(lib.path_for("LEVEL1"), PathBuf::from("data/LEVEL1.SQZ"));
        assert_eq!(lib.track_path_for("MUSIC1"), PathBuf::from("data/MUSIC1.TRK"));
        assert_eq!(SqzLibrary::default().root(), Path::new("sqz"));
    }

    #[test]
    fn test_missing_resource() {
        let lib = SqzLibrary::new("no-such-directory");
        let err = lib.unpack("SPRITES").unwrap_err();
        assert!(matches!(err, SqzError::ResourceNotFound(ref p) if p.contains("SPRITES.SQZ")));
        assert!(lib.unpack_optional("SPRITES").unwrap().is_none());
    }
}
