use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Error, Result};
use super::artifact::GenomeArtifact;

/// A directory of artifacts, one JSON file per name.
///
/// Saving an existing name overwrites it. Reading an artifact written with a
/// different genome or config schema fails with a `Json` error.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ArtifactStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Accepts names that stay inside the store directory and are not hidden.
    pub fn validate_name(name: &str) -> Result<()> {
        if name.is_empty()
            || name.starts_with('.')
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
            || name.contains('\0')
        {
            return Err(Error::InvalidArtifactName(name.to_owned()));
        }
        Ok(())
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        Self::validate_name(name)?;
        Ok(self.dir.join(name))
    }

    /// Writes the artifact under `name` and returns its path. The JSON is
    /// written to a hidden temporary file in the store and persisted into
    /// place, so readers never see a partial artifact. The temporary file is
    /// removed if anything fails.
    pub fn save<G, C>(&self, name: &str, artifact: &GenomeArtifact<G, C>) -> Result<PathBuf>
    where
        G: Serialize,
        C: Serialize,
    {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        if path.exists() {
            warn!(artifact = name, "overwriting existing artifact");
        }

        let mut tmp = tempfile::Builder::new()
            .prefix(".")
            .tempfile_in(&self.dir)
            .map_err(|e| Error::io(&self.dir, e))?;
        {
            let mut writer = std::io::BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, artifact)?;
            writer.flush().map_err(|e| Error::io(&path, e))?;
        }
        tmp.persist(&path).map_err(|e| Error::io(&path, e.error))?;

        info!(artifact = name, path = %path.display(), "artifact saved");
        Ok(path)
    }

    /// Reads the artifact saved under `name`.
    pub fn load<G, C>(&self, name: &str) -> Result<GenomeArtifact<G, C>>
    where
        G: DeserializeOwned,
        C: DeserializeOwned,
    {
        let path = self.path_for(name)?;
        let file = std::fs::File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ArtifactNotFound(name.to_owned()),
            _ => Error::io(&path, e),
        })?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Names of the regular, non-hidden files in the store, sorted. Symlinks
    /// count when they point at a regular file. A store directory that does
    /// not exist yet is empty.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.dir, e))?;
            // Dangling links are skipped rather than failing the whole listing.
            let is_file = std::fs::metadata(entry.path()).map_or(false, |m| m.is_file());
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
