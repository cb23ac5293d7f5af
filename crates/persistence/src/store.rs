use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{PersistenceError, PersistenceResult};
use crate::saveable::SaveFile;

/// Storage for named saves.
pub trait SaveStore: Send + Sync {
    /// Load a save. A save that was never written loads as an empty file.
    fn load(&self, name: &str) -> PersistenceResult<SaveFile>;

    fn write(&self, name: &str, file: &SaveFile) -> PersistenceResult<()>;

    /// Remove a save. Deleting a missing save is not an error.
    fn delete(&self, name: &str) -> PersistenceResult<()>;
}

fn validate_name(name: &str) -> PersistenceResult<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(PersistenceError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// In-memory save store.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySaveStore {
    saves: RwLock<HashMap<String, SaveFile>>,
}

impl InMemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for InMemorySaveStore {
    fn load(&self, name: &str) -> PersistenceResult<SaveFile> {
        validate_name(name)?;
        let saves = self.saves.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(saves.get(name).cloned().unwrap_or_default())
    }

    fn write(&self, name: &str, file: &SaveFile) -> PersistenceResult<()> {
        validate_name(name)?;
        let mut saves = self.saves.write().map_err(|_| PersistenceError::Poisoned)?;
        saves.insert(name.to_string(), file.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> PersistenceResult<()> {
        validate_name(name)?;
        let mut saves = self.saves.write().map_err(|_| PersistenceError::Poisoned)?;
        saves.remove(name);
        Ok(())
    }
}

/// Saves as pretty-printed JSON files: `<dir>/<name>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileSaveStore {
    dir: PathBuf,
}

impl JsonFileSaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PersistenceResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl SaveStore for JsonFileSaveStore {
    fn load(&self, name: &str) -> PersistenceResult<SaveFile> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no save on disk yet");
                Ok(SaveFile::default())
            }
            Err(e) => Err(PersistenceError::io(path.display().to_string(), e)),
        }
    }

    fn write(&self, name: &str, file: &SaveFile) -> PersistenceResult<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| PersistenceError::io(self.dir.display().to_string(), e))?;

        let bytes = serde_json::to_vec_pretty(file)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| PersistenceError::io(tmp.display().to_string(), e))?;
        fs::rename(&tmp, &path).map_err(|e| PersistenceError::io(path.display().to_string(), e))?;
        Ok(())
    }

    fn delete(&self, name: &str) -> PersistenceResult<()> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::io(path.display().to_string(), e)),
        }
    }
}
