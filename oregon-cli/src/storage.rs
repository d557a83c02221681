use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use oregon_game::{SaveError, SaveRecord, TripStorage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: SaveError,
    },
}

/// Single save slot kept as pretty JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn record_error(&self, source: SaveError) -> StorageError {
        StorageError::Record {
            path: self.path.clone(),
            source,
        }
    }
}

impl TripStorage for JsonFileStorage {
    type Error = StorageError;

    fn save_trip(&self, record: &SaveRecord) -> Result<(), Self::Error> {
        let json = record
            .to_json_pretty()
            .map_err(|err| self.record_error(err))?;
        fs::write(&self.path, json).map_err(|err| self.io_error(err))?;
        log::debug!("saved trip to {}", self.path.display());
        Ok(())
    }

    fn load_trip(&self) -> Result<Option<SaveRecord>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };
        SaveRecord::from_json(&raw)
            .map(Some)
            .map_err(|err| self.record_error(err))
    }

    fn delete_trip(&self) -> Result<(), Self::Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn location(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oregon_game::{TrailConfig, TripState};

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "oregon-storage-{label}-{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_file_is_no_save() {
        let storage = JsonFileStorage::new(temp_path("missing"));
        assert!(storage.load_trip().unwrap().is_none());
        storage.delete_trip().unwrap();
    }

    #[test]
    fn save_load_delete_cycle() {
        let cfg = TrailConfig::default();
        let mut state = TripState::new(["Ada", "Bo", "Cy", "Di"], &cfg);
        state.wagon.days = 12;
        let storage = JsonFileStorage::new(temp_path("cycle"));

        storage.save_trip(&SaveRecord::capture(&state)).unwrap();
        let loaded = storage.load_trip().unwrap().unwrap();
        assert_eq!(loaded.restore(&cfg).unwrap(), state);

        storage.delete_trip().unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn location_is_the_file_path() {
        let path = temp_path("location");
        let storage = JsonFileStorage::new(&path);
        assert_eq!(storage.location(), Some(path.display().to_string()));
    }

    #[test]
    fn corrupt_file_reports_the_path() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ nope").unwrap();
        let storage = JsonFileStorage::new(&path);

        let err = storage.load_trip().unwrap_err();

        assert!(matches!(err, StorageError::Record { .. }));
        assert!(err.to_string().contains("oregon-storage-corrupt"));
        storage.delete_trip().unwrap();
    }
}
