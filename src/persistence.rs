//! Numbered save slots on disk
//!
//! Each slot holds one serialized `Simulation` as a JSON file. Writes are
//! best effort: a failed write is reported, never retried.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::error::{Result, SimError};
use crate::nation::Simulation;

pub const SLOT_COUNT: u8 = 3;

/// A validated slot id in `1..=SLOT_COUNT`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SaveSlot(u8);

impl SaveSlot {
    pub fn new(slot: u8) -> Result<Self> {
        if (1..=SLOT_COUNT).contains(&slot) {
            Ok(Self(slot))
        } else {
            Err(SimError::InvalidSlot(slot))
        }
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn file_name(&self) -> String {
        format!("cabinet_save_{}.json", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: SaveSlot) -> PathBuf {
        self.dir.join(slot.file_name())
    }

    pub fn exists(&self, slot: SaveSlot) -> bool {
        self.slot_path(slot).exists()
    }

    pub fn save(&self, slot: SaveSlot, sim: &Simulation) -> Result<PathBuf> {
        let blob = sim.serialize()?;
        let path = self.slot_path(slot);
        fs::write(&path, blob)?;
        info!(slot = slot.id(), path = %path.display(), "Game saved");
        Ok(path)
    }

    pub fn load(&self, slot: SaveSlot) -> Result<Simulation> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(SimError::SaveNotFound(slot.id()));
        }
        let blob = fs::read(&path)?;
        let sim = Simulation::deserialize(&blob)?;
        info!(slot = slot.id(), date = %sim.date(), "Game loaded");
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds() {
        assert!(SaveSlot::new(0).is_err());
        assert!(SaveSlot::new(1).is_ok());
        assert!(SaveSlot::new(3).is_ok());
        assert!(matches!(SaveSlot::new(4), Err(SimError::InvalidSlot(4))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        let slot = SaveSlot::new(2).unwrap();

        let mut sim = Simulation::with_seed("Test PM", "Test Party", 8);
        sim.advance_day();
        store.save(slot, &sim).unwrap();
        assert!(store.exists(slot));

        let loaded = store.load(slot).unwrap();
        assert_eq!(loaded.region_snapshot(), sim.region_snapshot());
        assert_eq!(loaded.date(), sim.date());
    }

    #[test]
    fn test_missing_slot_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        let err = store.load(SaveSlot::new(1).unwrap()).unwrap_err();
        assert!(matches!(err, SimError::SaveNotFound(1)));
        assert!(err.is_file_error());
    }

    #[test]
    fn test_corrupt_slot_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        let slot = SaveSlot::new(3).unwrap();
        fs::write(store.slot_path(slot), b"{\"regions\": []}").unwrap();

        let err = store.load(slot).unwrap_err();
        assert!(err.is_data_error());
    }
}
