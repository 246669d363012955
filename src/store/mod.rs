use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::domain::Zone;
use crate::wizard::{MAX_VERTICES, MIN_VERTICES};

/// JSON-file persistence for zone records.
///
/// The file holds a list of zones, each a name, a device id and a polygon
/// as `[lat, lon]` pairs. A missing file reads as an empty list.
#[derive(Debug, Clone)]
pub struct ZoneStore {
    path: PathBuf,
}

impl ZoneStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Zone>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .context(format!("Failed to read zone store: {:?}", self.path))?;
        let zones: Vec<Zone> = serde_json::from_str(&contents)
            .context(format!("Failed to parse zone store: {:?}", self.path))?;

        // Coordinate ranges are checked during deserialization; vertex
        // counts still need a pass in case the file was edited by hand.
        for zone in &zones {
            if zone.polygon.len() < MIN_VERTICES || zone.polygon.len() > MAX_VERTICES {
                bail!(
                    "Zone '{}' has {} vertices, expected {} to {}",
                    zone.name,
                    zone.polygon.len(),
                    MIN_VERTICES,
                    MAX_VERTICES
                );
            }
        }
        Ok(zones)
    }

    pub fn save(&self, zones: &[Zone]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .context(format!("Failed to create store directory: {:?}", parent))?;
        }
        let contents = serde_json::to_string_pretty(zones)?;
        fs::write(&self.path, contents)
            .context(format!("Failed to write zone store: {:?}", self.path))?;
        Ok(())
    }

    /// Add a zone, rejecting a duplicate name.
    pub fn add(&self, zone: Zone) -> Result<()> {
        let mut zones = self.load()?;
        if zones.iter().any(|z| z.name == zone.name) {
            bail!("A zone named '{}' already exists", zone.name);
        }
        zones.push(zone);
        self.save(&zones)
    }

    pub fn find(&self, name: &str) -> Result<Option<Zone>> {
        Ok(self.load()?.into_iter().find(|z| z.name == name))
    }

    /// Remove a zone by name. Returns whether anything was removed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut zones = self.load()?;
        let before = zones.len();
        zones.retain(|z| z.name != name);
        if zones.len() == before {
            return Ok(false);
        }
        self.save(&zones)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_coordinates;
    use tempfile::tempdir;

    fn zone(name: &str) -> Zone {
        let polygon = parse_coordinates("[[0,0],[0,2],[2,2],[2,0]]").unwrap();
        Zone::new(name, "device_tracker.phone", polygon).unwrap()
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = ZoneStore::new(dir.path().join("zones.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_add_and_find() {
        let dir = tempdir().unwrap();
        let store = ZoneStore::new(dir.path().join("nested").join("zones.json"));

        store.add(zone("yard")).unwrap();
        store.add(zone("work")).unwrap();

        let found = store.find("yard").unwrap().unwrap();
        assert_eq!(found.polygon.len(), 4);
        assert!(store.find("nowhere").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let dir = tempdir().unwrap();
        let store = ZoneStore::new(dir.path().join("zones.json"));

        store.add(zone("yard")).unwrap();
        assert!(store.add(zone("yard")).is_err());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let store = ZoneStore::new(dir.path().join("zones.json"));

        store.add(zone("yard")).unwrap();
        assert!(store.remove("yard").unwrap());
        assert!(!store.remove("yard").unwrap());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_hand_edited_degenerate_zone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zones.json");
        fs::write(
            &path,
            r#"[{"name":"bad","device":"device_tracker.phone","polygon":[[0,0],[1,1]]}]"#,
        )
        .unwrap();

        let store = ZoneStore::new(&path);
        assert!(store.load().is_err());
    }
}
