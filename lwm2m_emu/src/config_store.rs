// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use lwm2m_api_core::config_record::ConfigRecord;
use lwm2m_api_core::object_path::ResourcePath;

/// Persistent storage of resource values, keyed by resource path.
pub trait ConfigStore: Send {
    fn load(&mut self, path: ResourcePath) -> anyhow::Result<Option<Vec<u8>>>;
    fn save(&mut self, path: ResourcePath, data: &[u8]) -> anyhow::Result<()>;
}

/// One file per resource below `base_path`, holding a CBOR-encoded `ConfigRecord`.
pub struct FileConfigStore {
    base_path: std::path::PathBuf,
}

impl FileConfigStore {
    pub fn new(base_path: &str) -> anyhow::Result<Self> {
        let base_path = std::path::PathBuf::from(base_path);
        if !base_path.exists() {
            std::fs::DirBuilder::new().recursive(true).create(&base_path)?;
        }
        Ok(Self { base_path })
    }

    fn record_file(&self, path: ResourcePath) -> std::path::PathBuf {
        self.base_path
            .join(format!("{}_{}_{}.cbor", path.object_id, path.instance_id, path.resource_id))
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&mut self, path: ResourcePath) -> anyhow::Result<Option<Vec<u8>>> {
        let record_file = self.record_file(path);
        if !record_file.exists() {
            return Ok(None);
        }

        let raw = std::fs::read(&record_file)?;
        let record: ConfigRecord = minicbor::decode(&raw).map_err(|err| anyhow::anyhow!("{}: {}", record_file.display(), err))?;
        if record.path != path {
            anyhow::bail!("{} holds the record of {}", record_file.display(), record.path);
        }
        Ok(Some(record.data.to_vec()))
    }

    fn save(&mut self, path: ResourcePath, data: &[u8]) -> anyhow::Result<()> {
        let raw = minicbor::to_vec(ConfigRecord { path, data }).map_err(|err| anyhow::anyhow!("{}: {}", path, err))?;
        std::fs::write(self.record_file(path), raw)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryConfigStore {
    records: std::collections::BTreeMap<ResourcePath, Vec<u8>>,
}

impl MemoryConfigStore {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&mut self, path: ResourcePath) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.records.get(&path).cloned())
    }

    fn save(&mut self, path: ResourcePath, data: &[u8]) -> anyhow::Result<()> {
        self.records.insert(path, data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scratch_dir(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("lwm2m_emu_{}_{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        dir.to_string_lossy().to_string()
    }

    #[test]
    fn file_store_round_trip() {
        let dir = scratch_dir("file_store_round_trip");
        let path = ResourcePath::new(3435, 2, 6051);

        let mut store = FileConfigStore::new(&dir).unwrap();
        assert!(store.load(path).unwrap().is_none());
        store.save(path, &120_u32.to_le_bytes()).unwrap();

        // A new store on the same directory sees the record.
        let mut store = FileConfigStore::new(&dir).unwrap();
        assert_eq!(store.load(path).unwrap(), Some(120_u32.to_le_bytes().to_vec()));
        assert!(store.load(ResourcePath::new(3435, 3, 6051)).unwrap().is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn file_store_rejects_corrupted_record() {
        let dir = scratch_dir("file_store_rejects_corrupted_record");
        let path = ResourcePath::new(3435, 0, 6054);

        let mut store = FileConfigStore::new(&dir).unwrap();
        std::fs::write(store.record_file(path), [0xff_u8, 0x00, 0x13]).unwrap();
        assert!(store.load(path).is_err());

        // Record stored under the wrong name.
        store.save(ResourcePath::new(3435, 1, 6054), &[1, 2, 3, 4]).unwrap();
        std::fs::rename(store.record_file(ResourcePath::new(3435, 1, 6054)), store.record_file(path)).unwrap();
        assert!(store.load(path).is_err());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryConfigStore::default();
        let path = ResourcePath::new(3435, 0, 6056);
        assert!(store.is_empty());

        store.save(path, &[1]).unwrap();
        store.save(path, &[2]).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load(path).unwrap(), Some(vec![2]));
    }
}
