//! In-memory snapshot store for testing and ephemeral use.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, snapshot: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let snapshot = snapshot.to_string();
        Box::pin(async move {
            let mut map = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            map.insert(name, snapshot);
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<String>> {
        let name = name.to_string();
        Box::pin(async move {
            let map = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            map.get(&name)
                .cloned()
                .ok_or(StorageError::NotFound(name))
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut map = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            map.remove(&name);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let map = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(map.keys().cloned().collect())
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move {
            let map = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(map.contains_key(&name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::block_on;
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_save_and_load_roundtrip() {
        let storage = MemoryStorage::new();
        let board = Board::new();
        let snapshot = board.to_snapshot().unwrap();

        block_on(storage.save("lesson", &snapshot)).unwrap();
        let loaded = block_on(storage.load("lesson")).unwrap();
        let restored = Board::from_snapshot(&loaded).unwrap();

        assert_eq!(restored.id, board.id);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("missing"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list_and_delete() {
        let storage = MemoryStorage::new();
        block_on(storage.save("a", "{}")).unwrap();
        block_on(storage.save("b", "{}")).unwrap();

        let mut names = block_on(storage.list()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);

        block_on(storage.delete("a")).unwrap();
        assert!(!block_on(storage.exists("a")).unwrap());
        assert!(block_on(storage.exists("b")).unwrap());
    }
}
