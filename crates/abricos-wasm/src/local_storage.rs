use abricos_core::error::AbricosError;
use abricos_core::storage::KeyValueStore;

/// The browser's `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, AbricosError> {
        let window =
            web_sys::window().ok_or_else(|| AbricosError::Backend("no window object".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| AbricosError::Backend(format!("localStorage unavailable: {e:?}")))?
            .ok_or_else(|| AbricosError::Backend("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AbricosError> {
        self.storage
            .get_item(key)
            .map_err(|e| AbricosError::Backend(format!("read {key}: {e:?}")))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), AbricosError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AbricosError::Backend(format!("write {key}: {e:?}")))
    }
}
