use common::diagnostics::{ports::KeyValueStore, StoreError};
use web_sys::Storage;

/// `window.localStorage`. Every call looks the storage up again, so a
/// browser with storage disabled simply reads as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = local_storage().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|err| StoreError::Write {
            key: key.to_string(),
            reason: format!("{err:?}"),
        })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
