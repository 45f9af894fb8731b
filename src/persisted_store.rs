use std::cell::RefCell;
use std::collections::HashMap;

/// Host key-value storage for session snapshots.
pub trait SnapshotStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// Process-local storage, used off the browser and in tests.
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::SnapshotStorage;

    /// `window.localStorage`.
    #[derive(Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Result<web_sys::Storage, String> {
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            window
                .local_storage()
                .map_err(|_| "local storage denied".to_string())?
                .ok_or_else(|| "local storage unavailable".to_string())
        }
    }

    impl SnapshotStorage for LocalStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, String> {
            Self::storage()?
                .get_item(key)
                .map_err(|_| "storage get failed".to_string())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|_| "storage set failed".to_string())
        }

        fn remove_item(&self, key: &str) -> Result<(), String> {
            Self::storage()?
                .remove_item(key)
                .map_err(|_| "storage remove failed".to_string())
        }
    }
}
