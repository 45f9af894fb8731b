use cardtable_core::{decode_root, encode, Root, TableRules, SESSION_KEY};

use crate::persisted_store::SnapshotStorage;

/// Restores the session Root. Missing, unreadable or invalid snapshots fall
/// back to a fresh, empty game.
pub fn load_root(storage: &dyn SnapshotStorage, rules: &TableRules) -> Root {
    #[cfg(target_arch = "wasm32")]
    {
        gloo::console::log!("local snapshot: load");
    }
    let raw = match storage.get_item(SESSION_KEY) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::log!("local snapshot: empty value");
            }
            return Root::default();
        }
        Err(_err) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::log!("local snapshot: storage get failed", _err);
            }
            return Root::default();
        }
    };
    match decode_root(&raw, rules) {
        Ok(root) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::log!(
                    "local snapshot: loaded",
                    root.game.players.len(),
                    root.game.card_pile.positions.len()
                );
            }
            root
        }
        Err(_err) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::log!("local snapshot: invalid", _err.to_string());
            }
            Root::default()
        }
    }
}

pub fn save_root(storage: &dyn SnapshotStorage, root: &Root) {
    let Some(raw) = encode(root) else {
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::log!("local snapshot: encode failed");
        }
        return;
    };
    if let Err(_err) = storage.set_item(SESSION_KEY, &raw) {
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::log!("local snapshot: storage set failed", _err);
        }
    }
}

pub fn clear_root(storage: &dyn SnapshotStorage) {
    let _ = storage.remove_item(SESSION_KEY);
}
