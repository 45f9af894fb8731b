pub mod action;
pub mod codec;
pub mod geometry;
pub mod history;
pub mod patch;
pub mod pile;
pub mod snapshot;
pub mod state;
pub mod store;

pub use action::{GameAction, PlayerAction};
pub use codec::{decode_root, encode};
pub use geometry::{splitmix32, Point2};
pub use history::{HistoryEntry, PatchLog};
pub use patch::{apply_patches, Change, Patch};
pub use pile::{cluster_pile, PileSlot};
pub use snapshot::{
    validate_root, SnapshotError, TableRules, DECK_SIZE_DEFAULT, HISTORY_LIMIT_DEFAULT,
    PILE_MIN_DISTANCE_DEFAULT, SESSION_KEY,
};
pub use state::{Card, CardPile, Game, Player, Root};
pub use store::{ApplyMode, GameStore};
