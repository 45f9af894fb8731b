pub mod app_core;
pub mod drag;
pub mod input;
pub mod local_snapshot;
pub mod persisted_store;

pub use app_core::{
    AppCore, AppSnapshot, AppSubscriber, AppSubscription, DragTarget, DrawnCardView, Hit, Mode,
    PlayerView, DRAWN_CARD_HOME,
};
pub use drag::Draggable;
pub use input::{
    ActiveGesture, GestureEnd, GestureEngine, InputEvent, InputEventKind, PointerEvent,
    PointerIdentity, TargetKind,
};
pub use local_snapshot::{clear_root, load_root, save_root};
#[cfg(target_arch = "wasm32")]
pub use persisted_store::LocalStorage;
pub use persisted_store::{MemoryStorage, SnapshotStorage};
