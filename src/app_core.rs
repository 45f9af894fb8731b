use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Date;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::drag::Draggable;
use crate::input::{GestureEngine, InputEvent, InputEventKind, PointerEvent, TargetKind};
use crate::local_snapshot::{clear_root, load_root, save_root};
use crate::persisted_store::SnapshotStorage;
use cardtable_core::{
    cluster_pile, splitmix32, Card, GameAction, GameStore, PileSlot, PlayerAction, Point2, Root,
    TableRules,
};

pub type AppSubscriber = Rc<dyn Fn()>;

/// Where a freshly drawn card shows up before it is dragged anywhere.
pub const DRAWN_CARD_HOME: Point2 = Point2::new(0.0, 0.0);

/// Interaction mode layered over the game model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    ShuffleArmed,
    ShuffleDragging,
    PlacePlayer,
    ChooseRecipient { card: Card },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    Pile,
    Player(usize),
    DrawnCard,
}

/// Entity under a pointer-down, as reported by the renderer's hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Surface,
    Pile,
    Player(usize),
    DrawnCard,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub index: usize,
    pub name: String,
    pub cards: Vec<Card>,
    pub position: Point2,
    pub dragging: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawnCardView {
    pub card: Card,
    pub position: Point2,
    pub dragging: bool,
}

#[derive(Clone)]
pub struct AppSnapshot {
    pub root: Root,
    pub mode: Mode,
    pub players: Vec<PlayerView>,
    pub pile: Vec<PileSlot>,
    pub drawn_card: Option<DrawnCardView>,
    pub pending_dnf: Option<usize>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_toggle_shuffle: bool,
    pub can_toggle_add_player: bool,
}

struct SnapshotBuffer {
    front: AppSnapshot,
    back: AppSnapshot,
}

impl SnapshotBuffer {
    fn new(state: &AppState) -> Self {
        let snapshot = build_snapshot_from_state(state);
        Self {
            front: snapshot.clone(),
            back: snapshot,
        }
    }

    fn refresh_from_state(&mut self, state: &AppState) {
        fill_snapshot_from_state(state, &mut self.back);
        std::mem::swap(&mut self.front, &mut self.back);
    }
}

struct AppState {
    store: GameStore,
    rules: TableRules,
    mode: Mode,
    gestures: GestureEngine<DragTarget>,
    players: Vec<Draggable<DragTarget>>,
    drawn_card: Draggable<DragTarget>,
    pending_dnf: Option<usize>,
    rng: SmallRng,
}

/// Session core: owns the game store, routes pointer input into gestures and
/// actions, persists the Root after every change and notifies subscribers.
pub struct AppCore {
    state: RefCell<AppState>,
    snapshots: RefCell<SnapshotBuffer>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
    storage: Rc<dyn SnapshotStorage>,
}

impl AppCore {
    pub fn new(rules: TableRules, storage: Rc<dyn SnapshotStorage>) -> Rc<Self> {
        Self::with_seed(rules, storage, time_nonce(0))
    }

    pub fn with_seed(rules: TableRules, storage: Rc<dyn SnapshotStorage>, seed: u32) -> Rc<Self> {
        let root = load_root(storage.as_ref(), &rules);
        let state = AppState::new(root, rules, seed);
        let snapshots = SnapshotBuffer::new(&state);
        Rc::new(Self {
            state: RefCell::new(state),
            snapshots: RefCell::new(snapshots),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            storage,
        })
    }

    pub fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.snapshots.borrow().front.clone()
    }

    pub fn mode(&self) -> Mode {
        self.state.borrow().mode
    }

    pub fn root(&self) -> Root {
        self.state.borrow().store.root().clone()
    }

    pub fn handle_input(&self, input: InputEvent, hit: Hit) {
        match input.kind {
            InputEventKind::Down => self.pointer_down(input.pointer, hit),
            InputEventKind::Move => self.pointer_move(input.pointer),
            InputEventKind::Up => self.pointer_up(input.pointer),
            InputEventKind::Cancel => self.pointer_cancel(input.pointer),
        }
    }

    pub fn pointer_down(&self, event: PointerEvent, hit: Hit) {
        if event.target == TargetKind::Control || !event.is_finite() {
            return;
        }
        let mut state = self.state.borrow_mut();
        state.pending_dnf = None;
        let point = event.point();
        let changed = match (state.mode, hit) {
            (Mode::PlacePlayer, _) => {
                state.mode = Mode::Idle;
                state.dispatch(&GameAction::AddPlayer {
                    position: point,
                    name: None,
                })
            }
            (Mode::ShuffleArmed, _) => state.begin_shuffle(&event),
            (Mode::ShuffleDragging, _)
                if state.gestures.target_of(event.identity) == Some(DragTarget::Pile) =>
            {
                state.begin_shuffle(&event)
            }
            (Mode::Idle, Hit::Surface) if state.store.game().card_pile.is_empty() => {
                state.begin_shuffle(&event)
            }
            (Mode::Idle, Hit::Pile) => state.draw_card(),
            (Mode::Idle, Hit::Player(index)) => {
                let state = &mut *state;
                let mode = state.mode;
                if let Some(binding) = state.players.get(index) {
                    binding.start(&mut state.gestures, &event, || mode == Mode::Idle);
                }
                false
            }
            (Mode::ChooseRecipient { .. }, Hit::Player(index)) => state.give_card(index),
            (Mode::ChooseRecipient { .. }, Hit::DrawnCard) => {
                let state = &mut *state;
                state.drawn_card.start(&mut state.gestures, &event, || true);
                false
            }
            _ => false,
        };
        state.sync_mode();
        drop(state);
        self.finish(changed);
    }

    pub fn pointer_move(&self, event: PointerEvent) {
        if !event.is_finite() {
            return;
        }
        let mut state = self.state.borrow_mut();
        let state_ref = &mut *state;
        let changed = match state_ref.gestures.target_of(event.identity) {
            Some(DragTarget::Pile) => {
                state_ref.gestures.move_to(&event);
                state_ref.mode == Mode::ShuffleDragging
                    && state_ref.dispatch(&GameAction::PushPile(event.point()))
            }
            Some(DragTarget::Player(index)) => {
                if let Some(binding) = state_ref.players.get(index) {
                    binding.move_to(&mut state_ref.gestures, &event);
                }
                false
            }
            Some(DragTarget::DrawnCard) => {
                state_ref
                    .drawn_card
                    .move_to(&mut state_ref.gestures, &event);
                false
            }
            None => return,
        };
        drop(state);
        self.finish(changed);
    }

    pub fn pointer_up(&self, event: PointerEvent) {
        if !event.is_finite() {
            self.pointer_cancel(event);
            return;
        }
        let mut state = self.state.borrow_mut();
        let state_ref = &mut *state;
        let changed = match state_ref.gestures.target_of(event.identity) {
            Some(DragTarget::Pile) => {
                state_ref.gestures.end(&event);
                if state_ref.mode == Mode::ShuffleDragging {
                    state_ref.mode = Mode::Idle;
                    let changed = state_ref.dispatch(&GameAction::PushPile(event.point()));
                    state_ref.sync_mode();
                    changed
                } else {
                    false
                }
            }
            Some(DragTarget::Player(index)) => {
                let mut committed = None;
                match state_ref.players.get(index) {
                    Some(binding) => {
                        binding.end(&mut state_ref.gestures, &event, |position| {
                            committed = Some(position)
                        });
                    }
                    None => {
                        state_ref.gestures.end(&event);
                    }
                }
                match committed {
                    Some(position) => state_ref.dispatch(&GameAction::Player {
                        index,
                        action: PlayerAction::Move(position),
                    }),
                    None => false,
                }
            }
            Some(DragTarget::DrawnCard) => {
                let mut committed = None;
                state_ref
                    .drawn_card
                    .end(&mut state_ref.gestures, &event, |position| {
                        committed = Some(position)
                    });
                if let Some(position) = committed {
                    state_ref.drawn_card.sync(position);
                }
                false
            }
            None => return,
        };
        drop(state);
        self.finish(changed);
    }

    /// Ends the pointer's gesture where it started, so nothing is committed.
    /// A cancelled shuffle keeps the trail laid so far.
    pub fn pointer_cancel(&self, event: PointerEvent) {
        let (target, start) = {
            let state = self.state.borrow();
            let Some(gesture) = state.gestures.gesture(event.identity) else {
                return;
            };
            (gesture.target, gesture.start)
        };
        if target == DragTarget::Pile {
            let mut state = self.state.borrow_mut();
            state.gestures.end(&PointerEvent::new(
                event.identity,
                start.x,
                start.y,
                event.target,
            ));
            if state.mode == Mode::ShuffleDragging {
                state.mode = Mode::Idle;
                state.sync_mode();
            }
            drop(state);
            self.finish(false);
            return;
        }
        self.pointer_up(PointerEvent::new(
            event.identity,
            start.x,
            start.y,
            event.target,
        ));
    }

    pub fn toggle_shuffle(&self) {
        let mut state = self.state.borrow_mut();
        let next = match state.mode {
            Mode::Idle if !state.store.game().card_pile.is_empty() => Mode::ShuffleArmed,
            Mode::ShuffleArmed => Mode::Idle,
            _ => return,
        };
        state.mode = next;
        state.pending_dnf = None;
        drop(state);
        self.finish(false);
    }

    pub fn toggle_add_player(&self) {
        let mut state = self.state.borrow_mut();
        let next = match state.mode {
            Mode::Idle => Mode::PlacePlayer,
            Mode::PlacePlayer => Mode::Idle,
            _ => return,
        };
        state.mode = next;
        state.pending_dnf = None;
        drop(state);
        self.finish(false);
    }

    pub fn draw_card(&self) {
        let changed = self.state.borrow_mut().draw_card();
        self.finish(changed);
    }

    pub fn give_card(&self, player: usize) {
        let changed = self.state.borrow_mut().give_card(player);
        self.finish(changed);
    }

    pub fn discard_drawn_card(&self) {
        let mut state = self.state.borrow_mut();
        let changed = state.dispatch(&GameAction::DiscardDrawnCard);
        state.sync_mode();
        drop(state);
        self.finish(changed);
    }

    pub fn set_player_name(&self, index: usize, name: &str) {
        self.player_action(index, PlayerAction::SetName(name.to_string()));
    }

    pub fn clear_player_cards(&self, index: usize) {
        self.player_action(index, PlayerAction::ClearCards);
    }

    /// First call arms the confirmation, a second call for the same player
    /// hides it for good.
    pub fn request_hide(&self, index: usize) {
        let mut state = self.state.borrow_mut();
        if state.choosing_recipient() || state.store.game().player(index).is_none() {
            return;
        }
        let changed = if state.pending_dnf == Some(index) {
            state.pending_dnf = None;
            state.dispatch(&GameAction::Player {
                index,
                action: PlayerAction::Hide,
            })
        } else {
            state.pending_dnf = Some(index);
            false
        };
        drop(state);
        self.finish(changed);
    }

    pub fn undo(&self) {
        self.replay(GameStore::undo);
    }

    pub fn redo(&self) {
        self.replay(GameStore::redo);
    }

    /// Drops the saved session and starts an empty game.
    pub fn reset(&self) {
        clear_root(self.storage.as_ref());
        let mut state = self.state.borrow_mut();
        let history_limit = state.rules.history_limit;
        state.store = GameStore::with_history_limit(Root::default(), history_limit);
        state.mode = Mode::Idle;
        state.pending_dnf = None;
        state.gestures = GestureEngine::new();
        state.drawn_card.sync(DRAWN_CARD_HOME);
        state.sync_bindings();
        drop(state);
        self.finish(false);
    }

    fn player_action(&self, index: usize, action: PlayerAction) {
        let mut state = self.state.borrow_mut();
        if state.choosing_recipient() {
            return;
        }
        state.pending_dnf = None;
        let changed = state.dispatch(&GameAction::Player { index, action });
        drop(state);
        self.finish(changed);
    }

    fn replay(&self, step: fn(&mut GameStore) -> bool) {
        let mut state = self.state.borrow_mut();
        if state.mode == Mode::ShuffleDragging {
            return;
        }
        let changed = step(&mut state.store);
        if changed {
            state.pending_dnf = None;
            state.sync_bindings();
            state.sync_mode();
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::log!(
                    "history: replayed",
                    state.store.log().undo_len(),
                    state.store.log().redo_len()
                );
            }
        }
        drop(state);
        self.finish(changed);
    }

    fn finish(&self, changed: bool) {
        if changed {
            let root = self.state.borrow().store.root().clone();
            save_root(self.storage.as_ref(), &root);
        }
        self.notify();
    }

    fn notify(&self) {
        self.refresh_snapshot_from_state();
        self.notify_subscribers();
    }

    fn notify_subscribers(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    fn refresh_snapshot_from_state(&self) {
        let state = self.state.borrow();
        let mut snapshots = self.snapshots.borrow_mut();
        snapshots.refresh_from_state(&state);
    }
}

pub struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

impl AppState {
    fn new(root: Root, rules: TableRules, seed: u32) -> Self {
        let mut state = Self {
            store: GameStore::with_history_limit(root, rules.history_limit),
            rules,
            mode: Mode::Idle,
            gestures: GestureEngine::new(),
            players: Vec::new(),
            drawn_card: Draggable::new(DragTarget::DrawnCard, DRAWN_CARD_HOME),
            pending_dnf: None,
            rng: SmallRng::seed_from_u64(u64::from(splitmix32(seed))),
        };
        state.sync_bindings();
        state.sync_mode();
        state
    }

    fn dispatch(&mut self, action: &GameAction) -> bool {
        let changed = self.store.dispatch(action).is_some();
        if changed {
            self.sync_bindings();
        }
        changed
    }

    fn choosing_recipient(&self) -> bool {
        matches!(self.mode, Mode::ChooseRecipient { .. })
    }

    fn begin_shuffle(&mut self, event: &PointerEvent) -> bool {
        if !self.gestures.start(DragTarget::Pile, event, || true) {
            return false;
        }
        self.mode = Mode::ShuffleDragging;
        self.dispatch(&GameAction::RestartPile(event.point()))
    }

    fn draw_card(&mut self) -> bool {
        if self.mode != Mode::Idle || self.rules.deck_size == 0 {
            return false;
        }
        let candidate = self.rng.random_range(0..self.rules.deck_size);
        let changed = self.dispatch(&GameAction::DrawCard(candidate));
        if changed {
            self.drawn_card.sync(DRAWN_CARD_HOME);
        }
        self.sync_mode();
        changed
    }

    fn give_card(&mut self, player: usize) -> bool {
        if !self.choosing_recipient() {
            return false;
        }
        let changed = self.dispatch(&GameAction::GiveCard { player });
        self.sync_mode();
        changed
    }

    /// A pending drawn card always means choosing a recipient. A running
    /// shuffle drag is left alone until it ends.
    fn sync_mode(&mut self) {
        match (self.store.game().drawn_card, self.mode) {
            (Some(_), Mode::ShuffleDragging) => {}
            (Some(card), _) => self.mode = Mode::ChooseRecipient { card },
            (None, Mode::ChooseRecipient { .. }) => self.mode = Mode::Idle,
            _ => {}
        }
    }

    fn sync_bindings(&mut self) {
        let players = &self.store.game().players;
        self.players.truncate(players.len());
        for (index, player) in players.iter().enumerate() {
            match self.players.get_mut(index) {
                Some(binding) => binding.sync(player.position),
                None => self
                    .players
                    .push(Draggable::new(DragTarget::Player(index), player.position)),
            }
        }
    }
}

fn build_snapshot_from_state(state: &AppState) -> AppSnapshot {
    let mut snapshot = AppSnapshot {
        root: Root::default(),
        mode: Mode::Idle,
        players: Vec::new(),
        pile: Vec::new(),
        drawn_card: None,
        pending_dnf: None,
        can_undo: false,
        can_redo: false,
        can_toggle_shuffle: false,
        can_toggle_add_player: false,
    };
    fill_snapshot_from_state(state, &mut snapshot);
    snapshot
}

fn fill_snapshot_from_state(state: &AppState, snapshot: &mut AppSnapshot) {
    let game = state.store.game();
    snapshot.root.clone_from(state.store.root());
    snapshot.mode = state.mode;
    snapshot.players.clear();
    for (index, player) in game.players.iter().enumerate() {
        if player.hidden {
            continue;
        }
        let binding = state.players.get(index);
        snapshot.players.push(PlayerView {
            index,
            name: player.name.clone(),
            cards: player.cards.clone(),
            position: binding
                .map(|binding| binding.rendered_position(&state.gestures))
                .unwrap_or(player.position),
            dragging: binding
                .map(|binding| binding.is_dragging(&state.gestures))
                .unwrap_or(false),
        });
    }
    snapshot.pile = cluster_pile(&game.card_pile.positions, state.rules.pile_min_distance);
    snapshot.drawn_card = game.drawn_card.map(|card| DrawnCardView {
        card,
        position: state.drawn_card.rendered_position(&state.gestures),
        dragging: state.drawn_card.is_dragging(&state.gestures),
    });
    snapshot.pending_dnf = state.pending_dnf;
    snapshot.can_undo = state.store.log().can_undo();
    snapshot.can_redo = state.store.log().can_redo();
    snapshot.can_toggle_shuffle = match state.mode {
        Mode::Idle => !game.card_pile.is_empty(),
        Mode::ShuffleArmed => true,
        _ => false,
    };
    snapshot.can_toggle_add_player = matches!(state.mode, Mode::Idle | Mode::PlacePlayer);
}

fn time_nonce(previous: u32) -> u32 {
    #[cfg(target_arch = "wasm32")]
    {
        let now = Date::now() as u32;
        return splitmix32(now ^ previous.wrapping_add(0x9E37_79B9));
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|duration| duration.as_millis() as u32)
            .unwrap_or(0);
        return splitmix32(now ^ previous.wrapping_add(0x9E37_79B9));
    }
}
