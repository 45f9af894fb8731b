use std::collections::HashMap;
use std::hash::Hash;

use cardtable_core::Point2;

/// Logical source of a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerIdentity {
    Mouse,
    Touch(i32),
}

impl PointerIdentity {
    pub fn from_pointer_type(value: &str, pointer_id: i32) -> Self {
        match value {
            "touch" | "pen" => PointerIdentity::Touch(pointer_id),
            _ => PointerIdentity::Mouse,
        }
    }
}

/// What the pointer landed on. Controls (buttons, inputs) never start a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Control,
    Surface,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub identity: PointerIdentity,
    pub x: f32,
    pub y: f32,
    pub target: TargetKind,
}

impl PointerEvent {
    pub fn new(identity: PointerIdentity, x: f32, y: f32, target: TargetKind) -> Self {
        Self {
            identity,
            x,
            y,
            target,
        }
    }

    pub fn surface(identity: PointerIdentity, x: f32, y: f32) -> Self {
        Self::new(identity, x, y, TargetKind::Surface)
    }

    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.point().is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub kind: InputEventKind,
    pub pointer: PointerEvent,
}

/// A live drag: where it started and how far it has moved. The delta is only
/// buffered here; nothing is committed until the gesture ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveGesture<K> {
    pub target: K,
    pub start: Point2,
    pub delta: Point2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEnd<K> {
    pub target: K,
    pub start: Point2,
    pub delta: Point2,
}

impl<K> GestureEnd<K> {
    /// A zero-delta end is a tap, not a drag.
    pub fn moved(&self) -> bool {
        !self.delta.is_zero()
    }
}

/// Drag state for every pointer identity, each bound to one target.
///
/// A target is driven by at most one identity at a time; the first gesture on
/// a target wins. Gestures on different targets run side by side.
pub struct GestureEngine<K> {
    active: HashMap<PointerIdentity, ActiveGesture<K>>,
}

impl<K> Default for GestureEngine<K> {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> GestureEngine<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture of `event.identity` on `target`.
    ///
    /// `permit` is the caller's gate (e.g. "no exclusive mode is running"). A
    /// gesture this identity left behind on another target is dropped.
    pub fn start<F>(&mut self, target: K, event: &PointerEvent, permit: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if event.target == TargetKind::Control {
            return false;
        }
        if let Some(owner) = self.owner(target) {
            if owner != event.identity {
                return false;
            }
        }
        if !permit() {
            return false;
        }
        self.active.insert(
            event.identity,
            ActiveGesture {
                target,
                start: event.point(),
                delta: Point2::ZERO,
            },
        );
        true
    }

    pub fn move_to(&mut self, event: &PointerEvent) -> Option<ActiveGesture<K>> {
        let gesture = self.active.get_mut(&event.identity)?;
        gesture.delta = event.point() - gesture.start;
        Some(*gesture)
    }

    pub fn end(&mut self, event: &PointerEvent) -> Option<GestureEnd<K>> {
        let gesture = self.active.remove(&event.identity)?;
        Some(GestureEnd {
            target: gesture.target,
            start: gesture.start,
            delta: event.point() - gesture.start,
        })
    }

    pub fn gesture(&self, identity: PointerIdentity) -> Option<&ActiveGesture<K>> {
        self.active.get(&identity)
    }

    pub fn target_of(&self, identity: PointerIdentity) -> Option<K> {
        self.active.get(&identity).map(|gesture| gesture.target)
    }

    pub fn owner(&self, target: K) -> Option<PointerIdentity> {
        self.active
            .iter()
            .find(|(_, gesture)| gesture.target == target)
            .map(|(identity, _)| *identity)
    }

    pub fn is_active(&self, target: K) -> bool {
        self.owner(target).is_some()
    }

    /// Buffered delta on `target`, zero when idle.
    pub fn delta(&self, target: K) -> Point2 {
        self.active
            .values()
            .find(|gesture| gesture.target == target)
            .map(|gesture| gesture.delta)
            .unwrap_or(Point2::ZERO)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
