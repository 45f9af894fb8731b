use std::hash::Hash;

use cardtable_core::Point2;

use crate::input::{GestureEngine, PointerEvent};

/// Binds gestures on one target to a movable entity's position.
///
/// The binding never writes the entity: a finished drag hands the new absolute
/// position to the caller's commit callback, and the caller pushes the
/// committed value back through [`Draggable::sync`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Draggable<K> {
    target: K,
    position: Point2,
}

impl<K: Copy + Eq + Hash> Draggable<K> {
    pub fn new(target: K, position: Point2) -> Self {
        Self { target, position }
    }

    pub fn target(&self) -> K {
        self.target
    }

    /// Last committed position.
    pub fn position(&self) -> Point2 {
        self.position
    }

    pub fn sync(&mut self, position: Point2) {
        self.position = position;
    }

    /// Committed position plus the live, uncommitted drag delta.
    pub fn rendered_position(&self, engine: &GestureEngine<K>) -> Point2 {
        self.position + engine.delta(self.target)
    }

    pub fn is_dragging(&self, engine: &GestureEngine<K>) -> bool {
        engine.is_active(self.target)
    }

    pub fn start<F>(&self, engine: &mut GestureEngine<K>, event: &PointerEvent, permit: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        engine.start(self.target, event, permit)
    }

    pub fn move_to(&self, engine: &mut GestureEngine<K>, event: &PointerEvent) -> bool {
        if engine.target_of(event.identity) != Some(self.target) {
            return false;
        }
        engine.move_to(event).is_some()
    }

    /// Ends this binding's gesture. `commit` runs only when the pointer
    /// actually moved. Returns whether a gesture of this binding ended.
    pub fn end<F>(&self, engine: &mut GestureEngine<K>, event: &PointerEvent, commit: F) -> bool
    where
        F: FnOnce(Point2),
    {
        if engine.target_of(event.identity) != Some(self.target) {
            return false;
        }
        let Some(end) = engine.end(event) else {
            return false;
        };
        if end.moved() {
            commit(self.position + end.delta);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerIdentity;

    fn mouse(x: f32, y: f32) -> PointerEvent {
        PointerEvent::surface(PointerIdentity::Mouse, x, y)
    }

    #[test]
    fn rendered_position_follows_buffered_delta() {
        let mut engine = GestureEngine::new();
        let token = Draggable::new(0u8, Point2::new(100.0, 100.0));
        assert!(token.start(&mut engine, &mouse(10.0, 10.0), || true));
        assert!(token.move_to(&mut engine, &mouse(25.0, 5.0)));
        assert_eq!(token.rendered_position(&engine), Point2::new(115.0, 95.0));
        assert_eq!(token.position(), Point2::new(100.0, 100.0));
    }

    #[test]
    fn end_commits_absolute_position() {
        let mut engine = GestureEngine::new();
        let token = Draggable::new(0u8, Point2::new(100.0, 100.0));
        token.start(&mut engine, &mouse(10.0, 10.0), || true);
        token.move_to(&mut engine, &mouse(12.0, 12.0));
        let mut committed = None;
        assert!(token.end(&mut engine, &mouse(30.0, 40.0), |pos| committed = Some(pos)));
        assert_eq!(committed, Some(Point2::new(120.0, 130.0)));
        assert_eq!(token.rendered_position(&engine), Point2::new(100.0, 100.0));
    }

    #[test]
    fn tap_does_not_commit() {
        let mut engine = GestureEngine::new();
        let token = Draggable::new(0u8, Point2::new(5.0, 5.0));
        token.start(&mut engine, &mouse(1.0, 1.0), || true);
        token.move_to(&mut engine, &mouse(20.0, 20.0));
        let mut committed = false;
        assert!(token.end(&mut engine, &mouse(1.0, 1.0), |_| committed = true));
        assert!(!committed);
    }

    #[test]
    fn ignores_gestures_of_other_targets() {
        let mut engine = GestureEngine::new();
        let first = Draggable::new(1u8, Point2::ZERO);
        let second = Draggable::new(2u8, Point2::ZERO);
        first.start(&mut engine, &mouse(0.0, 0.0), || true);
        assert!(!second.move_to(&mut engine, &mouse(5.0, 5.0)));
        assert!(!second.end(&mut engine, &mouse(5.0, 5.0), |_| {}));
        assert!(first.is_dragging(&engine));
        assert_eq!(second.rendered_position(&engine), Point2::ZERO);
    }
}
