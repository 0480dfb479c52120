//! Normalized pointer input
//!
//! Frontends (mouse or touch) reduce their events to a single pointer in
//! board coordinates; this module hit-tests the shape under it and makes the
//! three synchronous engine calls. No buffering: one event, one state update.

use glam::Vec2;

use crate::sim::{self, DragOutcome, GameState};

/// A pointer event in board coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { pos: Vec2 },
    Move { pos: Vec2 },
    Up { pos: Vec2 },
}

/// Feed one pointer event into the engine.
///
/// Returns the drag outcome for `Up` events that ended an active drag,
/// `None` otherwise.
pub fn handle_pointer(state: &mut GameState, event: PointerEvent) -> Option<DragOutcome> {
    match event {
        PointerEvent::Down { pos } => {
            if let Some(id) = state.shape_at(pos) {
                sim::begin_drag(state, id, pos);
            }
            None
        }
        PointerEvent::Move { pos } => {
            sim::cursor_move(state, pos);
            None
        }
        PointerEvent::Up { pos } => {
            if state.drag.is_none() {
                return None;
            }
            let end = state.shape_at(pos);
            Some(sim::end_drag(state, end))
        }
    }
}
