//! Board state and core puzzle types
//!
//! Everything the frontend needs to redraw the board lives here; the
//! in-progress drag is transient and skipped during serialization.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::elastic::Drag;
use crate::consts::SHAPE_RADIUS;

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pairs remain to be connected
    Playing,
    /// Every shape is connected; waiting for next-level input
    Won,
}

/// Visual variant of a shape
///
/// Purely cosmetic: collision and routing treat every shape as a circle of
/// [`SHAPE_RADIUS`]. The frontend picks the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Triangle,
    Square,
    Circle,
    Diamond,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Diamond => "diamond",
        }
    }
}

/// A placed shape
///
/// Exactly two shapes share a `pair_id`. Once `connected` is set the shape is
/// out of play: never a drag endpoint, never a waypoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    /// Center position in board units
    pub pos: Vec2,
    pub kind: ShapeKind,
    /// 0xRRGGBB, shared by both shapes of a pair and their connector
    pub color: u32,
    pub pair_id: u32,
    pub connected: bool,
}

/// A finalized, validated connector linking two same-pair shapes
///
/// Immutable once created. Destroyed only by the board-wide invalidation in
/// [`super::elastic::end_drag`] or by a level change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    /// Start center, committed waypoints in order, end center. Always >= 2 points.
    pub path: Vec<Vec2>,
    pub color: u32,
    pub pair_id: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed; level layouts derive from it
    pub seed: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Board dimensions in board units (shape placement respects a margin)
    pub board_size: Vec2,
    pub phase: GamePhase,
    /// Placed shapes, stable order by id
    pub shapes: Vec<Shape>,
    /// Committed connectors in completion order
    pub connectors: Vec<Connector>,
    /// In-progress drag, if any. Transient.
    #[serde(skip)]
    pub drag: Option<Drag>,
    next_id: u32,
}

impl GameState {
    /// Create a new game at level 1 with the given seed and board size
    pub fn new(seed: u64, board_size: Vec2) -> Self {
        let mut state = Self {
            seed,
            level: 1,
            board_size,
            phase: GamePhase::Playing,
            shapes: Vec::new(),
            connectors: Vec::new(),
            drag: None,
            next_id: 1,
        };
        super::level::generate_level(&mut state);
        state
    }

    /// Allocate a new shape ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn shape(&self, id: u32) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn shape_mut(&mut self, id: u32) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Hit-test the pointer against shape collision circles.
    ///
    /// Returns the nearest shape whose circle contains `pos`.
    pub fn shape_at(&self, pos: Vec2) -> Option<u32> {
        self.shapes
            .iter()
            .map(|s| (s.id, (s.pos - pos).length()))
            .filter(|(_, d)| *d <= SHAPE_RADIUS)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }

    /// Board-wide invalidation: drop every connector and reset every shape.
    pub fn clear_connections(&mut self) {
        log::info!("Clearing all {} connectors", self.connectors.len());
        self.connectors.clear();
        for shape in &mut self.shapes {
            shape.connected = false;
        }
        self.phase = GamePhase::Playing;
    }

    /// Win condition: every placed shape is connected.
    pub fn all_connected(&self) -> bool {
        !self.shapes.is_empty() && self.shapes.iter().all(|s| s.connected)
    }

    /// Advance to the next level and regenerate the board.
    pub fn next_level(&mut self) {
        self.level += 1;
        super::level::generate_level(self);
    }

    /// Regenerate the current level, dropping all progress on it.
    pub fn restart_level(&mut self) {
        super::level::generate_level(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> GameState {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.shapes.clear();
        state
    }

    fn push_shape(state: &mut GameState, pos: Vec2, pair_id: u32) -> u32 {
        let id = state.next_entity_id();
        state.shapes.push(Shape {
            id,
            pos,
            kind: ShapeKind::Circle,
            color: 0xFF6B6B,
            pair_id,
            connected: false,
        });
        id
    }

    #[test]
    fn test_shape_at_picks_nearest() {
        let mut state = test_state();
        let a = push_shape(&mut state, Vec2::new(100.0, 100.0), 0);
        let b = push_shape(&mut state, Vec2::new(130.0, 100.0), 1);

        // Between the two but closer to b, inside both circles
        assert_eq!(state.shape_at(Vec2::new(118.0, 100.0)), Some(b));
        assert_eq!(state.shape_at(Vec2::new(106.0, 100.0)), Some(a));
        // Outside every circle
        assert_eq!(state.shape_at(Vec2::new(300.0, 300.0)), None);
    }

    #[test]
    fn test_clear_connections_resets_everything() {
        let mut state = test_state();
        let a = push_shape(&mut state, Vec2::new(100.0, 100.0), 0);
        let b = push_shape(&mut state, Vec2::new(400.0, 100.0), 0);
        state.shape_mut(a).unwrap().connected = true;
        state.shape_mut(b).unwrap().connected = true;
        state.connectors.push(Connector {
            path: vec![Vec2::new(100.0, 100.0), Vec2::new(400.0, 100.0)],
            color: 0xFF6B6B,
            pair_id: 0,
        });
        state.phase = GamePhase::Won;

        state.clear_connections();
        assert!(state.connectors.is_empty());
        assert!(state.shapes.iter().all(|s| !s.connected));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_serde_round_trip_skips_drag() {
        let mut state = GameState::new(42, Vec2::new(800.0, 600.0));
        let start = state.shapes[0].clone();
        state.drag = Some(Drag::new(start.id, start.pos, start.pos));

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.level, state.level);
        assert_eq!(restored.shapes.len(), state.shapes.len());
        assert!(restored.drag.is_none());
    }
}
