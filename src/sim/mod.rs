//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (level generation)
//! - Stable iteration order (shapes and connectors by id/insertion order)
//! - One pointer event mutates state synchronously, then the frontend redraws
//! - No rendering or platform dependencies

pub mod elastic;
pub mod geometry;
pub mod level;
pub mod state;
pub mod validate;

pub use elastic::{Drag, DragOutcome, Waypoint, begin_drag, cursor_move, end_drag};
pub use geometry::{bend_direction, dist_to_segment, segment_hits_circle, segments_cross};
pub use level::generate_level;
pub use state::{Connector, GamePhase, GameState, Shape, ShapeKind};
pub use validate::{path_crosses_any, paths_cross};
