//! Yarn Connect - a connect-the-shapes puzzle game
//!
//! Core modules:
//! - `sim`: Deterministic game core (geometry, elastic routing, validation, levels)
//! - `scene`: Render-model output consumed by a drawing frontend
//! - `input`: Normalized pointer events and dispatch into the core
//! - `settings`: Player preferences with JSON persistence

pub mod input;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{DragOutcome, GamePhase, GameState};

/// Game tuning constants
pub mod consts {
    /// Collision radius of a shape, in board units.
    ///
    /// Used both for segment-vs-shape waypoint commitment and for pointer
    /// hit-testing, matching the visual footprint of a 50x50 sprite.
    pub const SHAPE_RADIUS: f32 = 25.0;

    /// Hysteresis threshold for waypoint retraction.
    ///
    /// The bend direction at a waypoint is an unnormalized perp-dot product,
    /// so its magnitude scales with segment lengths; 100.0 is tuned so the
    /// live path doesn't flicker when the cursor sits near a colinear
    /// configuration.
    pub const BEND_REVERSAL_THRESHOLD: f32 = 100.0;

    /// Open-interval band excluded at segment endpoints when testing
    /// connector crossings. Keeps paths that meet near a shared shape
    /// anchor from being flagged as crossing.
    pub const SEGMENT_EPSILON: f32 = 0.01;

    /// Minimum center-to-center spacing between placed shapes.
    pub const MIN_SHAPE_SPACING: f32 = 80.0;

    /// Margin kept between shapes and the board edges at placement time.
    pub const BOARD_MARGIN: f32 = 100.0;

    /// Placement rejection-sampling cap per shape.
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Pair count ramps with level, capped here.
    pub const MAX_PAIRS: u32 = 8;

    /// Stroke width for committed connectors.
    pub const CONNECTOR_STROKE_WIDTH: f32 = 5.0;
    /// Stroke width for the in-progress (elastic) line.
    pub const LIVE_STROKE_WIDTH: f32 = 3.0;
    /// Alpha for the in-progress line.
    pub const LIVE_STROKE_ALPHA: f32 = 0.7;

    /// Connector color palette (0xRRGGBB), cycled by pair id.
    pub const PALETTE: [u32; 6] = [
        0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0xFFA726, 0xAB47BC, 0x66BB6A,
    ];
}
