//! Render-model output
//!
//! The core never draws. Each frame the frontend asks for a [`Scene`]: a flat
//! list of stroke polylines and shape sprites, rebuilt in full (no dirty
//! tracking), and strokes it however it likes - canvas, SVG, terminal.

use glam::Vec2;

use crate::Settings;
use crate::sim::{GamePhase, GameState, ShapeKind};

/// A polyline to stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// At least 2 points
    pub points: Vec<Vec2>,
    /// 0xRRGGBB
    pub color: u32,
    pub width: f32,
    pub alpha: f32,
}

/// A shape sprite to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub id: u32,
    pub pos: Vec2,
    pub kind: ShapeKind,
    pub color: u32,
    pub connected: bool,
    /// Drag-start shape while a drag is active (drawn scaled up)
    pub highlighted: bool,
    /// Pair partner of the dragged shape, when hints are enabled
    pub hinted: bool,
}

/// Everything the frontend needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Committed connectors first, then the live path (if dragging),
    /// in paint order
    pub strokes: Vec<Polyline>,
    pub sprites: Vec<Sprite>,
    pub phase: GamePhase,
    pub level: u32,
}

/// Build the scene for the current state.
pub fn build_scene(state: &GameState, settings: &Settings) -> Scene {
    let mut strokes = Vec::with_capacity(state.connectors.len() + 1);

    for connector in &state.connectors {
        strokes.push(Polyline {
            points: connector.path.clone(),
            color: connector.color,
            width: settings.connector_stroke_width,
            alpha: 1.0,
        });
    }

    let drag = state.drag.as_ref();
    if let Some(drag) = drag {
        if drag.path.len() >= 2 {
            let color = state
                .shape(drag.start_id)
                .map(|s| s.color)
                .unwrap_or(0xFFFFFF);
            strokes.push(Polyline {
                points: drag.path.clone(),
                color,
                width: settings.live_stroke_width,
                alpha: settings.live_stroke_alpha,
            });
        }
    }

    let drag_pair = drag.and_then(|d| state.shape(d.start_id)).map(|s| s.pair_id);
    let sprites = state
        .shapes
        .iter()
        .map(|s| {
            let is_start = drag.is_some_and(|d| d.start_id == s.id);
            let is_partner =
                !is_start && drag_pair == Some(s.pair_id) && !s.connected;
            Sprite {
                id: s.id,
                pos: s.pos,
                kind: s.kind,
                color: s.color,
                connected: s.connected,
                highlighted: is_start && !settings.reduced_motion,
                hinted: is_partner && settings.show_hints,
            }
        })
        .collect();

    Scene {
        strokes,
        sprites,
        phase: state.phase,
        level: state.level,
    }
}
