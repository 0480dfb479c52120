//! Level generation
//!
//! Places shape pairs at random positions with a minimum spacing, seeded so a
//! given (seed, level) always produces the same board.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GamePhase, GameState, Shape, ShapeKind};
use crate::consts::{
    BOARD_MARGIN, MAX_PAIRS, MAX_PLACEMENT_ATTEMPTS, MIN_SHAPE_SPACING, PALETTE,
};

const KINDS: [ShapeKind; 4] = [
    ShapeKind::Triangle,
    ShapeKind::Square,
    ShapeKind::Circle,
    ShapeKind::Diamond,
];

/// Number of pairs for a level: ramps by one every other level, capped.
pub fn pair_count(level: u32) -> u32 {
    (2 + level / 2).min(MAX_PAIRS)
}

/// (Re)generate the board for the state's current level.
///
/// Drops all shapes, connectors and any in-progress drag. Placement is
/// rejection-sampled against the minimum spacing; after the attempt cap the
/// last candidate is accepted rather than looping forever on a crowded board.
pub fn generate_level(state: &mut GameState) {
    let pairs = pair_count(state.level);
    log::info!("Generating level {} with {} pairs", state.level, pairs);

    state.shapes.clear();
    state.connectors.clear();
    state.drag = None;
    state.phase = GamePhase::Playing;

    // Per-level stream so replaying a level reshuffles nothing
    let stream = state.seed ^ (state.level as u64).wrapping_mul(0x9E3779B97F4A7C15);
    let mut rng = Pcg32::seed_from_u64(stream);

    for pair_id in 0..pairs {
        let color = PALETTE[pair_id as usize % PALETTE.len()];
        let kind = KINDS[pair_id as usize % KINDS.len()];

        for _ in 0..2 {
            let pos = place_shape(&mut rng, state);
            let id = state.next_entity_id();
            state.shapes.push(Shape {
                id,
                pos,
                kind,
                color,
                pair_id,
                connected: false,
            });
        }
    }
}

/// Pick a position inside the margins, at least [`MIN_SHAPE_SPACING`] from
/// every placed shape when possible.
fn place_shape(rng: &mut Pcg32, state: &GameState) -> Vec2 {
    let mut pos = random_point(rng, state.board_size);
    let mut attempts = 0;
    while too_close(pos, state) && attempts < MAX_PLACEMENT_ATTEMPTS {
        pos = random_point(rng, state.board_size);
        attempts += 1;
    }
    if attempts >= MAX_PLACEMENT_ATTEMPTS {
        log::warn!(
            "Placement gave up after {} attempts; board {}x{} is crowded",
            attempts,
            state.board_size.x,
            state.board_size.y
        );
    }
    pos
}

fn random_point(rng: &mut Pcg32, board_size: Vec2) -> Vec2 {
    let usable_w = (board_size.x - 2.0 * BOARD_MARGIN).max(0.0);
    let usable_h = (board_size.y - 2.0 * BOARD_MARGIN).max(0.0);
    Vec2::new(
        BOARD_MARGIN + rng.random_range(0.0..=usable_w),
        BOARD_MARGIN + rng.random_range(0.0..=usable_h),
    )
}

fn too_close(pos: Vec2, state: &GameState) -> bool {
    state
        .shapes
        .iter()
        .any(|s| (s.pos - pos).length() < MIN_SHAPE_SPACING)
}
