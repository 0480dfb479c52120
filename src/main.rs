//! Yarn Connect headless demo
//!
//! Generates a level and plays it with a scripted pointer: each pair is
//! dragged from one member to its partner in small steps, so the elastic
//! router commits waypoints around whatever shapes are in the way. Run with
//! `RUST_LOG=debug` to watch commits and retractions.

use glam::Vec2;
use yarn_connect::Settings;
use yarn_connect::input::{PointerEvent, handle_pointer};
use yarn_connect::scene::build_scene;
use yarn_connect::sim::{DragOutcome, GamePhase, GameState};

const BOARD: Vec2 = Vec2::new(1280.0, 800.0);
const DRAG_STEPS: u32 = 24;
const MAX_ROUNDS: u32 = 10;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42u64);
    log::info!("Yarn Connect demo starting, seed {seed}");

    let mut state = GameState::new(seed, BOARD);
    let settings = Settings::default();

    for shape in &state.shapes {
        println!(
            "shape {:2}  pair {}  {:8}  ({:6.1}, {:6.1})",
            shape.id,
            shape.pair_id,
            shape.kind.as_str(),
            shape.pos.x,
            shape.pos.y
        );
    }

    let mut rounds = 0;
    while state.phase != GamePhase::Won && rounds < MAX_ROUNDS {
        rounds += 1;
        for (a, b) in pending_pairs(&state) {
            let outcome = drag_between(&mut state, a, b);
            println!("drag {a} -> {b}: {outcome:?}");
            if outcome == DragOutcome::Invalidated {
                // Board was reset; start the round over
                break;
            }
        }
    }

    let scene = build_scene(&state, &settings);
    println!(
        "finished after {rounds} round(s): phase {:?}, {} connector(s), {} stroke(s)",
        scene.phase,
        state.connectors.len(),
        scene.strokes.len()
    );
    for connector in &state.connectors {
        println!(
            "  pair {} routed through {} point(s)",
            connector.pair_id,
            connector.path.len()
        );
    }
}

/// Unconnected pairs as (shape id, partner id), lowest pair first.
fn pending_pairs(state: &GameState) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for shape in state.shapes.iter().filter(|s| !s.connected) {
        if let Some(partner) = state
            .shapes
            .iter()
            .find(|p| p.pair_id == shape.pair_id && p.id != shape.id)
        {
            if shape.id < partner.id {
                pairs.push((shape.id, partner.id));
            }
        }
    }
    pairs.sort();
    pairs
}

/// Scripted drag: press on `a`, glide to `b`, release.
fn drag_between(state: &mut GameState, a: u32, b: u32) -> DragOutcome {
    let (from, to) = match (state.shape(a), state.shape(b)) {
        (Some(sa), Some(sb)) => (sa.pos, sb.pos),
        _ => return DragOutcome::Abandoned,
    };

    handle_pointer(state, PointerEvent::Down { pos: from });
    for step in 1..=DRAG_STEPS {
        let t = step as f32 / DRAG_STEPS as f32;
        let pos = from.lerp(to, t);
        handle_pointer(state, PointerEvent::Move { pos });
    }
    handle_pointer(state, PointerEvent::Up { pos: to }).unwrap_or(DragOutcome::Abandoned)
}
