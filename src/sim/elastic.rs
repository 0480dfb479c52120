//! Elastic path routing
//!
//! The tricky part of Yarn Connect: while the player drags a connector, the
//! line behaves like a thread pulled taut around the other shapes. A naive
//! recompute-from-scratch elastic band jitters between alternate routings
//! whenever the cursor sits near a threshold position, so the router commits
//! a waypoint the moment the live segment crosses a shape and only undoes it
//! when the bend at that waypoint clearly reverses direction (hysteresis).
//!
//! Per cursor update: at most one contiguous waypoint suffix is retracted,
//! then the path is rebuilt, then at most one new waypoint is committed.

use glam::Vec2;

use super::geometry::{bend_direction, segment_hits_circle};
use super::state::{Connector, GamePhase, GameState};
use super::validate::path_crosses_any;
use crate::consts::{BEND_REVERSAL_THRESHOLD, SHAPE_RADIUS};

/// A committed bend point on the in-progress connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Shape center, copied at commitment time
    pub pos: Vec2,
    /// Signed perp-dot of entry/exit vectors, recorded at commitment.
    /// Positive = counterclockwise, negative = clockwise.
    pub bend_direction: f32,
}

/// State of the drag in progress
///
/// Owned by [`GameState`] for the duration of one drag and discarded at drag
/// end regardless of outcome.
#[derive(Debug, Clone)]
pub struct Drag {
    /// Shape the drag started from; fixed for the whole drag
    pub start_id: u32,
    /// Latest cursor position
    pub cursor: Vec2,
    /// Committed waypoints, oldest first
    pub waypoints: Vec<Waypoint>,
    /// Live path: start center, waypoints, cursor. Rebuilt every move.
    pub path: Vec<Vec2>,
}

impl Drag {
    pub fn new(start_id: u32, start_pos: Vec2, cursor: Vec2) -> Self {
        Self {
            start_id,
            cursor,
            waypoints: Vec::new(),
            path: vec![start_pos, cursor],
        }
    }
}

/// How a completed drag resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag active, or released without a valid same-pair endpoint.
    /// Connectors are untouched.
    Abandoned,
    /// Connector committed; both endpoint shapes marked connected
    Connected,
    /// Final path crossed an existing connector: every connector was
    /// discarded and every shape reset (board-wide invalidation)
    Invalidated,
}

/// Start dragging from a shape. No-op if the shape is unknown or already
/// connected. Returns whether a drag actually started.
pub fn begin_drag(state: &mut GameState, shape_id: u32, cursor: Vec2) -> bool {
    let Some(shape) = state.shape(shape_id) else {
        return false;
    };
    if shape.connected {
        return false;
    }
    log::debug!("Drag started from shape {} (pair {})", shape.id, shape.pair_id);
    state.drag = Some(Drag::new(shape_id, shape.pos, cursor));
    true
}

/// Advance the drag to a new cursor position.
///
/// Retraction runs first so a freshly-uncovered segment can immediately pick
/// up a different shape; the commitment check then runs against the rebuilt
/// path. No-op when no drag is active.
pub fn cursor_move(state: &mut GameState, cursor: Vec2) {
    let Some(mut drag) = state.drag.take() else {
        return;
    };
    let Some(start) = state.shape(drag.start_id) else {
        return;
    };
    let start_pos = start.pos;
    drag.cursor = cursor;

    retract_reversed(&mut drag, start_pos, cursor);

    drag.path.clear();
    drag.path.push(start_pos);
    drag.path.extend(drag.waypoints.iter().map(|w| w.pos));

    let last = *drag.path.last().unwrap_or(&start_pos);
    if let Some(wp) = find_commit(state, &drag, last, cursor) {
        log::debug!(
            "Committed waypoint {} at ({:.0}, {:.0}), bend {:.0}",
            drag.waypoints.len(),
            wp.pos.x,
            wp.pos.y,
            wp.bend_direction
        );
        drag.waypoints.push(wp);
        drag.path.push(wp.pos);
    }
    drag.path.push(cursor);

    state.drag = Some(drag);
}

/// Walk the waypoint list newest-first and drop the suffix from the first
/// waypoint whose live bend direction has flipped sign relative to its
/// recorded one, both beyond the hysteresis threshold. At most one suffix
/// per call.
fn retract_reversed(drag: &mut Drag, start_pos: Vec2, cursor: Vec2) {
    for i in (0..drag.waypoints.len()).rev() {
        let prev = if i == 0 {
            start_pos
        } else {
            drag.waypoints[i - 1].pos
        };
        let wp = drag.waypoints[i];
        let live = bend_direction(prev, wp.pos, cursor);
        let recorded = wp.bend_direction;

        let t = BEND_REVERSAL_THRESHOLD;
        if (recorded > t && live < -t) || (recorded < -t && live > t) {
            log::debug!(
                "Retracting waypoints {}..{}: bend reversed {:.0} -> {:.0}",
                i,
                drag.waypoints.len(),
                recorded,
                live
            );
            drag.waypoints.truncate(i);
            break;
        }
    }
}

/// Find the shape the live segment should bend around, if any.
///
/// Candidates exclude the start shape, connected shapes, and shapes already
/// present as waypoints (by position). Among shapes whose collision circle
/// the live segment crosses, the one nearest the last established point wins.
fn find_commit(state: &GameState, drag: &Drag, last: Vec2, cursor: Vec2) -> Option<Waypoint> {
    let mut best: Option<(f32, Waypoint)> = None;

    for shape in &state.shapes {
        if shape.id == drag.start_id || shape.connected {
            continue;
        }
        if drag.waypoints.iter().any(|w| w.pos == shape.pos) {
            continue;
        }
        if !segment_hits_circle(last, cursor, shape.pos, SHAPE_RADIUS) {
            continue;
        }

        let distance = (shape.pos - last).length();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((
                distance,
                Waypoint {
                    pos: shape.pos,
                    bend_direction: bend_direction(last, shape.pos, cursor),
                },
            ));
        }
    }

    best.map(|(_, wp)| wp)
}

/// Finish the drag over `end_shape` (the shape under the pointer, if any).
///
/// The drag is abandoned unless the end shape exists, differs from the start,
/// shares its pair id, and is unconnected. A valid endpoint produces the
/// candidate path `start center ++ waypoints ++ end center`, which either
/// becomes a connector or, if it crosses any existing connector, wipes the
/// whole board's connections. Drag state is cleared in every case.
pub fn end_drag(state: &mut GameState, end_shape: Option<u32>) -> DragOutcome {
    let Some(drag) = state.drag.take() else {
        return DragOutcome::Abandoned;
    };
    let Some(start) = state.shape(drag.start_id) else {
        return DragOutcome::Abandoned;
    };
    let start_pos = start.pos;
    let start_color = start.color;
    let start_pair = start.pair_id;

    let end = end_shape.and_then(|id| state.shape(id)).filter(|end| {
        end.id != drag.start_id && end.pair_id == start_pair && !end.connected
    });
    let Some(end) = end else {
        log::debug!("Drag from shape {} abandoned", drag.start_id);
        return DragOutcome::Abandoned;
    };
    let end_id = end.id;
    let end_pos = end.pos;

    // Approaching the destination commits the destination itself as a
    // waypoint (its circle crosses the live segment on the way in); drop it
    // so the final path carries a single copy of the end center.
    let mut path = Vec::with_capacity(drag.waypoints.len() + 2);
    path.push(start_pos);
    path.extend(
        drag.waypoints
            .iter()
            .map(|w| w.pos)
            .filter(|p| *p != end_pos),
    );
    path.push(end_pos);

    if path_crosses_any(&path, &state.connectors) {
        log::info!("Path for pair {start_pair} crosses an existing connector - board reset");
        state.clear_connections();
        return DragOutcome::Invalidated;
    }

    log::info!(
        "Pair {} connected with {} waypoint(s)",
        start_pair,
        path.len() - 2
    );
    state.connectors.push(Connector {
        path,
        color: start_color,
        pair_id: start_pair,
    });
    if let Some(shape) = state.shape_mut(drag.start_id) {
        shape.connected = true;
    }
    if let Some(shape) = state.shape_mut(end_id) {
        shape.connected = true;
    }

    if state.all_connected() {
        log::info!("Level {} complete!", state.level);
        state.phase = GamePhase::Won;
    }

    DragOutcome::Connected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Shape, ShapeKind};

    fn empty_state() -> GameState {
        let mut state = GameState::new(7, Vec2::new(800.0, 600.0));
        state.shapes.clear();
        state.connectors.clear();
        state
    }

    fn push_shape(state: &mut GameState, x: f32, y: f32, pair_id: u32) -> u32 {
        let id = state.next_entity_id();
        state.shapes.push(Shape {
            id,
            pos: Vec2::new(x, y),
            kind: ShapeKind::Circle,
            color: crate::consts::PALETTE[pair_id as usize % 6],
            pair_id,
            connected: false,
        });
        id
    }

    #[test]
    fn test_direct_connection() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        let b = push_shape(&mut state, 400.0, 100.0, 0);

        assert!(begin_drag(&mut state, a, Vec2::new(100.0, 100.0)));
        cursor_move(&mut state, Vec2::new(400.0, 100.0));
        let outcome = end_drag(&mut state, Some(b));

        assert_eq!(outcome, DragOutcome::Connected);
        assert_eq!(state.connectors.len(), 1);
        assert_eq!(
            state.connectors[0].path,
            vec![Vec2::new(100.0, 100.0), Vec2::new(400.0, 100.0)]
        );
        assert!(state.shape(a).unwrap().connected);
        assert!(state.shape(b).unwrap().connected);
        assert!(state.drag.is_none());
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_obstacle_commits_waypoint() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        let b = push_shape(&mut state, 400.0, 100.0, 0);
        push_shape(&mut state, 250.0, 100.0, 1);

        begin_drag(&mut state, a, Vec2::new(100.0, 100.0));
        cursor_move(&mut state, Vec2::new(400.0, 100.0));

        let drag = state.drag.as_ref().unwrap();
        assert_eq!(drag.waypoints.len(), 1);
        assert_eq!(drag.waypoints[0].pos, Vec2::new(250.0, 100.0));
        assert_eq!(
            drag.path,
            vec![
                Vec2::new(100.0, 100.0),
                Vec2::new(250.0, 100.0),
                Vec2::new(400.0, 100.0)
            ]
        );

        let outcome = end_drag(&mut state, Some(b));
        assert_eq!(outcome, DragOutcome::Connected);
        assert_eq!(state.connectors[0].path.len(), 3);
    }

    #[test]
    fn test_nearest_candidate_wins() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        push_shape(&mut state, 300.0, 100.0, 1);
        push_shape(&mut state, 200.0, 100.0, 2);

        begin_drag(&mut state, a, Vec2::new(100.0, 100.0));
        // One move crosses both obstacle circles; only the nearer commits
        cursor_move(&mut state, Vec2::new(400.0, 100.0));
        let drag = state.drag.as_ref().unwrap();
        assert_eq!(drag.waypoints.len(), 1);
        assert_eq!(drag.waypoints[0].pos, Vec2::new(200.0, 100.0));

        // The next move picks up the farther one
        cursor_move(&mut state, Vec2::new(400.0, 100.0));
        let drag = state.drag.as_ref().unwrap();
        assert_eq!(drag.waypoints.len(), 2);
        assert_eq!(drag.waypoints[1].pos, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_waypoints_grow_without_reversal() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        push_shape(&mut state, 250.0, 100.0, 1);
        push_shape(&mut state, 350.0, 140.0, 2);

        begin_drag(&mut state, a, Vec2::new(100.0, 100.0));

        let moves = [
            Vec2::new(180.0, 100.0),
            Vec2::new(260.0, 100.0),
            Vec2::new(320.0, 120.0),
            Vec2::new(380.0, 150.0),
            Vec2::new(450.0, 180.0),
        ];
        let mut max_len = 0;
        for m in moves {
            cursor_move(&mut state, m);
            let len = state.drag.as_ref().unwrap().waypoints.len();
            assert!(len >= max_len, "waypoint list shrank without a reversal");
            max_len = len;
        }
        assert_eq!(max_len, 2);
    }

    #[test]
    fn test_reversal_retracts_suffix() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 0.0, 0.0, 0);
        push_shape(&mut state, 100.0, 0.0, 1);

        begin_drag(&mut state, a, Vec2::new(0.0, 0.0));
        // Commit the obstacle with a clear counterclockwise bend
        cursor_move(&mut state, Vec2::new(200.0, 30.0));
        {
            let drag = state.drag.as_ref().unwrap();
            assert_eq!(drag.waypoints.len(), 1);
            assert!(drag.waypoints[0].bend_direction > BEND_REVERSAL_THRESHOLD);
        }

        // Swing the cursor to the other side: bend flips clockwise
        cursor_move(&mut state, Vec2::new(200.0, -60.0));
        let drag = state.drag.as_ref().unwrap();
        assert!(drag.waypoints.is_empty(), "reversed waypoint should retract");
        assert_eq!(drag.path, vec![Vec2::new(0.0, 0.0), Vec2::new(200.0, -60.0)]);
    }

    #[test]
    fn test_retraction_keeps_earlier_waypoints() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 0.0, 0.0, 0);
        push_shape(&mut state, 100.0, 0.0, 1);
        push_shape(&mut state, 200.0, 60.0, 2);

        begin_drag(&mut state, a, Vec2::new(0.0, 0.0));
        // First obstacle, counterclockwise bend
        cursor_move(&mut state, Vec2::new(180.0, 40.0));
        // Second obstacle, clockwise bend at the new waypoint
        cursor_move(&mut state, Vec2::new(290.0, 90.0));
        {
            let drag = state.drag.as_ref().unwrap();
            assert_eq!(drag.waypoints.len(), 2);
        }

        // Reverse only the second bend: pull the cursor up and to the left of
        // the second waypoint while staying on the first waypoint's side
        cursor_move(&mut state, Vec2::new(220.0, 200.0));
        let drag = state.drag.as_ref().unwrap();
        assert_eq!(drag.waypoints.len(), 1);
        assert_eq!(drag.waypoints[0].pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_small_wiggle_does_not_flicker() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 0.0, 0.0, 0);
        push_shape(&mut state, 100.0, 0.0, 1);

        begin_drag(&mut state, a, Vec2::new(0.0, 0.0));
        cursor_move(&mut state, Vec2::new(200.0, 30.0));
        assert_eq!(state.drag.as_ref().unwrap().waypoints.len(), 1);

        // Near-colinear wiggle: the live bend changes sign but stays under
        // the hysteresis threshold, so the waypoint holds
        cursor_move(&mut state, Vec2::new(200.0, -0.5));
        assert_eq!(state.drag.as_ref().unwrap().waypoints.len(), 1);
    }

    #[test]
    fn test_connected_shape_cannot_start_drag() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        state.shape_mut(a).unwrap().connected = true;

        assert!(!begin_drag(&mut state, a, Vec2::new(100.0, 100.0)));
        assert!(state.drag.is_none());
    }

    #[test]
    fn test_connected_shape_is_not_a_waypoint_candidate() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        let blocker = push_shape(&mut state, 250.0, 100.0, 1);
        state.shape_mut(blocker).unwrap().connected = true;

        begin_drag(&mut state, a, Vec2::new(100.0, 100.0));
        cursor_move(&mut state, Vec2::new(400.0, 100.0));
        assert!(state.drag.as_ref().unwrap().waypoints.is_empty());
    }

    #[test]
    fn test_drop_on_wrong_pair_abandons() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        push_shape(&mut state, 400.0, 100.0, 0);
        let other = push_shape(&mut state, 400.0, 300.0, 1);

        begin_drag(&mut state, a, Vec2::new(100.0, 100.0));
        cursor_move(&mut state, Vec2::new(400.0, 300.0));
        let outcome = end_drag(&mut state, Some(other));

        assert_eq!(outcome, DragOutcome::Abandoned);
        assert!(state.connectors.is_empty());
        assert!(state.shapes.iter().all(|s| !s.connected));
        assert!(state.drag.is_none());
    }

    #[test]
    fn test_drop_on_nothing_abandons() {
        let mut state = empty_state();
        let a = push_shape(&mut state, 100.0, 100.0, 0);
        push_shape(&mut state, 400.0, 100.0, 0);

        begin_drag(&mut state, a, Vec2::new(100.0, 100.0));
        cursor_move(&mut state, Vec2::new(250.0, 250.0));
        assert_eq!(end_drag(&mut state, None), DragOutcome::Abandoned);
        assert!(state.connectors.is_empty());
    }

    #[test]
    fn test_crossing_invalidates_whole_board() {
        let mut state = empty_state();
        let a1 = push_shape(&mut state, 200.0, 100.0, 0);
        let a2 = push_shape(&mut state, 200.0, 400.0, 0);
        let b1 = push_shape(&mut state, 100.0, 250.0, 1);
        let b2 = push_shape(&mut state, 300.0, 250.0, 1);

        begin_drag(&mut state, a1, Vec2::new(200.0, 100.0));
        cursor_move(&mut state, Vec2::new(200.0, 400.0));
        assert_eq!(end_drag(&mut state, Some(a2)), DragOutcome::Connected);
        assert_eq!(state.connectors.len(), 1);

        // Second pair's straight path crosses the first connector
        begin_drag(&mut state, b1, Vec2::new(100.0, 250.0));
        cursor_move(&mut state, Vec2::new(300.0, 250.0));
        let outcome = end_drag(&mut state, Some(b2));

        assert_eq!(outcome, DragOutcome::Invalidated);
        assert!(state.connectors.is_empty());
        for id in [a1, a2, b1, b2] {
            assert!(!state.shape(id).unwrap().connected);
        }
    }

    #[test]
    fn test_cursor_move_without_drag_is_noop() {
        let mut state = empty_state();
        push_shape(&mut state, 100.0, 100.0, 0);
        cursor_move(&mut state, Vec2::new(50.0, 50.0));
        assert!(state.drag.is_none());
        assert_eq!(end_drag(&mut state, None), DragOutcome::Abandoned);
    }
}
