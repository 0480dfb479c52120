//! Final-path validation against committed connectors
//!
//! On drag completion the candidate path is tested against every existing
//! connector, all segment pairs, short-circuiting on the first crossing.
//! Crossings within the endpoint epsilon band are ignored so that paths
//! meeting around a shared shape anchor don't count (see
//! [`super::geometry::segments_cross`]).

use glam::Vec2;

use super::geometry::segments_cross;
use super::state::Connector;
use crate::consts::SEGMENT_EPSILON;

/// Do two polylines cross anywhere?
pub fn paths_cross(a: &[Vec2], b: &[Vec2]) -> bool {
    for s1 in a.windows(2) {
        for s2 in b.windows(2) {
            if segments_cross(s1[0], s1[1], s2[0], s2[1], SEGMENT_EPSILON) {
                return true;
            }
        }
    }
    false
}

/// Does `path` cross any committed connector? Short-circuits on the first hit.
pub fn path_crosses_any(path: &[Vec2], connectors: &[Connector]) -> bool {
    connectors.iter().any(|c| paths_cross(path, &c.path))
}
