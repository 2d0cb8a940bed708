//! Evasive button movement
//!
//! A move is a random jump from the current position: a random heading and a
//! distance scaled by the container, then clamped so the button stays inside
//! the padded container. All randomness comes from the caller's `Rng`.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::difficulty::DifficultyParams;
use crate::consts::MIN_DISTANCE_FACTOR;
use crate::polar_to_cartesian;

/// Headings available when diagonal movement is off (right, down, left, up)
pub const CARDINAL_ANGLES: [f32; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

/// Pick a heading in radians
pub fn pick_angle<R: Rng + ?Sized>(diagonal: bool, rng: &mut R) -> f32 {
    if diagonal {
        rng.random_range(0.0..TAU)
    } else {
        CARDINAL_ANGLES[rng.random_range(0..CARDINAL_ANGLES.len())]
    }
}

/// Pick a jump length: `max(w, h) * range_percent * [0.5, 1.0)`
pub fn pick_distance<R: Rng + ?Sized>(container: Vec2, range_percent: f32, rng: &mut R) -> f32 {
    let factor = rng.random_range(MIN_DISTANCE_FACTOR..1.0);
    container.max_element() * range_percent * factor
}

/// Upper bound for the button's top-left corner.
///
/// Never below `padding`: on containers too small for the button the button
/// is pinned at `padding` and may overflow the far edge.
#[inline]
pub fn max_position(container: Vec2, button: Vec2, padding: f32) -> Vec2 {
    (container - button - Vec2::splat(padding)).max(Vec2::splat(padding))
}

/// Clamp a top-left position into the padded container
pub fn clamp_to_container(pos: Vec2, container: Vec2, button: Vec2, padding: f32) -> Vec2 {
    let max = max_position(container, button, padding);
    // min first, then max: the padding floor wins when the range is inverted
    pos.min(max).max(Vec2::splat(padding))
}

/// Compute where the button jumps to next
pub fn evade<R: Rng + ?Sized>(
    current: Vec2,
    container: Vec2,
    button: Vec2,
    params: &DifficultyParams,
    padding: f32,
    rng: &mut R,
) -> Vec2 {
    let angle = pick_angle(params.diagonal, rng);
    let distance = pick_distance(container, params.range_percent, rng);
    let candidate = current + polar_to_cartesian(distance, angle);
    clamp_to_container(candidate, container, button, padding)
}
