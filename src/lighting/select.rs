//! Nearest-K light selection.

use glam::Vec3;

use crate::lighting::source::LightSource;

/// Select the `k` lights nearest `observer`, ascending by squared distance.
///
/// Squared distance keeps the comparison free of square roots; tie order
/// between equidistant lights is unspecified. A full sort is fine at the
/// light counts a rebuild sees (low hundreds); only the output contract
/// matters: the nearest-K set, nearest first.
pub fn select_nearest(lights: &[LightSource], observer: Vec3, k: usize) -> Vec<LightSource> {
    let mut scored: Vec<(f32, LightSource)> = lights
        .iter()
        .map(|light| (light.position.distance_squared(observer), *light))
        .collect();
    scored.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
    scored.truncate(k);
    scored.into_iter().map(|(_, light)| light).collect()
}
