//! Light source model and the scene seam.

use glam::Vec3;

/// Opaque handle identifying a light within the owning scene.
///
/// Identities are never retained across rebuilds; the handle exists so a host
/// can correlate a streamed slot back to a scene entity when debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(pub u64);

/// Kind of light source.
///
/// Only point lights are streamed; the other kinds exist because scenes carry
/// them and the registry has to filter them out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightKind {
    #[default]
    Point,
    Directional,
    Spot,
}

/// A light source as captured from the scene during a scan.
///
/// Plain value type: the pipeline copies what it needs while scanning and
/// never holds references into the scene between rebuilds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub id: LightId,
    /// World-space position.
    pub position: Vec3,
    /// Linear RGBA color.
    pub color: [f32; 4],
    /// Brightness multiplier (>= 0).
    pub intensity: f32,
    /// Falloff radius in world units (>= 0).
    pub range: f32,
    /// Disabled lights are skipped by the scan.
    pub enabled: bool,
    pub kind: LightKind,
}

impl LightSource {
    /// Convenience constructor for an enabled point light.
    pub fn point(id: u64, position: Vec3, color: [f32; 4], intensity: f32, range: f32) -> Self {
        Self {
            id: LightId(id),
            position,
            color,
            intensity,
            range,
            enabled: true,
            kind: LightKind::Point,
        }
    }
}

/// Access to the scene's light collection.
///
/// The scene owns its lights; this is the one seam the streaming pipeline has
/// into it. Implemented for slices so hosts without a scene graph (and tests)
/// can pass plain buffers.
pub trait LightProvider {
    /// Visit every light currently in the scene, enabled or not.
    fn for_each_light(&self, visit: &mut dyn FnMut(&LightSource));
}

impl LightProvider for [LightSource] {
    fn for_each_light(&self, visit: &mut dyn FnMut(&LightSource)) {
        for light in self {
            visit(light);
        }
    }
}

impl LightProvider for Vec<LightSource> {
    fn for_each_light(&self, visit: &mut dyn FnMut(&LightSource)) {
        self.as_slice().for_each_light(visit);
    }
}
