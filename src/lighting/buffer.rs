//! Fixed-capacity packed light buffer.

use crate::lighting::source::LightSource;

/// Capacity of the streamed buffer. The shading stage indexes fixed-length
/// arrays of this size.
pub const MAX_STREAMED_LIGHTS: usize = 32;

/// Sentinel position component, far beyond any streamed world coordinate, so
/// an empty slot attenuates to nothing if sampled.
pub const SENTINEL_POSITION: f32 = 1.0e9;

/// Smallest falloff radius ever published. Keeps shader attenuation math away
/// from a division by zero.
pub const FALLOFF_FLOOR: f32 = 1.0e-4;

/// CPU-side packed light data, laid out exactly as the shading stage consumes
/// it.
///
/// Slots `[0, count)` hold lights ascending by squared distance to the
/// observer at publish time; slots `[count, MAX_STREAMED_LIGHTS)` are
/// sentinels.
#[derive(Clone, Debug, PartialEq)]
pub struct LightBuffer {
    /// xyz = world position, w = falloff radius.
    pub positions: [[f32; 4]; MAX_STREAMED_LIGHTS],
    /// rgb = color pre-scaled by intensity and the world multiplier, a =
    /// alpha copied from the source.
    pub colors: [[f32; 4]; MAX_STREAMED_LIGHTS],
    /// Number of live slots.
    pub count: u32,
}

impl LightBuffer {
    /// All-sentinel buffer: nothing to shade.
    pub fn empty() -> Self {
        Self {
            positions: [[
                SENTINEL_POSITION,
                SENTINEL_POSITION,
                SENTINEL_POSITION,
                FALLOFF_FLOOR,
            ]; MAX_STREAMED_LIGHTS],
            colors: [[0.0; 4]; MAX_STREAMED_LIGHTS],
            count: 0,
        }
    }
}

impl Default for LightBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pack `selected` (already nearest-first) into a fresh buffer.
///
/// Lights beyond the buffer capacity are dropped. Negative world multipliers
/// are clamped to zero so a bad config can never publish negative color or
/// falloff values. Deterministic: identical inputs produce a bit-identical
/// buffer.
pub fn pack(selected: &[LightSource], intensity_multiplier: f32, scattering: f32) -> LightBuffer {
    let intensity_multiplier = intensity_multiplier.max(0.0);
    let scattering = scattering.max(0.0);

    let mut buffer = LightBuffer::empty();
    let count = selected.len().min(MAX_STREAMED_LIGHTS);
    for (slot, light) in selected[..count].iter().enumerate() {
        buffer.positions[slot] = [
            light.position.x,
            light.position.y,
            light.position.z,
            FALLOFF_FLOOR + light.range * scattering,
        ];
        let scale = light.intensity * intensity_multiplier;
        buffer.colors[slot] = [
            light.color[0] * scale,
            light.color[1] * scale,
            light.color[2] * scale,
            light.color[3],
        ];
    }
    buffer.count = count as u32;
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn light(id: u64, x: f32) -> LightSource {
        LightSource::point(id, Vec3::new(x, 0.0, 0.0), [1.0, 0.5, 0.25, 0.8], 2.0, 10.0)
    }

    fn assert_sentinel(buffer: &LightBuffer, slot: usize) {
        assert_eq!(buffer.positions[slot][0], SENTINEL_POSITION);
        assert_eq!(buffer.positions[slot][1], SENTINEL_POSITION);
        assert_eq!(buffer.positions[slot][2], SENTINEL_POSITION);
        assert_eq!(buffer.positions[slot][3], FALLOFF_FLOOR);
        assert_eq!(buffer.colors[slot], [0.0; 4]);
    }

    #[test]
    fn test_empty_buffer_is_all_sentinel() {
        let buffer = LightBuffer::empty();
        assert_eq!(buffer.count, 0);
        for slot in 0..MAX_STREAMED_LIGHTS {
            assert_sentinel(&buffer, slot);
        }
    }

    #[test]
    fn test_pack_fills_live_slots_and_pads_rest() {
        let selected: Vec<LightSource> = (0..5).map(|i| light(i, i as f32)).collect();
        let buffer = pack(&selected, 1.0, 1.0);
        assert_eq!(buffer.count, 5);
        for slot in 0..5 {
            assert_eq!(buffer.positions[slot][0], slot as f32);
            // falloff = floor + range * scattering
            assert_eq!(buffer.positions[slot][3], FALLOFF_FLOOR + 10.0);
        }
        for slot in 5..MAX_STREAMED_LIGHTS {
            assert_sentinel(&buffer, slot);
        }
    }

    #[test]
    fn test_pack_scales_color_and_copies_alpha() {
        let buffer = pack(&[light(0, 0.0)], 3.0, 1.0);
        // rgb * intensity(2.0) * multiplier(3.0), alpha untouched
        assert_eq!(buffer.colors[0], [6.0, 3.0, 1.5, 0.8]);
    }

    #[test]
    fn test_pack_drops_overflow() {
        let selected: Vec<LightSource> = (0..50).map(|i| light(i, i as f32)).collect();
        let buffer = pack(&selected, 1.0, 1.0);
        assert_eq!(buffer.count, MAX_STREAMED_LIGHTS as u32);
        assert_eq!(
            buffer.positions[MAX_STREAMED_LIGHTS - 1][0],
            (MAX_STREAMED_LIGHTS - 1) as f32
        );
    }

    #[test]
    fn test_negative_multipliers_clamp_to_zero() {
        let buffer = pack(&[light(0, 0.0)], -2.0, -1.0);
        assert_eq!(buffer.colors[0][..3], [0.0, 0.0, 0.0]);
        // falloff stays at the positive floor
        assert_eq!(buffer.positions[0][3], FALLOFF_FLOOR);
        assert!(buffer.positions[0][3] > 0.0);
    }

    #[test]
    fn test_zero_range_keeps_falloff_positive() {
        let mut source = light(0, 0.0);
        source.range = 0.0;
        let buffer = pack(&[source], 1.0, 1.0);
        assert!(buffer.positions[0][3] > 0.0);
    }

    #[test]
    fn test_pack_is_deterministic() {
        let selected: Vec<LightSource> = (0..7).map(|i| light(i, i as f32 * 1.3)).collect();
        let first = pack(&selected, 1.5, 0.75);
        let second = pack(&selected, 1.5, 0.75);
        assert_eq!(first, second);
    }
}
