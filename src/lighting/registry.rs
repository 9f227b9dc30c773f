//! Active-light scanning.

use crate::lighting::source::{LightKind, LightProvider, LightSource};

/// Scans the scene for lights eligible for streaming.
///
/// Keeps a scratch buffer so steady-state rebuilds do not allocate. The
/// scratch is cleared at the start of every scan; nothing about individual
/// lights is carried from one rebuild to the next.
#[derive(Default)]
pub struct LightRegistry {
    scratch: Vec<LightSource>,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every enabled point light from the scene.
    ///
    /// Pure query: O(N) in total light count, no mutation of the scene, no
    /// ordering guarantee on the output.
    pub fn scan_active(&mut self, world: &dyn LightProvider) -> &[LightSource] {
        self.scratch.clear();
        let scratch = &mut self.scratch;
        world.for_each_light(&mut |light| {
            if light.enabled && light.kind == LightKind::Point {
                scratch.push(*light);
            }
        });
        &self.scratch
    }
}
