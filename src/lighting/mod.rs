//! Dynamic point-light streaming.
//!
//! A large open world can hold far more dynamic lights than a shader can
//! visit per pixel, so this module maintains a fixed-capacity buffer of the
//! lights nearest the observer and refreshes it only when the streamed set
//! could actually have changed. The main entry point is [`LightingSystem`],
//! driven by the owning render loop as a two-phase tick:
//! [`invalidate`](LightingSystem::invalidate) with the observer position,
//! then [`rebuild`](LightingSystem::rebuild) with the world's lights, then
//! upload and draw.

pub mod buffer;
pub mod config;
pub mod grid;
pub mod invalidation;
pub mod registry;
pub mod select;
pub mod source;

// Re-exports
pub use buffer::{LightBuffer, FALLOFF_FLOOR, MAX_STREAMED_LIGHTS, SENTINEL_POSITION};
pub use config::LightingConfig;
pub use grid::CellTracker;
pub use invalidation::{InvalidationBus, InvalidationHandle, InvalidationReason};
pub use registry::LightRegistry;
pub use select::select_nearest;
pub use source::{LightId, LightKind, LightProvider, LightSource};

use glam::Vec3;

use crate::core::Result;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counters describing the streaming system's recent work.
#[derive(Clone, Copy, Debug, Default)]
pub struct LightingStats {
    /// Total rebuilds since construction.
    pub rebuilds: u64,
    /// Point lights seen by the most recent scan.
    pub lights_scanned: usize,
    /// Lights streamed by the most recent rebuild.
    pub lights_streamed: usize,
}

// ---------------------------------------------------------------------------
// LightingSystem
// ---------------------------------------------------------------------------

/// Owns the scan/select/pack pipeline and the published buffer.
///
/// Tick contract, in frame order:
/// 1. [`invalidate`](Self::invalidate) with the observer's position. Cheap;
///    posts to the invalidation bus only when the observer crossed a coarse
///    cell boundary.
/// 2. [`rebuild`](Self::rebuild) with the world's lights. Runs the full
///    pipeline only if something was posted since the last rebuild.
/// 3. Upload [`buffer`](Self::buffer) (see
///    [`LightsBuffer`](crate::render::buffer::LightsBuffer)) and draw.
///
/// Everything runs synchronously inside the tick, so the shading stage always
/// sees the buffer published before its own draw submission.
pub struct LightingSystem {
    config: LightingConfig,
    registry: LightRegistry,
    cells: CellTracker,
    bus: InvalidationBus,
    observer: Vec3,
    buffer: LightBuffer,
    generation: u64,
    stats: LightingStats,
}

impl LightingSystem {
    /// Create an idle system with an empty (all-sentinel) buffer.
    pub fn new(config: LightingConfig) -> Result<Self> {
        config.validate()?;
        let cells = CellTracker::new(config.cell_shift());
        Ok(Self {
            config,
            registry: LightRegistry::new(),
            cells,
            bus: InvalidationBus::new(),
            observer: Vec3::ZERO,
            buffer: LightBuffer::empty(),
            generation: 0,
            stats: LightingStats::default(),
        })
    }

    /// Producer endpoint for external invalidation sources (light attach and
    /// detach, region renders).
    pub fn invalidation(&self) -> InvalidationHandle {
        self.bus.handle()
    }

    /// Request a rebuild regardless of observer movement.
    pub fn refresh(&mut self) {
        self.bus.post(InvalidationReason::ManualRefresh);
    }

    /// Phase 1: record the observer for this tick and post to the bus if it
    /// crossed a cell boundary.
    pub fn invalidate(&mut self, observer: Vec3) {
        self.observer = observer;
        if self.cells.observe(observer) {
            self.bus.post(InvalidationReason::ObserverMoved);
        }
    }

    /// Phase 2: rebuild the streamed buffer if anything was posted since the
    /// last rebuild. Returns whether a rebuild ran.
    ///
    /// The scan, select, pack, publish sequence runs to completion within
    /// the call; the previously published buffer stays intact until the new
    /// one is complete, so a consumer can never observe a partial update.
    pub fn rebuild(&mut self, world: &dyn LightProvider) -> bool {
        if !self.bus.take() {
            return false;
        }

        let active = self.registry.scan_active(world);
        let scanned = active.len();
        let selected = select_nearest(active, self.observer, MAX_STREAMED_LIGHTS);
        let packed = buffer::pack(
            &selected,
            self.config.intensity_multiplier,
            self.config.scattering,
        );

        self.buffer = packed;
        self.generation = self.generation.wrapping_add(1);
        self.stats.rebuilds += 1;
        self.stats.lights_scanned = scanned;
        self.stats.lights_streamed = self.buffer.count as usize;
        log::debug!(
            "light rebuild #{}: {} scanned, {} streamed",
            self.stats.rebuilds,
            scanned,
            self.buffer.count
        );
        true
    }

    /// The currently published buffer.
    #[inline]
    pub fn buffer(&self) -> &LightBuffer {
        &self.buffer
    }

    /// Bumped once per publish. An unchanged generation means the buffer has
    /// not been touched since it was last read.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counters for the system's recent work.
    #[inline]
    pub fn stats(&self) -> &LightingStats {
        &self.stats
    }

    /// Immutable reference to the configuration.
    #[inline]
    pub fn config(&self) -> &LightingConfig {
        &self.config
    }

    /// Swap the configuration and schedule a rebuild under the new values.
    pub fn set_config(&mut self, config: LightingConfig) -> Result<()> {
        config.validate()?;
        self.cells = CellTracker::new(config.cell_shift());
        self.config = config;
        self.refresh();
        Ok(())
    }
}
