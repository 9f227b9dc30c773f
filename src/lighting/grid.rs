//! Coarse-grid observer movement detection.

use glam::{IVec3, Vec3};

/// Default cell size exponent: 2^3 = 8 world units per cell.
pub const DEFAULT_CELL_SHIFT: u32 = 3;

/// Detects when the observer crosses a coarse grid cell boundary.
///
/// Movement inside a cell is deliberately ignored: a slightly stale streamed
/// set is cheaper than rebuilding it every frame. Cell size is a power of two
/// so the bucketing stays a per-axis shift.
pub struct CellTracker {
    shift: u32,
    last_cell: Option<IVec3>,
}

impl CellTracker {
    /// Create a tracker with `2^shift` world units per cell edge.
    pub fn new(shift: u32) -> Self {
        Self {
            shift,
            last_cell: None,
        }
    }

    /// Coarse cell containing `position`.
    ///
    /// Arithmetic shift keeps flooring correct for negative coordinates.
    pub fn cell_of(&self, position: Vec3) -> IVec3 {
        IVec3::new(
            (position.x.floor() as i32) >> self.shift,
            (position.y.floor() as i32) >> self.shift,
            (position.z.floor() as i32) >> self.shift,
        )
    }

    /// Record `position`; true when its cell differs from the last recorded
    /// one. The first observation after construction always reports movement.
    pub fn observe(&mut self, position: Vec3) -> bool {
        let cell = self.cell_of(position);
        if self.last_cell == Some(cell) {
            return false;
        }
        self.last_cell = Some(cell);
        true
    }

    /// Forget the recorded cell so the next observation reports movement.
    pub fn reset(&mut self) {
        self.last_cell = None;
    }
}

impl Default for CellTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SHIFT)
    }
}
