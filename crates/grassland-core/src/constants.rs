/// Largest supported cell count for a single world (width * height).
/// Keeps grid allocations and full-grid sweeps bounded.
pub const MAX_CELLS: usize = 1 << 22;

/// Random-placement retry budget multiplier: a placement attempt gives up
/// after `PLACEMENT_RETRY_FACTOR * width * height` free-cell draws.
pub const PLACEMENT_RETRY_FACTOR: usize = 10;
