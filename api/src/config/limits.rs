/// Hard limits enforced when validating configuration

/// Smallest ETA step per queue position (minutes)
pub const MIN_MINUTES_PER_POSITION: u32 = 1;

/// Largest ETA step per queue position (4 hours)
pub const MAX_MINUTES_PER_POSITION: u32 = 240;
