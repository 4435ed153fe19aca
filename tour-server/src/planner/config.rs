//! Planner configuration.

/// Default number of attraction stops between food stops.
pub const DEFAULT_INTERLEAVE_FACTOR: usize = 2;

/// Hard cap on the candidate set size.
pub const MAX_CANDIDATES: usize = 8;

/// Configuration parameters for tour planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Attraction stops to visit between successive food stops.
    pub interleave_factor: usize,

    /// Maximum number of candidates a tour is built from.
    /// Values above [`MAX_CANDIDATES`] are clamped.
    pub max_candidates: usize,

    /// Places kept per requested kind during discovery.
    pub per_kind_limit: usize,

    /// Discovery radius around the start (metres).
    pub radius_m: u32,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        interleave_factor: usize,
        max_candidates: usize,
        per_kind_limit: usize,
        radius_m: u32,
    ) -> Self {
        Self {
            interleave_factor,
            max_candidates,
            per_kind_limit,
            radius_m,
        }
    }

    /// The candidate cap actually applied.
    pub fn candidate_limit(&self) -> usize {
        self.max_candidates.min(MAX_CANDIDATES)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            interleave_factor: DEFAULT_INTERLEAVE_FACTOR,
            max_candidates: MAX_CANDIDATES,
            per_kind_limit: 3,
            radius_m: 2000,
        }
    }
}
