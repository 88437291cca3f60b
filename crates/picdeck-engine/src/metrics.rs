//! Per-step timing for step-driven runs.
//!
//! [`StepMetrics`] captures wall-clock data for a single engine step.

/// Timing collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step, bookkeeping included.
    pub total_us: u64,
    /// Time spent inside the engine's `step()`.
    pub engine_us: u64,
    /// Cumulative engine time since the run started.
    pub cumulative_engine_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.engine_us, 0);
        assert_eq!(m.cumulative_engine_us, 0);
    }
}
