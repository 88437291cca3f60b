//! The [`PicEngine`] trait: the seam to the compiled PIC engine.
//!
//! The configuration layer never solves fields or pushes particles. In
//! step-driven mode it hands the engine an [`InputDeck`] once, then asks
//! it to advance one step at a time.

use picdeck_core::EngineError;
use picdeck_deck::InputDeck;

/// What the engine reports after advancing one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineStep {
    /// Simulated time after the step, in seconds.
    pub time: f64,
}

/// An engine that can be driven step by step.
///
/// # Contract
///
/// - [`initialize`](Self::initialize) is called exactly once, before any
///   [`step`](Self::step).
/// - Each `step()` blocks until one full engine step has completed.
/// - Errors are opaque to the caller and are never retried.
/// - [`finalize`](Self::finalize) is called once when the run ends
///   normally (step budget reached).
///
/// # Examples
///
/// ```
/// use picdeck_core::EngineError;
/// use picdeck_deck::InputDeck;
/// use picdeck_engine::{EngineStep, PicEngine};
///
/// struct Clock {
///     t: f64,
/// }
///
/// impl PicEngine for Clock {
///     fn name(&self) -> &str { "clock" }
///
///     fn initialize(&mut self, _deck: &InputDeck) -> Result<(), EngineError> {
///         self.t = 0.0;
///         Ok(())
///     }
///
///     fn step(&mut self) -> Result<EngineStep, EngineError> {
///         self.t += 1e-15;
///         Ok(EngineStep { time: self.t })
///     }
/// }
///
/// let mut clock = Clock { t: 0.0 };
/// clock.initialize(&InputDeck::new()).unwrap();
/// assert_eq!(clock.step().unwrap().time, 1e-15);
/// ```
pub trait PicEngine: Send {
    /// Name used in error reports and logs.
    fn name(&self) -> &str;

    /// Load the run description.
    fn initialize(&mut self, deck: &InputDeck) -> Result<(), EngineError>;

    /// Advance one step.
    fn step(&mut self) -> Result<EngineStep, EngineError>;

    /// Release engine resources after the last step. Default: no-op.
    fn finalize(&mut self) {}
}

impl<E: PicEngine + ?Sized> PicEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initialize(&mut self, deck: &InputDeck) -> Result<(), EngineError> {
        (**self).initialize(deck)
    }

    fn step(&mut self) -> Result<EngineStep, EngineError> {
        (**self).step()
    }

    fn finalize(&mut self) {
        (**self).finalize()
    }
}
