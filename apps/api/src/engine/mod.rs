// Credit Health Engine
// Pure scoring and recommendation logic: profile in, report out.
// No I/O, no shared state; handlers call `evaluate` directly.

pub mod actions;
pub mod evaluator;
pub mod scoring;

pub use evaluator::evaluate;
