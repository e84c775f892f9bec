/// Fixed half-hour slot axis.
pub mod clock;
pub mod engine;
/// Event-log parsing.
pub mod event;
pub mod interpreter;
pub mod report;
/// Weighted shutoff sampler for rooms being vacated.
pub mod sampler;
pub mod types;
