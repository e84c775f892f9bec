/// CSV export of simulation outcomes.
pub mod export;
