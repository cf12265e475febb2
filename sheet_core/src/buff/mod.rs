//! Buff/debuff calculator

mod aggregator;

pub use aggregator::{aggregate, aggregate_snapshot, BuffResult};
