//! Combat - Resolving incoming attacks against defenses

mod attack;
mod resolution;
mod result;

pub use attack::Attack;
pub use resolution::{resolve_damage, resolve_snapshot, select_branch};
pub use result::{DamageBranch, DamageResult};
