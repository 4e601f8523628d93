// src/league/mod.rs
pub mod projections;
pub mod rules;

#[allow(unused_imports)]
pub use projections::Projection;
#[allow(unused_imports)]
pub use rules::LeagueRules;
