//! Datasets: the built-in house price table and a seeded synthetic generator.

pub mod housing;
pub mod synthetic;

pub use housing::*;
pub use synthetic::*;
