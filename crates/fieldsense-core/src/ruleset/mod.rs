//! Ruleset engine: fact cache, coefficients, and the weighted-sum classifier

mod cache;
mod engine;
mod types;

pub use cache::FactCache;
pub use engine::FieldClassifier;
pub use types::{Coefficients, DEFAULT_THRESHOLD};
