//! fieldsense-core: rule-based form-field classification engine
//!
//! Infers the semantic role of form inputs ("this is a new-password field")
//! from weak structural and textual signals, and locates the
//! confirm-password counterpart of a filled password field:
//! - Dom: the arena-backed element tree hosts hand the engine
//! - Patterns: multilingual regex sets, swappable without touching scoring
//! - Features: 44 pure predicates over a field and its surrounding tree
//! - Ruleset: pass-scoped fact cache plus a generic weighted-sum classifier
//! - Confirm: distance-budgeted confirm-password matching and filling
//!
//! The engine is synchronous and stateless across calls: every
//! classification sweep gets a fresh fact cache, and the host owns the tree.

pub mod confirm;
pub mod dom;
pub mod error;
pub mod features;
pub mod patterns;
pub mod ruleset;

// Re-exports for convenience
pub use confirm::{fill_confirm_field, FillOutcome, MAX_CONFIRM_DISTANCE};
pub use dom::{DescendantQuery, Document, InputEvent, InputType, Node, NodeId, NodeKind};
pub use error::{MatchError, ModelError};
pub use patterns::{PatternConfig, Patterns};
pub use ruleset::{Coefficients, FactCache, FieldClassifier, DEFAULT_THRESHOLD};
