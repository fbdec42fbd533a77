//! Form-element tree: arena document, node types, and the query surface the
//! feature library and the confirm matcher consume

mod tree;
mod types;

pub use tree::Document;
pub use types::{DescendantQuery, InputEvent, InputType, Node, NodeId, NodeKind};
