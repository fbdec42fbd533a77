//! Confirm-field matcher - propagate a generated password to the
//! confirm-password field near it
//!
//! Given a field already filled with a generated password, search the fields
//! declared after it within its scope for the likeliest confirm-password
//! counterpart and fill it the way a user would. The scan deliberately
//! accepts the first password-typed candidate without re-checking label text
//! once the autocomplete-priority path misses; that favors recall over
//! precision and is kept as trained.

use log::debug;

use crate::dom::{Document, InputType, NodeId};
use crate::error::MatchError;

use serde::{Deserialize, Serialize};

/// Maximum number of non-hidden fields between the source and the confirm
/// candidate
pub const MAX_CONFIRM_DISTANCE: usize = 3;

/// Result of a confirm-field fill attempt. Everything here is a valid
/// outcome; only a precondition violation is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillOutcome {
    /// A candidate was found and filled through a user-input event
    Filled,
    /// The candidate already holds a value; user input is never clobbered
    AlreadyFilled,
    /// No qualifying candidate within the distance budget
    NoMatch,
    /// The field has no owning form and no virtual scope could be
    /// synthesized
    NoScope,
}

fn is_acceptable_confirm(doc: &Document, id: NodeId) -> bool {
    let node = doc.node(id);
    node.is_password_field() && !node.disabled && !node.read_only
}

/// The scope whose field list the matcher searches: the owning form when
/// there is one, otherwise the lowest common ancestor of the field and the
/// nearest preceding fillable field
fn resolve_scope(doc: &Document, field: NodeId) -> Option<NodeId> {
    if let Some(form) = doc.form(field) {
        return Some(form);
    }
    let previous = doc.closest_preceding_fillable(field)?;
    doc.lowest_common_ancestor(previous, field)
}

/// Find the confirm-password field near `source` and copy `generated` into
/// it as user-originated input.
///
/// Fails only when `source` is missing from its own scope's field list,
/// which is caller misuse; every soft miss is a [`FillOutcome`].
pub fn fill_confirm_field(
    doc: &mut Document,
    source: NodeId,
    generated: &str,
) -> Result<FillOutcome, MatchError> {
    let Some(scope) = resolve_scope(doc, source) else {
        debug!("confirm fill: no usable scope for field {source:?}");
        return Ok(FillOutcome::NoScope);
    };

    let fields = doc.fields(scope);
    let start = fields
        .iter()
        .position(|&f| f == source)
        .ok_or(MatchError::FieldNotInScope)?;

    // Hidden fields never count against the distance budget
    let after: Vec<NodeId> = fields[start + 1..]
        .iter()
        .copied()
        .filter(|&f| doc.node(f).input_type != InputType::Hidden)
        .collect();

    let mut candidate = None;

    // An explicit new-password source prefers a same-autocomplete match
    // over whatever password field happens to come first
    if doc.node(source).autocomplete_field_name() == Some("new-password") {
        let matched = after.iter().position(|&f| {
            is_acceptable_confirm(doc, f)
                && doc.node(f).autocomplete_field_name() == Some("new-password")
        });
        if let Some(idx) = matched {
            if idx < MAX_CONFIRM_DISTANCE {
                candidate = Some(after[idx]);
            }
        }
    }

    if candidate.is_none() {
        candidate = after
            .iter()
            .take(MAX_CONFIRM_DISTANCE)
            .copied()
            .find(|&f| is_acceptable_confirm(doc, f));
    }

    let Some(confirm) = candidate else {
        debug!("confirm fill: no candidate within distance {MAX_CONFIRM_DISTANCE}");
        return Ok(FillOutcome::NoMatch);
    };

    if !doc.node(confirm).value.is_empty() {
        debug!("confirm fill: candidate {confirm:?} already holds a value");
        return Ok(FillOutcome::AlreadyFilled);
    }

    doc.set_user_input(confirm, generated);
    debug!("confirm fill: filled {confirm:?}");
    Ok(FillOutcome::Filled)
}
