//! Label-text matchers
//!
//! A field's labeling context is resolved in decreasing order of explicitness:
//! associated labels, aria-labelledby references, then the structural
//! fallbacks (table rows and definition lists). Sibling labels get their own
//! "closest label" family because forms frequently put the label next to the
//! field with no association at all.

use regex::Regex;

use super::PassContext;
use crate::dom::{DescendantQuery, NodeId, NodeKind};

/// Text of the field's labeling context tested against a pattern
fn has_label_matching(ctx: &mut PassContext<'_>, node: NodeId, re: &Regex) -> bool {
    let doc = ctx.doc;

    let labels = doc.labels(node);
    if let Some(&first) = labels.first() {
        return re.is_match(&doc.text_content(first));
    }

    let referenced = doc.aria_labelled_by(node);
    if referenced.len() == 1 {
        return re.is_match(&doc.text_content(referenced[0]));
    } else if referenced.len() > 1 {
        // Multiple references: the on-screen closest one labels the field
        if let Some(closest) = doc.closest_to(&referenced, node) {
            return re.is_match(&doc.text_content(closest));
        }
    }

    let Some(parent) = doc.parent(node) else {
        return false;
    };
    match doc.node(parent).kind {
        // A field in a table cell is described by its row
        NodeKind::TableCell => {
            if let Some(row) = doc.parent(parent) {
                return re.is_match(&doc.text_content(row));
            }
        }
        // A field in a <dd> is described by the preceding <dt>
        NodeKind::DefinitionDescription => {
            if let Some(term) = doc.prev_sibling(parent) {
                return re.is_match(&doc.text_content(term));
            }
        }
        _ => {}
    }
    false
}

/// Nearest label by structure: sibling labels first, then the on-screen
/// closest label inside the owning form
fn closest_label_matches(ctx: &mut PassContext<'_>, node: NodeId, re: &Regex) -> bool {
    let doc = ctx.doc;

    if let Some(prev) = doc.prev_sibling(node) {
        if doc.node(prev).kind == NodeKind::Label {
            return re.is_match(&doc.text_content(prev));
        }
    }
    if let Some(next) = doc.next_sibling(node) {
        if doc.node(next).kind == NodeKind::Label {
            return re.is_match(&doc.text_content(next));
        }
    }

    let Some(form) = doc.form(node) else {
        return false;
    };
    let labels = ctx
        .cache
        .descendants(doc, Some(form), DescendantQuery::Labels)
        .to_vec();
    match doc.closest_to(&labels, node) {
        Some(label) => re.is_match(&doc.text_content(label)),
        None => false,
    }
}

pub(super) fn has_new_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    has_label_matching(ctx, node, &patterns.new_string)
}

pub(super) fn has_confirm_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    has_label_matching(ctx, node, &patterns.confirm_string)
}

pub(super) fn has_current_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    has_label_matching(ctx, node, &patterns.current_attr_and_string)
}

pub(super) fn closest_label_matches_new(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    closest_label_matches(ctx, node, &patterns.new_string)
}

pub(super) fn closest_label_matches_confirm(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    closest_label_matches(ctx, node, &patterns.confirm_string)
}

pub(super) fn closest_label_matches_current(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    closest_label_matches(ctx, node, &patterns.current_attr_and_string)
}
