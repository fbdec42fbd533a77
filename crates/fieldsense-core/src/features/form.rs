//! Form-level matchers and structural counters
//!
//! Signals read off the owning form rather than the field: the action URL,
//! form attributes, button and link text, ancillary checkboxes, the nearest
//! header above, and the visible-field counters that separate registration
//! forms from login forms.

use regex::Regex;

use super::attrs::element_attrs_match;
use super::PassContext;
use crate::dom::{DescendantQuery, Document, NodeId};

/// How many visible fillable fields make a form look like registration
const MULTIPLE_INPUT_THRESHOLD: usize = 3;

fn text_of(doc: &Document, node: NodeId) -> String {
    doc.text_content(node)
}

fn href_of(doc: &Document, node: NodeId) -> String {
    doc.node(node).href.clone().unwrap_or_default()
}

fn title_of(doc: &Document, node: NodeId) -> String {
    doc.node(node).title.clone().unwrap_or_default()
}

/// Any anchor under `scope` whose property matches every given pattern
fn anchors_match(
    ctx: &mut PassContext<'_>,
    scope: Option<NodeId>,
    property: fn(&Document, NodeId) -> String,
    regexes: &[&Regex],
) -> bool {
    let anchors = ctx
        .cache
        .descendants(ctx.doc, scope, DescendantQuery::Anchors)
        .to_vec();
    anchors.iter().any(|&a| {
        let value = property(ctx.doc, a);
        regexes.iter().all(|re| re.is_match(&value))
    })
}

/// Any button under `scope` whose subtree text matches every given pattern
fn buttons_match_text(
    ctx: &mut PassContext<'_>,
    scope: Option<NodeId>,
    regexes: &[&Regex],
) -> bool {
    let buttons = ctx
        .cache
        .descendants(ctx.doc, scope, DescendantQuery::Buttons)
        .to_vec();
    buttons.iter().any(|&b| {
        let text = ctx.doc.text_content(b);
        regexes.iter().all(|re| re.is_match(&text))
    })
}

/// Whether the form's submit controls read like `re`: submit/button inputs
/// by value first, then button elements by value, text, id, or title
fn form_buttons_match(ctx: &mut PassContext<'_>, node: NodeId, re: &Regex) -> bool {
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    let inputs = ctx
        .cache
        .descendants(ctx.doc, Some(form), DescendantQuery::SubmitInputs)
        .to_vec();
    if inputs.iter().any(|&i| re.is_match(&ctx.doc.node(i).value)) {
        return true;
    }
    let buttons = ctx
        .cache
        .descendants(ctx.doc, Some(form), DescendantQuery::Buttons)
        .to_vec();
    buttons.iter().any(|&b| {
        let n = ctx.doc.node(b);
        re.is_match(&n.value)
            || re.is_match(&ctx.doc.text_content(b))
            || re.is_match(&n.id)
            || re.is_match(&n.title.clone().unwrap_or_default())
    })
}

pub(super) fn forgot_password_in_form_link_text(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    anchors_match(
        ctx,
        Some(form),
        text_of,
        &[&patterns.password_string, &patterns.forgot_string],
    )
}

pub(super) fn forgot_password_in_form_link_href(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    anchors_match(
        ctx,
        Some(form),
        href_of,
        &[&patterns.password_string_or_attr, &patterns.forgot_href],
    )
}

pub(super) fn forgot_password_in_form_link_title(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    anchors_match(
        ctx,
        Some(form),
        title_of,
        &[&patterns.password_string, &patterns.forgot_string],
    )
}

pub(super) fn forgot_in_form_link_text(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    anchors_match(ctx, Some(form), text_of, &[&patterns.forgot_string])
}

pub(super) fn forgot_in_form_link_href(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    anchors_match(ctx, Some(form), href_of, &[&patterns.forgot_href])
}

pub(super) fn forgot_password_in_form_button_text(
    ctx: &mut PassContext<'_>,
    node: NodeId,
) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    buttons_match_text(
        ctx,
        Some(form),
        &[&patterns.password_string, &patterns.forgot_string],
    )
}

pub(super) fn forgot_password_on_page_link_text(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let _ = node;
    anchors_match(
        ctx,
        None,
        text_of,
        &[&patterns.password_string, &patterns.forgot_string],
    )
}

pub(super) fn forgot_password_on_page_link_href(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let _ = node;
    anchors_match(
        ctx,
        None,
        href_of,
        &[&patterns.password_string_or_attr, &patterns.forgot_href],
    )
}

pub(super) fn forgot_password_on_page_link_title(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let _ = node;
    anchors_match(
        ctx,
        None,
        title_of,
        &[&patterns.password_string, &patterns.forgot_string],
    )
}

pub(super) fn forgot_password_on_page_button_text(
    ctx: &mut PassContext<'_>,
    node: NodeId,
) -> bool {
    let patterns = ctx.patterns;
    let _ = node;
    buttons_match_text(
        ctx,
        None,
        &[&patterns.password_string, &patterns.forgot_string],
    )
}

pub(super) fn form_attrs_match_register(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    match ctx.doc.form(node) {
        Some(form) => element_attrs_match(ctx.doc, form, &ctx.patterns.register_form_attr),
        None => false,
    }
}

pub(super) fn form_attrs_match_login(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    match ctx.doc.form(node) {
        Some(form) => element_attrs_match(ctx.doc, form, &ctx.patterns.login_form_attr),
        None => false,
    }
}

fn form_action_matches(doc: &Document, node: NodeId, re: &Regex) -> bool {
    doc.form(node)
        .and_then(|form| doc.node(form).action.clone())
        .is_some_and(|action| re.is_match(&action))
}

pub(super) fn form_has_register_action(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    form_action_matches(ctx.doc, node, &ctx.patterns.register_action)
}

pub(super) fn form_has_login_action(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    form_action_matches(ctx.doc, node, &ctx.patterns.login)
}

pub(super) fn form_button_is_register(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    form_buttons_match(ctx, node, &patterns.register_string)
}

pub(super) fn form_button_is_login(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    form_buttons_match(ctx, node, &patterns.login)
}

pub(super) fn form_has_remember_me_checkbox(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    let checkboxes = ctx
        .cache
        .descendants(ctx.doc, Some(form), DescendantQuery::Checkboxes)
        .to_vec();
    checkboxes.iter().any(|&c| {
        let n = ctx.doc.node(c);
        patterns.remember_me_attr.is_match(&n.id) || patterns.remember_me_attr.is_match(&n.name)
    })
}

pub(super) fn form_has_remember_me_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    let labels = ctx
        .cache
        .descendants(ctx.doc, Some(form), DescendantQuery::Labels)
        .to_vec();
    labels
        .iter()
        .any(|&l| patterns.remember_me_string.is_match(&ctx.doc.text_content(l)))
}

pub(super) fn form_has_newsletter_checkbox(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    let checkboxes = ctx
        .cache
        .descendants(ctx.doc, Some(form), DescendantQuery::Checkboxes)
        .to_vec();
    // Plain substring on purpose, matching the model's training data
    checkboxes.iter().any(|&c| {
        let n = ctx.doc.node(c);
        n.id.contains("newsletter") || n.name.contains("newsletter")
    })
}

pub(super) fn form_has_newsletter_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    let labels = ctx
        .cache
        .descendants(ctx.doc, Some(form), DescendantQuery::Labels)
        .to_vec();
    labels
        .iter()
        .any(|&l| patterns.newsletter_string.is_match(&ctx.doc.text_content(l)))
}

/// Text of the closest heading-like node above the field
fn closest_header_above_matches(ctx: &mut PassContext<'_>, node: NodeId, re: &Regex) -> bool {
    let headers = ctx
        .cache
        .descendants(ctx.doc, None, DescendantQuery::Headings)
        .to_vec();
    headers
        .iter()
        .rev()
        .find(|&&h| ctx.doc.precedes(h, node))
        .is_some_and(|&h| re.is_match(&ctx.doc.text_content(h)))
}

pub(super) fn closest_header_above_is_loginy(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    closest_header_above_matches(ctx, node, &patterns.login)
}

pub(super) fn closest_header_above_is_registery(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let patterns = ctx.patterns;
    closest_header_above_matches(ctx, node, &patterns.register_string)
}

/// Registration pages ask for several pieces of information at once, so a
/// scope with three or more visible fillable fields is a strong signal.
/// Fields without an owning form get a virtual scope: the lowest common
/// ancestor with the nearest preceding fillable field.
pub(super) fn form_has_multiple_visible_input(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let doc = ctx.doc;
    let scope = match doc.form(node) {
        Some(form) => form,
        None => {
            let Some(previous) = doc.closest_preceding_fillable(node) else {
                return false;
            };
            let Some(scope) = doc.lowest_common_ancestor(previous, node) else {
                return false;
            };
            scope
        }
    };
    let inputs = ctx
        .cache
        .descendants(doc, Some(scope), DescendantQuery::FillableInputs)
        .to_vec();
    let visible = inputs
        .iter()
        // The candidate counts without a visibility check
        .filter(|&&i| i == node || doc.is_visible(i))
        .count();
    visible >= MULTIPLE_INPUT_THRESHOLD
}

/// Change-password forms carry the current/new/confirm triple: exactly three
/// active password fields with the candidate first. More than three usually
/// means hidden fields slipped in, so that is not a signal.
pub(super) fn first_field_in_form_with_three_password_fields(
    ctx: &mut PassContext<'_>,
    node: NodeId,
) -> bool {
    let Some(form) = ctx.doc.form(node) else {
        return false;
    };
    let fields = ctx
        .cache
        .descendants(ctx.doc, Some(form), DescendantQuery::ActivePasswordInputs)
        .to_vec();
    fields.len() == 3 && fields[0] == node
}
