//! Feature library - weak signals over a field and its surrounding tree
//!
//! Every feature is a pure predicate over the current tree snapshot: absence
//! of structure (no label, no form, no candidates) is a negative signal,
//! never an error, and nothing here mutates the document. Descendant lookups
//! go through the pass-scoped fact cache.
//!
//! The registry maps the model's coefficient vocabulary to evaluator
//! functions; the scoring engine consumes it as data and knows nothing about
//! what any feature means.

mod attrs;
mod form;
mod labels;
mod neighbors;

use crate::dom::{Document, NodeId};
use crate::patterns::Patterns;
use crate::ruleset::FactCache;

/// Everything a feature may look at during one classification sweep
pub struct PassContext<'a> {
    pub doc: &'a Document,
    pub patterns: &'a Patterns,
    pub cache: &'a mut FactCache,
}

/// A feature evaluator: one weak signal, true or false
pub type FeatureFn = fn(&mut PassContext<'_>, NodeId) -> bool;

/// Coefficient-name to evaluator table. Names are the trained model's
/// vocabulary, so shipped coefficient tables keep working unchanged.
pub static REGISTRY: &[(&str, FeatureFn)] = &[
    ("hasNewLabel", labels::has_new_label),
    ("hasConfirmLabel", labels::has_confirm_label),
    ("hasCurrentLabel", labels::has_current_label),
    ("closestLabelMatchesNew", labels::closest_label_matches_new),
    ("closestLabelMatchesConfirm", labels::closest_label_matches_confirm),
    ("closestLabelMatchesCurrent", labels::closest_label_matches_current),
    ("hasNewAriaLabel", attrs::has_new_aria_label),
    ("hasConfirmAriaLabel", attrs::has_confirm_aria_label),
    ("hasCurrentAriaLabel", attrs::has_current_aria_label),
    ("hasNewPlaceholder", attrs::has_new_placeholder),
    ("hasConfirmPlaceholder", attrs::has_confirm_placeholder),
    ("hasCurrentPlaceholder", attrs::has_current_placeholder),
    ("forgotPasswordInFormLinkTextContent", form::forgot_password_in_form_link_text),
    ("forgotPasswordInFormLinkHref", form::forgot_password_in_form_link_href),
    ("forgotPasswordInFormLinkTitle", form::forgot_password_in_form_link_title),
    ("forgotInFormLinkTextContent", form::forgot_in_form_link_text),
    ("forgotInFormLinkHref", form::forgot_in_form_link_href),
    ("forgotPasswordInFormButtonTextContent", form::forgot_password_in_form_button_text),
    ("forgotPasswordOnPageLinkTextContent", form::forgot_password_on_page_link_text),
    ("forgotPasswordOnPageLinkHref", form::forgot_password_on_page_link_href),
    ("forgotPasswordOnPageLinkTitle", form::forgot_password_on_page_link_title),
    ("forgotPasswordOnPageButtonTextContent", form::forgot_password_on_page_button_text),
    ("elementAttrsMatchNew", attrs::element_attrs_match_new),
    ("elementAttrsMatchConfirm", attrs::element_attrs_match_confirm),
    ("elementAttrsMatchCurrent", attrs::element_attrs_match_current),
    ("elementAttrsMatchPassword1", attrs::element_attrs_match_password1),
    ("elementAttrsMatchPassword2", attrs::element_attrs_match_password2),
    ("elementAttrsMatchLogin", attrs::element_attrs_match_login),
    ("formAttrsMatchRegister", form::form_attrs_match_register),
    ("formHasRegisterAction", form::form_has_register_action),
    ("formButtonIsRegister", form::form_button_is_register),
    ("formAttrsMatchLogin", form::form_attrs_match_login),
    ("formHasLoginAction", form::form_has_login_action),
    ("formButtonIsLogin", form::form_button_is_login),
    ("hasAutocompleteCurrentPassword", attrs::has_autocomplete_current_password),
    ("formHasRememberMeCheckbox", form::form_has_remember_me_checkbox),
    ("formHasRememberMeLabel", form::form_has_remember_me_label),
    ("formHasNewsletterCheckbox", form::form_has_newsletter_checkbox),
    ("formHasNewsletterLabel", form::form_has_newsletter_label),
    ("closestHeaderAboveIsLoginy", form::closest_header_above_is_loginy),
    ("closestHeaderAboveIsRegistery", form::closest_header_above_is_registery),
    ("nextInputIsConfirmy", neighbors::next_input_is_confirmy),
    ("formHasMultipleVisibleInput", form::form_has_multiple_visible_input),
    ("firstFieldInFormWithThreePasswordFields", form::first_field_in_form_with_three_password_fields),
];

/// Look a feature up by coefficient name
pub fn feature(name: &str) -> Option<FeatureFn> {
    REGISTRY
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, f)| f)
}

pub(crate) use attrs::element_attrs_match;
