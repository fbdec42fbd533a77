//! Neighbor heuristics - signals from the fields declared around the
//! candidate

use super::{element_attrs_match, PassContext};
use crate::dom::{DescendantQuery, InputType, NodeId};

/// Whether a confirm-looking password field follows the candidate in its
/// form's field list.
///
/// The scan stops at the first password-typed field and tests its attributes
/// against the confirm pattern; it never skips past one that fails. A
/// disabled or hidden field encountered before that point ends the scan
/// negatively.
pub(super) fn next_input_is_confirmy(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    let doc = ctx.doc;
    let patterns = ctx.patterns;
    let Some(form) = doc.form(node) else {
        return false;
    };
    let fields = ctx
        .cache
        .descendants(doc, Some(form), DescendantQuery::Inputs)
        .to_vec();

    let mut after = false;
    for field in fields {
        if field == node {
            after = true;
            continue;
        }
        if !after {
            continue;
        }
        let n = doc.node(field);
        if n.disabled || !doc.is_visible(field) {
            return false;
        }
        if n.input_type == InputType::Password {
            return element_attrs_match(doc, field, &patterns.confirm_attr);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Node};
    use crate::patterns::Patterns;
    use crate::ruleset::FactCache;

    fn ctx<'a>(doc: &'a Document, cache: &'a mut FactCache) -> PassContext<'a> {
        PassContext {
            doc,
            patterns: Patterns::builtin(),
            cache,
        }
    }

    fn confirm_password() -> Node {
        let mut n = Node::input(InputType::Password);
        n.name = "confirm_password".to_string();
        n
    }

    #[test]
    fn test_next_password_with_confirm_attrs() {
        let mut doc = Document::new();
        let form = doc.append(None, Node::form());
        let field = doc.append(Some(form), Node::input(InputType::Password));
        doc.append(Some(form), confirm_password());

        let mut cache = FactCache::new();
        assert!(next_input_is_confirmy(&mut ctx(&doc, &mut cache), field));
    }

    #[test]
    fn test_first_password_found_is_decisive() {
        // A plain password directly after the field is tested and fails;
        // the confirm-named one behind it is never reached
        let mut doc = Document::new();
        let form = doc.append(None, Node::form());
        let field = doc.append(Some(form), Node::input(InputType::Password));
        doc.append(Some(form), Node::input(InputType::Password));
        doc.append(Some(form), confirm_password());

        let mut cache = FactCache::new();
        assert!(!next_input_is_confirmy(&mut ctx(&doc, &mut cache), field));
    }

    #[test]
    fn test_disabled_field_in_between_is_negative() {
        let mut doc = Document::new();
        let form = doc.append(None, Node::form());
        let field = doc.append(Some(form), Node::input(InputType::Password));
        let mut blocker = Node::input(InputType::Text);
        blocker.disabled = true;
        doc.append(Some(form), blocker);
        doc.append(Some(form), confirm_password());

        let mut cache = FactCache::new();
        assert!(!next_input_is_confirmy(&mut ctx(&doc, &mut cache), field));
    }

    #[test]
    fn test_benign_field_in_between_is_skipped() {
        let mut doc = Document::new();
        let form = doc.append(None, Node::form());
        let field = doc.append(Some(form), Node::input(InputType::Password));
        doc.append(Some(form), Node::input(InputType::Text));
        doc.append(Some(form), confirm_password());

        let mut cache = FactCache::new();
        assert!(next_input_is_confirmy(&mut ctx(&doc, &mut cache), field));
    }

    #[test]
    fn test_no_form_or_no_follower_is_negative() {
        let mut doc = Document::new();
        let orphan = doc.append(None, Node::input(InputType::Password));
        let form = doc.append(None, Node::form());
        let last = doc.append(Some(form), Node::input(InputType::Password));

        let mut cache = FactCache::new();
        assert!(!next_input_is_confirmy(&mut ctx(&doc, &mut cache), orphan));
        assert!(!next_input_is_confirmy(&mut ctx(&doc, &mut cache), last));
    }
}
