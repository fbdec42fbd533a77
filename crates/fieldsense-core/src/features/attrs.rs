//! Attribute matchers - signals read straight off the field itself

use regex::Regex;

use super::PassContext;
use crate::dom::{Document, NodeId};

/// id, name, or class tested against a pattern
pub(crate) fn element_attrs_match(doc: &Document, node: NodeId, re: &Regex) -> bool {
    let n = doc.node(node);
    re.is_match(&n.id) || re.is_match(&n.name) || re.is_match(&n.class)
}

fn aria_label_matches(doc: &Document, node: NodeId, re: &Regex) -> bool {
    doc.node(node)
        .aria_label
        .as_deref()
        .is_some_and(|v| re.is_match(v))
}

fn placeholder_matches(doc: &Document, node: NodeId, re: &Regex) -> bool {
    doc.node(node)
        .placeholder
        .as_deref()
        .is_some_and(|v| re.is_match(v))
}

pub(super) fn has_new_aria_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    aria_label_matches(ctx.doc, node, &ctx.patterns.new_string)
}

pub(super) fn has_confirm_aria_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    aria_label_matches(ctx.doc, node, &ctx.patterns.confirm_string)
}

pub(super) fn has_current_aria_label(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    aria_label_matches(ctx.doc, node, &ctx.patterns.current_attr_and_string)
}

pub(super) fn has_new_placeholder(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    placeholder_matches(ctx.doc, node, &ctx.patterns.new_string)
}

pub(super) fn has_confirm_placeholder(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    placeholder_matches(ctx.doc, node, &ctx.patterns.confirm_string)
}

pub(super) fn has_current_placeholder(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    placeholder_matches(ctx.doc, node, &ctx.patterns.current_attr_and_string)
}

pub(super) fn element_attrs_match_new(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    element_attrs_match(ctx.doc, node, &ctx.patterns.new_attr)
}

pub(super) fn element_attrs_match_confirm(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    element_attrs_match(ctx.doc, node, &ctx.patterns.confirm_attr)
}

pub(super) fn element_attrs_match_current(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    element_attrs_match(ctx.doc, node, &ctx.patterns.current_attr_and_string)
}

pub(super) fn element_attrs_match_password1(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    element_attrs_match(ctx.doc, node, &ctx.patterns.password1)
}

pub(super) fn element_attrs_match_password2(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    element_attrs_match(ctx.doc, node, &ctx.patterns.password2)
}

pub(super) fn element_attrs_match_login(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    element_attrs_match(ctx.doc, node, &ctx.patterns.login)
}

/// The autocomplete field name is exactly `current-password`
pub(super) fn has_autocomplete_current_password(ctx: &mut PassContext<'_>, node: NodeId) -> bool {
    ctx.doc.node(node).autocomplete_field_name() == Some("current-password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, InputType, Node};
    use crate::patterns::Patterns;
    use crate::ruleset::FactCache;

    fn ctx<'a>(doc: &'a Document, cache: &'a mut FactCache) -> PassContext<'a> {
        PassContext {
            doc,
            patterns: Patterns::builtin(),
            cache,
        }
    }

    #[test]
    fn test_attrs_match_any_of_id_name_class() {
        let mut doc = Document::new();
        let mut by_name = Node::input(InputType::Password);
        by_name.name = "confirm_password".to_string();
        let by_name = doc.append(None, by_name);
        let mut by_class = Node::input(InputType::Password);
        by_class.class = "form-control retype".to_string();
        let by_class = doc.append(None, by_class);
        let plain = doc.append(None, Node::input(InputType::Password));

        let mut cache = FactCache::new();
        assert!(element_attrs_match_confirm(&mut ctx(&doc, &mut cache), by_name));
        assert!(element_attrs_match_confirm(&mut ctx(&doc, &mut cache), by_class));
        assert!(!element_attrs_match_confirm(&mut ctx(&doc, &mut cache), plain));
    }

    #[test]
    fn test_placeholder_and_aria_label() {
        let mut doc = Document::new();
        let mut field = Node::input(InputType::Password);
        field.placeholder = Some("Choose a password".to_string());
        field.aria_label = Some("current password".to_string());
        let field = doc.append(None, field);

        let mut cache = FactCache::new();
        assert!(has_new_placeholder(&mut ctx(&doc, &mut cache), field));
        assert!(has_current_aria_label(&mut ctx(&doc, &mut cache), field));
        assert!(!has_confirm_placeholder(&mut ctx(&doc, &mut cache), field));
    }

    #[test]
    fn test_autocomplete_field_name_skips_section_prefix() {
        let mut doc = Document::new();
        let mut field = Node::input(InputType::Password);
        field.autocomplete = Some("section-login current-password".to_string());
        let field = doc.append(None, field);
        let bare = doc.append(None, Node::input(InputType::Password));

        let mut cache = FactCache::new();
        assert!(has_autocomplete_current_password(&mut ctx(&doc, &mut cache), field));
        assert!(!has_autocomplete_current_password(&mut ctx(&doc, &mut cache), bare));
    }
}
