//! Node types for the form-element tree

use serde::{Deserialize, Serialize};

/// Handle to a node in a [`Document`](super::Document) arena.
///
/// Ids are assigned in append order, and appending follows document
/// (pre)order, so comparing ids compares document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element kind, reduced to the tags the engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Input,
    Label,
    Button,
    Anchor,
    Form,
    TableCell,
    TableRow,
    DefinitionDescription,
    DefinitionTerm,
    Heading,
    Legend,
    /// Generic block container (div-like); headers are detected through its class
    Container,
    Other,
}

/// Input `type` attribute, normalized.
///
/// An empty or unrecognized `type` behaves like `text`, which is what user
/// agents do; hosts should map it to `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
    Password,
    Tel,
    Hidden,
    Checkbox,
    Submit,
    Button,
    Other,
}

impl InputType {
    /// Types a user fills with account information (text/email/password/tel,
    /// with the empty type already normalized to `Text`)
    pub fn is_fillable(self) -> bool {
        matches!(
            self,
            InputType::Text | InputType::Email | InputType::Password | InputType::Tel
        )
    }
}

/// One element of the form tree, as supplied by the host.
///
/// Empty strings stand for absent attributes; the patterns never match the
/// empty string. `text` is the node's own text, not the subtree text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub input_type: InputType,
    pub id: String,
    pub name: String,
    pub class: String,
    pub value: String,
    pub text: String,
    pub autocomplete: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    /// Space-separated list of referenced element ids
    pub aria_labelledby: Option<String>,
    pub title: Option<String>,
    pub href: Option<String>,
    /// Label `for` attribute
    pub for_id: Option<String>,
    /// Form action URL
    pub action: Option<String>,
    pub disabled: bool,
    pub read_only: bool,
    pub aria_hidden: bool,
    /// Host-computed visibility (layout, CSS)
    pub visible: bool,
    /// On-screen point, used for Euclidean-distance tie breaking
    pub position: Option<(f32, f32)>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            kind: NodeKind::Other,
            input_type: InputType::Other,
            id: String::new(),
            name: String::new(),
            class: String::new(),
            value: String::new(),
            text: String::new(),
            autocomplete: None,
            placeholder: None,
            aria_label: None,
            aria_labelledby: None,
            title: None,
            href: None,
            for_id: None,
            action: None,
            disabled: false,
            read_only: false,
            aria_hidden: false,
            visible: true,
            position: None,
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn input(input_type: InputType) -> Self {
        Self {
            kind: NodeKind::Input,
            input_type,
            ..Default::default()
        }
    }

    pub fn form() -> Self {
        Self::new(NodeKind::Form)
    }

    pub fn label(text: &str) -> Self {
        Self {
            kind: NodeKind::Label,
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// The autocomplete field name: the last token of the attribute, which
    /// skips any section-/contact-type prefixes
    pub fn autocomplete_field_name(&self) -> Option<&str> {
        self.autocomplete
            .as_deref()
            .and_then(|ac| ac.split_ascii_whitespace().last())
    }

    /// Whether the node is a password-typed input
    pub fn is_password_field(&self) -> bool {
        self.kind == NodeKind::Input && self.input_type == InputType::Password
    }
}

/// Descendant-query descriptor, the unit the fact cache is keyed on.
///
/// A closed enum standing in for the CSS selectors the original queries use,
/// so cache keys stay cheap and comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescendantQuery {
    Anchors,
    Buttons,
    Labels,
    Checkboxes,
    /// `input[type=submit], input[type=button]`
    SubmitInputs,
    /// `input[type=password]:not([disabled], [aria-hidden=true])`
    ActivePasswordInputs,
    /// `input[type=text], input[type=email], input[type=password], input[type=tel]`
    FillableInputs,
    /// Headings, legends, and containers classed as heading/header/title
    Headings,
    /// Every input regardless of type
    Inputs,
}

impl DescendantQuery {
    pub(crate) fn matches(self, node: &Node) -> bool {
        match self {
            DescendantQuery::Anchors => node.kind == NodeKind::Anchor,
            DescendantQuery::Buttons => node.kind == NodeKind::Button,
            DescendantQuery::Labels => node.kind == NodeKind::Label,
            DescendantQuery::Checkboxes => {
                node.kind == NodeKind::Input && node.input_type == InputType::Checkbox
            }
            DescendantQuery::SubmitInputs => {
                node.kind == NodeKind::Input
                    && matches!(node.input_type, InputType::Submit | InputType::Button)
            }
            DescendantQuery::ActivePasswordInputs => {
                node.is_password_field() && !node.disabled && !node.aria_hidden
            }
            DescendantQuery::FillableInputs => {
                node.kind == NodeKind::Input && node.input_type.is_fillable()
            }
            DescendantQuery::Headings => match node.kind {
                NodeKind::Heading | NodeKind::Legend => true,
                NodeKind::Container => {
                    node.class.contains("heading")
                        || node.class.contains("header")
                        || node.class.contains("title")
                }
                _ => false,
            },
            DescendantQuery::Inputs => node.kind == NodeKind::Input,
        }
    }
}

/// A user-originated input applied by the engine.
///
/// Recorded on the document so hosts can replay it as a real input event
/// (dispatching whatever validation or visibility reactions a keystroke
/// would), as opposed to a silent value write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub node: NodeId,
    pub value: String,
}
