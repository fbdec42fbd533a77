//! Document arena - the form-element tree the engine classifies
//!
//! The engine never owns host elements; the host flattens the relevant part
//! of its element tree into this arena before a classification pass and
//! reads the scores (and the input-event log) back out. Append order must be
//! document preorder: a parent is appended before its children, siblings in
//! declaration order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::types::*;

struct Entry {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed element tree with the query surface the feature library needs
#[derive(Default)]
pub struct Document {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
    /// First node appended with a given id wins, like getElementById
    id_index: FxHashMap<String, NodeId>,
    events: Vec<InputEvent>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node under `parent` (or at the top level).
    ///
    /// Panics if `parent` was not returned by a previous `append` on this
    /// document; ids from other documents are a caller bug.
    pub fn append(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        if let Some(p) = parent {
            assert!(p.index() < self.entries.len(), "parent id out of bounds");
        }
        let id = NodeId(self.entries.len() as u32);
        if !node.id.is_empty() {
            self.id_index.entry(node.id.clone()).or_insert(id);
        }
        self.entries.push(Entry {
            node,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.entries[p.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.index()].node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.index()].children
    }

    pub fn by_id(&self, element_id: &str) -> Option<NodeId> {
        self.id_index.get(element_id).copied()
    }

    /// Whether `a` precedes `b` in document order
    pub fn precedes(&self, a: NodeId, b: NodeId) -> bool {
        a < b
    }

    fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(p) => self.children(p),
            None => &self.roots,
        }
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let pos = siblings.iter().position(|&s| s == id)?;
        pos.checked_sub(1).map(|i| siblings[i])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Subtree text, own text first, children in document order.
    /// Fragments are joined with a single space.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let own = &self.node(id).text;
        if !own.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(own);
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Ancestor chain from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        let mut chain = SmallVec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            chain.push(p);
            cur = self.parent(p);
        }
        chain
    }

    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Lowest common ancestor of two nodes, walking both ancestor chains from
    /// the root and taking the last common node before divergence.
    ///
    /// Returns None when the chains never diverge (one node contains the
    /// other) or share no root, mirroring the virtual-scope heuristic this
    /// backs: such pairs give no usable scope.
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain_a = self.ancestors(a);
        let chain_b = self.ancestors(b);
        let mut common = None;
        for (&x, &y) in chain_a.iter().rev().zip(chain_b.iter().rev()) {
            if x != y {
                return common;
            }
            common = Some(x);
        }
        None
    }

    /// Nearest Form ancestor, the owning form of a field
    pub fn form(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if self.node(p).kind == NodeKind::Form {
                return Some(p);
            }
            cur = self.parent(p);
        }
        None
    }

    /// Labels associated with a field: `for`-referencing labels first, then
    /// an ancestor label without a `for` attribute, in document order
    pub fn labels(&self, id: NodeId) -> SmallVec<[NodeId; 2]> {
        let mut out: SmallVec<[NodeId; 2]> = SmallVec::new();
        let element_id = &self.node(id).id;
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.node.kind != NodeKind::Label {
                continue;
            }
            let label = NodeId(idx as u32);
            match &entry.node.for_id {
                Some(for_id) => {
                    if !element_id.is_empty() && for_id == element_id {
                        out.push(label);
                    }
                }
                None => {
                    if self.is_ancestor(label, id) {
                        out.push(label);
                    }
                }
            }
        }
        out
    }

    /// Nodes referenced by aria-labelledby, in attribute order, dropping
    /// dangling ids
    pub fn aria_labelled_by(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        let mut out = SmallVec::new();
        if let Some(refs) = self.node(id).aria_labelledby.as_deref() {
            for token in refs.split_ascii_whitespace() {
                if let Some(target) = self.by_id(token) {
                    out.push(target);
                }
            }
        }
        out
    }

    /// Descendants of `scope` matching `query`, document order, scope
    /// excluded. `None` scopes the query to the whole document.
    ///
    /// Callers inside a classification pass go through the fact cache
    /// instead of calling this directly.
    pub fn descendants(&self, scope: Option<NodeId>, query: DescendantQuery) -> Vec<NodeId> {
        let mut out = Vec::new();
        match scope {
            Some(scope) => {
                for &child in self.children(scope) {
                    self.collect_descendants(child, query, &mut out);
                }
            }
            None => {
                for &root in &self.roots {
                    self.collect_descendants(root, query, &mut out);
                }
            }
        }
        out
    }

    fn collect_descendants(&self, id: NodeId, query: DescendantQuery, out: &mut Vec<NodeId>) {
        if query.matches(self.node(id)) {
            out.push(id);
        }
        for &child in self.children(id) {
            self.collect_descendants(child, query, out);
        }
    }

    /// Input descendants of a scope in declaration order, the scope's field
    /// list
    pub fn fields(&self, scope: NodeId) -> Vec<NodeId> {
        self.descendants(Some(scope), DescendantQuery::Inputs)
    }

    /// Nearest fillable input preceding `id` in document order, used to
    /// synthesize a virtual scope for fields without an owning form
    pub fn closest_preceding_fillable(&self, id: NodeId) -> Option<NodeId> {
        (0..id.index())
            .rev()
            .map(|i| NodeId(i as u32))
            .find(|&c| DescendantQuery::FillableInputs.matches(self.node(c)))
    }

    /// Whether a node is visible to the user, combining the host-supplied
    /// flag with aria-hidden and the hidden input type
    pub fn is_visible(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.visible && !node.aria_hidden && node.input_type != InputType::Hidden
    }

    /// Euclidean on-screen distance between two nodes. Nodes without a
    /// position sort after every positioned node.
    pub fn euclidean(&self, a: NodeId, b: NodeId) -> f32 {
        match (self.node(a).position, self.node(b).position) {
            (Some((ax, ay)), Some((bx, by))) => {
                let dx = ax - bx;
                let dy = ay - by;
                (dx * dx + dy * dy).sqrt()
            }
            _ => f32::INFINITY,
        }
    }

    /// Of `candidates`, the one closest on screen to `to`; ties and missing
    /// positions resolve to the first encountered
    pub fn closest_to(&self, candidates: &[NodeId], to: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for &c in candidates {
            let d = self.euclidean(c, to);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Write a value as user-originated input: the value changes and an
    /// event is recorded for the host to replay, unlike a silent write
    pub fn set_user_input(&mut self, id: NodeId, value: &str) {
        self.entries[id.index()].node.value = value.to_string();
        self.events.push(InputEvent {
            node: id,
            value: value.to_string(),
        });
    }

    /// User-input events applied so far, oldest first
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}
