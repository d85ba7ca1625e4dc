//! Core data model: raw dataset JSON, colors, and the annotated hierarchy.
//!
//! The hierarchy is a tree stored in a `StableDiGraph` where edges point
//! parent→child. Only leaves carry a category; every node carries the
//! aggregated value of the leaves beneath it. Sibling order is explicit
//! (see `Hierarchy::set_child_order`) because it drives layout placement.

use crate::id::{Category, NodeId};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::Deserialize;
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Colors ──────────────────────────────────────────────────────────────

/// Opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            // Short form doubles each digit: `f` → `ff`.
            3 => {
                let mut c = digits.chars().filter_map(|d| d.to_digit(16)).map(|v| v as u8 * 17);
                Some(Self::rgb(c.next()?, c.next()?, c.next()?))
            }
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`, the form d3 color schemes use.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ─── Raw dataset JSON ────────────────────────────────────────────────────

/// A node exactly as it appears in the fetched JSON.
///
/// Internal nodes carry `children`; leaves carry `category` and `value`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default)]
    pub children: Option<Vec<RawNode>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<RawValue>,
}

impl RawNode {
    pub fn is_leaf(&self) -> bool {
        self.children.as_ref().is_none_or(|c| c.is_empty())
    }
}

/// Leaf values are published both as JSON numbers and numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric value, or `None` if a string does not parse as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

// ─── Hierarchy ───────────────────────────────────────────────────────────

/// A node of the annotated hierarchy.
#[derive(Debug, Clone)]
pub struct HierNode {
    /// Dot-joined path from the root.
    pub id: NodeId,
    pub name: String,
    /// Present on leaves only.
    pub category: Option<Category>,
    /// Leaf value, or the sum of all descendant leaf values.
    pub value: f64,
    /// Distance from the root (root = 0).
    pub depth: usize,
    /// Longest distance to a descendant leaf (leaf = 0).
    pub height: usize,
}

impl HierNode {
    pub fn new(id: NodeId, name: impl Into<String>, depth: usize) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            value: 0.0,
            depth,
            height: 0,
        }
    }
}

/// The rooted, annotated tree produced by `build_hierarchy`.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    pub graph: StableDiGraph<HierNode, ()>,
    pub root: NodeIndex,
    /// First node registered under each path id.
    pub id_index: HashMap<NodeId, NodeIndex>,
    child_order: HashMap<NodeIndex, SmallVec<[NodeIndex; 8]>>,
}

impl Hierarchy {
    /// Create a hierarchy containing only `root`.
    pub fn new(root: HierNode) -> Self {
        let mut graph = StableDiGraph::new();
        let id = root.id;
        let root = graph.add_node(root);
        let mut id_index = HashMap::new();
        id_index.insert(id, root);
        Self {
            graph,
            root,
            id_index,
            child_order: HashMap::new(),
        }
    }

    /// Append `node` as the last child of `parent`.
    pub fn add_node(&mut self, parent: NodeIndex, node: HierNode) -> NodeIndex {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.child_order.entry(parent).or_default().push(idx);
        if self.id_index.contains_key(&id) {
            log::debug!("duplicate path id {id}; lookups resolve to the first node");
        } else {
            self.id_index.insert(id, idx);
        }
        idx
    }

    pub fn node(&self, idx: NodeIndex) -> &HierNode {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut HierNode {
        &mut self.graph[idx]
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn get_by_id(&self, id: NodeId) -> Option<&HierNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Children in their current sibling order.
    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.child_order
            .get(&idx)
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the sibling order of `parent`. `order` must be a permutation
    /// of the current children.
    pub fn set_child_order(&mut self, parent: NodeIndex, order: SmallVec<[NodeIndex; 8]>) {
        debug_assert_eq!(order.len(), self.children(parent).len());
        self.child_order.insert(parent, order);
    }

    pub fn is_leaf(&self, idx: NodeIndex) -> bool {
        self.children(idx).is_empty()
    }

    /// Every node, parents before children, siblings in order.
    pub fn descendants(&self) -> Vec<NodeIndex> {
        let mut out = Vec::with_capacity(self.graph.node_count());
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.children(idx).iter().rev().copied());
        }
        out
    }

    /// Leaves in pre-order; this is the render order of tiles.
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.descendants()
            .into_iter()
            .filter(|&idx| self.is_leaf(idx))
            .collect()
    }

    pub fn total_value(&self) -> f64 {
        self.graph[self.root].value
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
