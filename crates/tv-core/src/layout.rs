//! Treemap layout solver.
//!
//! Assigns every hierarchy node a `kurbo::Rect` inside the viewport so that
//! each leaf's area is proportional to its value. Padding follows d3's
//! `treemap().padding(p)`: `p` between siblings and `p` between a parent's
//! edge and its children. The subdivision strategy is a `Tiling`.

use crate::model::Hierarchy;
use kurbo::Rect;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// The drawable area (canvas minus margins).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1290.0,
            height: 990.0,
        }
    }
}

/// Splits a parent rectangle among its children, in sibling order.
pub trait Tiling {
    /// Write a rectangle for every child of `parent` into `out`.
    fn tile(
        &self,
        hierarchy: &Hierarchy,
        parent: NodeIndex,
        rect: Rect,
        out: &mut HashMap<NodeIndex, Rect>,
    );
}

/// Lay out with the default squarified tiling.
pub fn resolve_layout(
    hierarchy: &Hierarchy,
    viewport: Viewport,
    padding: f64,
) -> HashMap<NodeIndex, Rect> {
    resolve_layout_with(hierarchy, viewport, padding, &Squarify::default())
}

/// Lay out with an explicit tiling strategy.
pub fn resolve_layout_with(
    hierarchy: &Hierarchy,
    viewport: Viewport,
    padding: f64,
    tiling: &dyn Tiling,
) -> HashMap<NodeIndex, Rect> {
    let mut bounds = HashMap::with_capacity(hierarchy.len());
    bounds.insert(
        hierarchy.root,
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
    );
    position_node(hierarchy, hierarchy.root, padding, tiling, &mut bounds);
    bounds
}

fn position_node(
    hierarchy: &Hierarchy,
    idx: NodeIndex,
    padding: f64,
    tiling: &dyn Tiling,
    bounds: &mut HashMap<NodeIndex, Rect>,
) {
    let Some(&assigned) = bounds.get(&idx) else {
        return;
    };
    // Half the inner padding is taken from each side of every non-root node.
    let half = if idx == hierarchy.root { 0.0 } else { padding / 2.0 };
    let rect = shrink(assigned, half);
    bounds.insert(idx, rect);

    let children = hierarchy.children(idx);
    if children.is_empty() {
        return;
    }

    let inner = shrink(rect, padding - padding / 2.0);
    tiling.tile(hierarchy, idx, inner, bounds);
    for &child in children {
        position_node(hierarchy, child, padding, tiling, bounds);
    }
}

/// Inset by `d` on all sides, collapsing to the midline instead of inverting.
fn shrink(r: Rect, d: f64) -> Rect {
    let (mut x0, mut y0, mut x1, mut y1) = (r.x0 + d, r.y0 + d, r.x1 - d, r.y1 - d);
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }
    Rect::new(x0, y0, x1, y1)
}

// ─── Row primitives ──────────────────────────────────────────────────────

/// Lay `nodes` side by side horizontally, each spanning the full height.
fn dice(
    hierarchy: &Hierarchy,
    nodes: &[NodeIndex],
    total: f64,
    r: Rect,
    out: &mut HashMap<NodeIndex, Rect>,
) {
    let k = if total > 0.0 { (r.x1 - r.x0) / total } else { 0.0 };
    let mut x = r.x0;
    for &idx in nodes {
        let x_next = x + hierarchy.node(idx).value * k;
        out.insert(idx, Rect::new(x, r.y0, x_next, r.y1));
        x = x_next;
    }
}

/// Stack `nodes` vertically, each spanning the full width.
fn slice(
    hierarchy: &Hierarchy,
    nodes: &[NodeIndex],
    total: f64,
    r: Rect,
    out: &mut HashMap<NodeIndex, Rect>,
) {
    let k = if total > 0.0 { (r.y1 - r.y0) / total } else { 0.0 };
    let mut y = r.y0;
    for &idx in nodes {
        let y_next = y + hierarchy.node(idx).value * k;
        out.insert(idx, Rect::new(r.x0, y, r.x1, y_next));
        y = y_next;
    }
}

// ─── Squarify ────────────────────────────────────────────────────────────

/// Squarified tiling (Bruls, Huizing, van Wijk) as implemented by d3:
/// rows are grown greedily while the worst aspect ratio in the row improves.
#[derive(Debug, Clone, Copy)]
pub struct Squarify {
    /// Target aspect ratio of the tiles.
    pub ratio: f64,
}

impl Default for Squarify {
    fn default() -> Self {
        // Golden ratio.
        Self {
            ratio: (1.0 + 5f64.sqrt()) / 2.0,
        }
    }
}

impl Tiling for Squarify {
    fn tile(
        &self,
        hierarchy: &Hierarchy,
        parent: NodeIndex,
        rect: Rect,
        out: &mut HashMap<NodeIndex, Rect>,
    ) {
        let nodes = hierarchy.children(parent);
        let n = nodes.len();
        let value_of = |i: usize| hierarchy.node(nodes[i]).value;

        let (mut x0, mut y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
        let mut remaining = hierarchy.node(parent).value;
        let mut i0 = 0;
        let mut i1 = 0;

        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Seed the row with the next non-zero node.
            let mut sum = value_of(i1);
            i1 += 1;
            while sum == 0.0 && i1 < n {
                sum = value_of(i1);
                i1 += 1;
            }
            let mut min_value = sum;
            let mut max_value = sum;
            let alpha = (dy / dx).max(dx / dy) / (remaining * self.ratio);
            let mut beta = sum * sum * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            while i1 < n {
                let v = value_of(i1);
                sum += v;
                min_value = min_value.min(v);
                max_value = max_value.max(v);
                beta = sum * sum * alpha;
                let new_ratio = (max_value / beta).max(beta / min_value);
                if new_ratio > min_ratio {
                    sum -= v;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = &nodes[i0..i1];
            if dx < dy {
                let y_split = if remaining > 0.0 { y0 + dy * sum / remaining } else { y1 };
                dice(hierarchy, row, sum, Rect::new(x0, y0, x1, y_split), out);
                if remaining > 0.0 {
                    y0 = y_split;
                }
            } else {
                let x_split = if remaining > 0.0 { x0 + dx * sum / remaining } else { x1 };
                slice(hierarchy, row, sum, Rect::new(x0, y0, x_split, y1), out);
                if remaining > 0.0 {
                    x0 = x_split;
                }
            }
            remaining -= sum;
            i0 = i1;
        }
    }
}

// ─── Binary ──────────────────────────────────────────────────────────────

/// Balanced binary partition: split siblings where the cumulative value is
/// closest to half, cutting along the longer side, and recurse.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binary;

impl Tiling for Binary {
    fn tile(
        &self,
        hierarchy: &Hierarchy,
        parent: NodeIndex,
        rect: Rect,
        out: &mut HashMap<NodeIndex, Rect>,
    ) {
        let nodes = hierarchy.children(parent);
        if nodes.is_empty() {
            return;
        }
        let mut sums = Vec::with_capacity(nodes.len() + 1);
        sums.push(0.0);
        let mut acc = 0.0;
        for &idx in nodes {
            acc += hierarchy.node(idx).value;
            sums.push(acc);
        }
        partition(nodes, &sums, 0, nodes.len(), hierarchy.node(parent).value, rect, out);
    }
}

fn partition(
    nodes: &[NodeIndex],
    sums: &[f64],
    i: usize,
    j: usize,
    value: f64,
    r: Rect,
    out: &mut HashMap<NodeIndex, Rect>,
) {
    if i + 1 >= j {
        out.insert(nodes[i], r);
        return;
    }

    let offset = sums[i];
    let target = value / 2.0 + offset;
    let mut k = i + 1;
    let mut hi = j - 1;
    while k < hi {
        let mid = (k + hi) / 2;
        if sums[mid] < target {
            k = mid + 1;
        } else {
            hi = mid;
        }
    }
    if target - sums[k - 1] < sums[k] - target && i + 1 < k {
        k -= 1;
    }

    let left = sums[k] - offset;
    let right = value - left;

    if r.x1 - r.x0 > r.y1 - r.y0 {
        let xk = if value > 0.0 { (r.x0 * right + r.x1 * left) / value } else { r.x1 };
        partition(nodes, sums, i, k, left, Rect::new(r.x0, r.y0, xk, r.y1), out);
        partition(nodes, sums, k, j, right, Rect::new(xk, r.y0, r.x1, r.y1), out);
    } else {
        let yk = if value > 0.0 { (r.y0 * right + r.y1 * left) / value } else { r.y1 };
        partition(nodes, sums, i, k, left, Rect::new(r.x0, r.y0, r.x1, yk), out);
        partition(nodes, sums, k, j, right, Rect::new(r.x0, yk, r.x1, r.y1), out);
    }
}
