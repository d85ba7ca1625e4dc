//! Raw JSON → annotated hierarchy.
//!
//! Four passes, in order: build the tree with path ids (pre-order), validate
//! leaves, sum values bottom-up, then order siblings by ascending height with
//! ties broken by descending value.

use crate::error::{Result, TreemapError};
use crate::id::{Category, NodeId};
use crate::model::{HierNode, Hierarchy, RawNode};
use petgraph::graph::NodeIndex;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Parse dataset JSON and build the annotated hierarchy.
///
/// # Errors
/// `TreemapError::Json` if the text is not a JSON node tree,
/// `TreemapError::Structure` if the tree fails validation.
pub fn parse_dataset(json: &str, max_depth: usize) -> Result<Hierarchy> {
    let raw: RawNode = serde_json::from_str(json)?;
    build_hierarchy(&raw, max_depth)
}

/// Build, validate, aggregate, and sort.
pub fn build_hierarchy(raw: &RawNode, max_depth: usize) -> Result<Hierarchy> {
    if raw.is_leaf() {
        return Err(TreemapError::structure(&raw.name, "root has no children"));
    }

    let root_id = NodeId::child_of(None, &raw.name);
    let mut hierarchy = Hierarchy::new(HierNode::new(root_id, &raw.name, 0));
    let root = hierarchy.root;
    if let Some(children) = &raw.children {
        for child in children {
            insert_subtree(&mut hierarchy, root, child, max_depth)?;
        }
    }

    aggregate(&mut hierarchy, root);
    sort_siblings(&mut hierarchy);

    log::debug!(
        "built hierarchy `{}`: {} nodes, {} leaves, total {}",
        raw.name,
        hierarchy.len(),
        hierarchy.leaves().len(),
        hierarchy.total_value()
    );
    Ok(hierarchy)
}

fn insert_subtree(
    hierarchy: &mut Hierarchy,
    parent: NodeIndex,
    raw: &RawNode,
    max_depth: usize,
) -> Result<()> {
    let parent_node = hierarchy.node(parent);
    let depth = parent_node.depth + 1;
    let id = NodeId::child_of(Some(parent_node.id), &raw.name);

    if depth > max_depth {
        return Err(TreemapError::structure(
            id.as_str(),
            format!("nesting exceeds the maximum depth of {max_depth}"),
        ));
    }

    let mut node = HierNode::new(id, &raw.name, depth);
    if raw.is_leaf() {
        node.value = leaf_value(raw, id)?;
        node.category = Some(leaf_category(raw, id)?);
        hierarchy.add_node(parent, node);
        return Ok(());
    }

    let idx = hierarchy.add_node(parent, node);
    if let Some(children) = &raw.children {
        for child in children {
            insert_subtree(hierarchy, idx, child, max_depth)?;
        }
    }
    Ok(())
}

fn leaf_value(raw: &RawNode, id: NodeId) -> Result<f64> {
    let value = raw
        .value
        .as_ref()
        .ok_or_else(|| TreemapError::structure(id.as_str(), "leaf has no value"))?;
    let n = value.as_f64().ok_or_else(|| {
        TreemapError::structure(id.as_str(), format!("value {value:?} is not a number"))
    })?;
    if !n.is_finite() || n < 0.0 {
        return Err(TreemapError::structure(
            id.as_str(),
            format!("value {n} must be a finite, non-negative number"),
        ));
    }
    Ok(n)
}

fn leaf_category(raw: &RawNode, id: NodeId) -> Result<Category> {
    raw.category
        .as_deref()
        .map(Category::intern)
        .ok_or_else(|| TreemapError::structure(id.as_str(), "leaf has no category"))
}

/// Post-order: sum leaf values upward and compute heights.
fn aggregate(hierarchy: &mut Hierarchy, idx: NodeIndex) -> (f64, usize) {
    let children: SmallVec<[NodeIndex; 8]> = hierarchy.children(idx).iter().copied().collect();
    if children.is_empty() {
        let node = hierarchy.node(idx);
        return (node.value, 0);
    }

    let mut sum = 0.0;
    let mut height = 0;
    for child in children {
        let (v, h) = aggregate(hierarchy, child);
        sum += v;
        height = height.max(h + 1);
    }
    let node = hierarchy.node_mut(idx);
    node.value = sum;
    node.height = height;
    (sum, height)
}

/// Ascending height, then descending value. Stable, so equal siblings keep
/// document order.
fn sort_siblings(hierarchy: &mut Hierarchy) {
    for parent in hierarchy.descendants() {
        let mut order: SmallVec<[NodeIndex; 8]> =
            hierarchy.children(parent).iter().copied().collect();
        if order.len() < 2 {
            continue;
        }
        order.sort_by(|&a, &b| {
            let (na, nb) = (hierarchy.node(a), hierarchy.node(b));
            na.height
                .cmp(&nb.height)
                .then_with(|| nb.value.partial_cmp(&na.value).unwrap_or(Ordering::Equal))
        });
        hierarchy.set_child_order(parent, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "name": "Sales",
        "children": [
            { "name": "Wii", "children": [
                { "name": "Wii Sports", "category": "Wii", "value": "82.74" },
                { "name": "Mario Kart Wii", "category": "Wii", "value": "35.82" }
            ]},
            { "name": "DS", "children": [
                { "name": "New Super Mario Bros.", "category": "DS", "value": "29.8" },
                { "name": "Nintendogs", "category": "DS", "value": "24.67" },
                { "name": "Brain Age", "category": "DS", "value": "20.22" }
            ]}
        ]
    }"#;

    fn names(h: &Hierarchy, idxs: &[NodeIndex]) -> Vec<String> {
        idxs.iter().map(|&i| h.node(i).name.clone()).collect()
    }

    #[test]
    fn ids_are_dot_joined_paths() {
        let h = parse_dataset(SAMPLE, 32).unwrap();
        assert_eq!(h.node(h.root).id.as_str(), "Sales");
        let sports = h.get_by_id(NodeId::intern("Sales.Wii.Wii Sports")).unwrap();
        assert_eq!(sports.name, "Wii Sports");
        assert_eq!(sports.depth, 2);
    }

    #[test]
    fn values_sum_bottom_up() {
        let h = parse_dataset(SAMPLE, 32).unwrap();
        let wii = h.get_by_id(NodeId::intern("Sales.Wii")).unwrap();
        assert!((wii.value - 118.56).abs() < 1e-9);
        assert!((h.total_value() - (118.56 + 74.69)).abs() < 1e-9);
        assert_eq!(h.node(h.root).height, 2);
        assert_eq!(wii.height, 1);
    }

    #[test]
    fn siblings_sorted_by_descending_value() {
        let h = parse_dataset(SAMPLE, 32).unwrap();
        assert_eq!(names(&h, h.children(h.root)), vec!["Wii", "DS"]);
        let ds = h.index_of(NodeId::intern("Sales.DS")).unwrap();
        assert_eq!(
            names(&h, h.children(ds)),
            vec!["New Super Mario Bros.", "Nintendogs", "Brain Age"]
        );
    }

    #[test]
    fn shallower_subtrees_sort_first() {
        let json = r#"{"name":"r","children":[
            {"name":"deep","children":[{"name":"x","category":"c","value":100}]},
            {"name":"flat","category":"c","value":1}
        ]}"#;
        let h = parse_dataset(json, 32).unwrap();
        assert_eq!(names(&h, h.children(h.root)), vec!["flat", "deep"]);
    }

    #[test]
    fn missing_value_is_a_structure_error() {
        let json = r#"{"name":"r","children":[{"name":"a","category":"c"}]}"#;
        match parse_dataset(json, 32).unwrap_err() {
            TreemapError::Structure { path, reason } => {
                assert_eq!(path, "r.a");
                assert_eq!(reason, "leaf has no value");
            }
            other => panic!("expected structure error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_values_and_missing_categories() {
        let non_numeric = r#"{"name":"r","children":[{"name":"a","category":"c","value":"lots"}]}"#;
        assert!(matches!(
            parse_dataset(non_numeric, 32),
            Err(TreemapError::Structure { .. })
        ));
        let negative = r#"{"name":"r","children":[{"name":"a","category":"c","value":-3}]}"#;
        assert!(matches!(
            parse_dataset(negative, 32),
            Err(TreemapError::Structure { .. })
        ));
        let no_category = r#"{"name":"r","children":[{"name":"a","value":3}]}"#;
        assert!(matches!(
            parse_dataset(no_category, 32),
            Err(TreemapError::Structure { .. })
        ));
    }

    #[test]
    fn rejects_root_without_children_and_excess_depth() {
        assert!(matches!(
            parse_dataset(r#"{"name":"r","children":[]}"#, 32),
            Err(TreemapError::Structure { .. })
        ));
        let deep = r#"{"name":"r","children":[{"name":"a","children":[{"name":"b","category":"c","value":1}]}]}"#;
        assert!(parse_dataset(deep, 2).is_ok());
        assert!(matches!(
            parse_dataset(deep, 1),
            Err(TreemapError::Structure { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            parse_dataset("{\"name\": ", 32),
            Err(TreemapError::Json(_))
        ));
    }
}
