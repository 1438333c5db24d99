//! Hierarchy inference over a parsed chart.
//!
//! The DSL never states parent/child nesting directly; the tree is
//! derived from call edges. Connections are scanned in declaration
//! order, then conditional branches, and the first edge targeting a
//! module decides its parent. Later edges to the same module keep
//! their arrows in the drawing but do not move it in the tree.

use indexmap::IndexMap;
use log::debug;

use trellis_core::chart::Chart;

/// The derived call tree: child lists per parent plus the root set.
///
/// Only edges between two declared modules count; an edge in or out
/// of an undeclared id contributes nothing, so a declared module with
/// an undeclared caller stays a root. Self edges are ignored for the
/// same reason a module cannot contain itself.
#[derive(Debug)]
pub struct Hierarchy {
    children: IndexMap<String, Vec<String>>,
    roots: Vec<String>,
}

impl Hierarchy {
    /// Derives the hierarchy from the chart's connections and
    /// conditionals.
    ///
    /// Connections win over conditional branches for parentage, and
    /// within each list earlier declarations win over later ones.
    pub fn from_chart(chart: &Chart) -> Self {
        let mut children: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut parents: IndexMap<&str, &str> = IndexMap::new();

        let connection_edges = chart
            .connections()
            .iter()
            .map(|conn| (conn.from(), conn.to()));
        let conditional_edges = chart.conditionals().iter().flat_map(|cond| {
            cond.targets()
                .iter()
                .map(move |target| (cond.from(), target.as_str()))
        });

        for (from, to) in connection_edges.chain(conditional_edges) {
            if from == to {
                continue;
            }
            if chart.module(from).is_none() || chart.module(to).is_none() {
                continue;
            }
            if parents.contains_key(to) {
                continue;
            }
            parents.insert(to, from);
            children.entry(from.to_string()).or_default().push(to.to_string());
        }

        let roots: Vec<String> = chart
            .modules()
            .keys()
            .filter(|id| !parents.contains_key(id.as_str()))
            .cloned()
            .collect();

        debug!(
            roots = roots.len(),
            parented = parents.len();
            "Hierarchy resolved"
        );

        Self { children, roots }
    }

    /// Child ids of `id` in edge-declaration order.
    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Declared modules nobody calls, in declaration order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_parser::parse;

    fn hierarchy(source: &str) -> Hierarchy {
        let (chart, _) = parse(source);
        Hierarchy::from_chart(&chart)
    }

    #[test]
    fn test_roots_follow_declaration_order() {
        let h = hierarchy("module b \"B\"\nmodule a \"A\"\n");
        assert_eq!(h.roots(), ["b", "a"]);
    }

    #[test]
    fn test_first_edge_wins() {
        let source = concat!(
            "module a \"A\"\n",
            "module b \"B\"\n",
            "module c \"C\"\n",
            "a -> c\n",
            "b -> c\n",
        );
        let h = hierarchy(source);

        assert_eq!(h.children("a"), ["c"]);
        assert!(h.children("b").is_empty());
        assert_eq!(h.roots(), ["a", "b"]);
    }

    #[test]
    fn test_connections_outrank_conditional_branches() {
        let source = concat!(
            "module a \"A\"\n",
            "module b \"B\"\n",
            "module c \"C\"\n",
            "conditional b c\n",
            "a -> c\n",
        );
        let h = hierarchy(source);

        // The connection is scanned first even though the conditional
        // was declared earlier.
        assert_eq!(h.children("a"), ["c"]);
        assert!(h.children("b").is_empty());
    }

    #[test]
    fn test_duplicate_edges_keep_child_once() {
        let source = concat!(
            "module a \"A\"\n",
            "module b \"B\"\n",
            "a -> b data request\n",
            "a -> b control done\n",
        );
        let h = hierarchy(source);
        assert_eq!(h.children("a"), ["b"]);
    }

    #[test]
    fn test_edges_to_undeclared_modules_do_not_parent() {
        let source = concat!(
            "module a \"A\"\n",
            "module b \"B\"\n",
            "ghost -> b\n",
            "a -> ghost\n",
        );
        let h = hierarchy(source);

        // `b`'s only caller is undeclared, so it stays a root.
        assert_eq!(h.roots(), ["a", "b"]);
        assert!(h.children("a").is_empty());
    }

    #[test]
    fn test_cycle_leaves_no_roots() {
        let source = concat!(
            "module a \"A\"\n",
            "module b \"B\"\n",
            "a -> b\n",
            "b -> a\n",
        );
        let h = hierarchy(source);
        assert!(h.roots().is_empty());
    }
}
