//! Compressed Sparse Row (CSR) graph representation
//!
//! PageRank touches every edge once per iteration, so edges are stored
//! contiguously per source node.

use super::builder::GraphBuilder;

/// A frozen co-occurrence graph in CSR layout
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Node i's edges live at `row_ptr[i]..row_ptr[i + 1]`
    pub row_ptr: Vec<usize>,
    /// Target node of each edge
    pub col_idx: Vec<u32>,
    /// Weight of each edge
    pub weights: Vec<f64>,
    /// Sum of outgoing edge weights per node
    pub total_weight: Vec<f64>,
    /// Node key per node
    pub keys: Vec<String>,
}

impl CsrGraph {
    /// Freeze a [`GraphBuilder`]; node IDs are preserved
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut total_weight = Vec::with_capacity(num_nodes);
        let mut keys = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (_, node) in builder.nodes() {
            keys.push(node.key.clone());

            // Sorted targets make iteration order independent of hashing
            let mut edges: Vec<(u32, f64)> = node.edges.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|&(k, _)| k);

            total_weight.push(edges.iter().map(|(_, w)| w).sum());
            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            total_weight,
            keys,
        }
    }

    /// Iterate over `(neighbor, weight)` pairs of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Number of neighbors of a node
    pub fn degree(&self, node: u32) -> usize {
        self.row_ptr[node as usize + 1] - self.row_ptr[node as usize]
    }

    /// Total outgoing weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Weight of the edge between two nodes, if any
    pub fn edge_weight(&self, from: u32, to: u32) -> Option<f64> {
        let start = self.row_ptr[from as usize];
        let end = self.row_ptr[from as usize + 1];
        self.col_idx[start..end]
            .binary_search(&to)
            .ok()
            .map(|i| self.weights[start + i])
    }

    /// Key of a node
    pub fn key(&self, node: u32) -> &str {
        &self.keys[node as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Number of stored edges (each undirected edge counts twice)
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Nodes without neighbors
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.degree(n) == 0)
            .collect()
    }

    /// Node ID for a key (linear scan)
    pub fn get_node_by_key(&self, key: &str) -> Option<u32> {
        self.keys.iter().position(|k| k == key).map(|i| i as u32)
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
            keys: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("Nfiets");
        let b = builder.get_or_create_node("Nstad");
        let c = builder.get_or_create_node("Agroen");

        builder.increment_edge(a, b, 1.0);
        builder.increment_edge(b, c, 2.0);
        builder.increment_edge(a, c, 1.5);

        builder
    }

    #[test]
    fn test_csr_conversion() {
        let csr = CsrGraph::from_builder(&build_test_graph());

        assert_eq!(csr.num_nodes, 3);
        assert_eq!(csr.keys, vec!["Nfiets", "Nstad", "Agroen"]);
        assert_eq!(csr.key(2), "Agroen");
        assert_eq!(csr.num_edges(), 6);
    }

    #[test]
    fn test_neighbors_sorted_by_target() {
        let csr = CsrGraph::from_builder(&build_test_graph());

        let neighbors: Vec<_> = csr.neighbors(0).collect();
        assert_eq!(neighbors, vec![(1, 1.0), (2, 1.5)]);
    }

    #[test]
    fn test_degree_and_weight() {
        let csr = CsrGraph::from_builder(&build_test_graph());

        assert_eq!(csr.degree(0), 2);
        assert!((csr.node_total_weight(0) - 2.5).abs() < 1e-10);
        assert!((csr.node_total_weight(1) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_edge_weight_lookup() {
        let csr = CsrGraph::from_builder(&build_test_graph());

        assert_eq!(csr.edge_weight(1, 2), Some(2.0));
        assert_eq!(csr.edge_weight(2, 1), Some(2.0));
        assert_eq!(csr.edge_weight(0, 0), None);
    }

    #[test]
    fn test_empty_graph() {
        let csr = CsrGraph::from_builder(&GraphBuilder::new());

        assert!(csr.is_empty());
        assert_eq!(csr.num_edges(), 0);
        assert!(CsrGraph::default().dangling_nodes().is_empty());
    }

    #[test]
    fn test_dangling_nodes() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        builder.get_or_create_node("c");
        builder.increment_edge(a, b, 1.0);

        let csr = CsrGraph::from_builder(&builder);

        assert_eq!(csr.dangling_nodes(), vec![2]);
    }

    #[test]
    fn test_get_node_by_key() {
        let csr = CsrGraph::from_builder(&build_test_graph());

        assert_eq!(csr.get_node_by_key("Nfiets"), Some(0));
        assert_eq!(csr.get_node_by_key("Agroen"), Some(2));
        assert_eq!(csr.get_node_by_key("Nhuis"), None);
    }
}
