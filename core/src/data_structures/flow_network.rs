//! Capacitated flow network with paired residual edges
//!
//! Vertices own an ordered list of outgoing forward edges; every forward edge
//! is stored next to a zero-capacity backward twin in a single edge arena and
//! the two reference each other by index. Topology is fixed once built and
//! only flow values change between max-flow runs.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use super::matrix::CapacityMatrix;

/// Vertex identifier, a position in `0..vertex_count`
pub type NodeId = usize;

/// Edge capacity
pub type Capacity = i64;

/// Flow value; negative on backward edges
pub type Flow = i64;

/// Ordered vertex sequence from a source to a target
pub type Path = Vec<NodeId>;

/// Flow edge representation with residual capacity tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Source vertex
    pub from: NodeId,
    /// Target vertex
    pub to: NodeId,
    /// Original edge capacity (0 for backward edges)
    pub capacity: Capacity,
    /// Current flow through edge
    pub flow: Flow,
    /// Index of the paired edge in the opposite direction
    pub reverse_edge_index: usize,
}

impl FlowEdge {
    /// Get residual capacity for forward direction
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// Whether this edge was created from a matrix entry
    #[inline]
    pub fn is_forward(&self) -> bool {
        self.capacity > 0
    }
}

/// Vertex with its outgoing forward edges in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: NodeId,
    outgoing: Vec<usize>,
}

impl Vertex {
    fn new(id: NodeId) -> Self {
        Self { id, outgoing: Vec::new() }
    }

    /// Indices of outgoing forward edges, in insertion order
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }
}

/// Flow network for one problem instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork {
    /// Free-text title taken from the input header
    title: String,
    vertices: Vec<Vertex>,
    edges: Vec<FlowEdge>,
    /// Multicast sinks, 0-based, in input order
    receivers: Vec<NodeId>,
}

impl FlowNetwork {
    /// Create new flow network with specified vertex count and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            title: String::new(),
            vertices: (0..vertex_count).map(Vertex::new).collect(),
            edges: Vec::new(),
            receivers: Vec::new(),
        }
    }

    /// Build a network from a capacity matrix, one forward edge per
    /// positive off-diagonal entry
    pub fn from_matrix(matrix: &CapacityMatrix) -> Self {
        let mut network = Self::new(matrix.len());
        for (from, row) in matrix.iter().enumerate() {
            for (to, &capacity) in row.iter().enumerate() {
                if capacity > 0 {
                    network.add_edge(from, to, capacity);
                }
            }
        }
        network
    }

    /// Add edge to flow network together with its zero-capacity backward
    /// twin. Self-loops and non-positive capacities are ignored.
    ///
    /// Returns the index of the forward edge when one was added.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: Capacity) -> Option<usize> {
        if from == to || capacity <= 0 {
            return None;
        }
        let needed = from.max(to) + 1;
        while self.vertices.len() < needed {
            let id = self.vertices.len();
            self.vertices.push(Vertex::new(id));
        }

        let forward_edge_index = self.edges.len();
        let reverse_edge_index = forward_edge_index + 1;

        self.edges.push(FlowEdge {
            from,
            to,
            capacity,
            flow: 0,
            reverse_edge_index,
        });
        self.edges.push(FlowEdge {
            from: to,
            to: from,
            capacity: 0,
            flow: 0,
            reverse_edge_index: forward_edge_index,
        });

        // Only forward edges are traversable
        self.vertices[from].outgoing.push(forward_edge_index);
        Some(forward_edge_index)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_receivers(&mut self, receivers: Vec<NodeId>) {
        self.receivers = receivers;
    }

    pub fn receivers(&self) -> &[NodeId] {
        &self.receivers
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: NodeId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.vertices.len()
    }

    /// All edges, forward and backward
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn edge(&self, index: usize) -> &FlowEdge {
        &self.edges[index]
    }

    /// Forward edges only
    pub fn forward_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter().filter(|edge| edge.is_forward())
    }

    /// Outgoing neighbour identifiers of a vertex in insertion order
    pub fn neighbours(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let edges = &self.edges;
        self.vertices
            .get(id)
            .into_iter()
            .flat_map(move |vertex| vertex.outgoing.iter().map(move |&index| edges[index].to))
    }

    /// Look up the forward edge `(from, to)` through the adjacency index
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<usize> {
        self.vertices
            .get(from)?
            .outgoing
            .iter()
            .copied()
            .find(|&index| self.edges[index].to == to)
    }

    /// Largest capacity over all edges
    pub fn max_capacity(&self) -> Capacity {
        self.edges.iter().map(|edge| edge.capacity).max().unwrap_or(0)
    }

    /// Push flow along an edge and mirror it on the paired edge
    pub fn push_flow(&mut self, edge_index: usize, delta: Flow) {
        let reverse_index = self.edges[edge_index].reverse_edge_index;
        self.edges[edge_index].flow += delta;
        self.edges[reverse_index].flow -= delta;
    }

    /// Zero the flow on every edge. Must run before each max-flow
    /// computation; topology is left untouched.
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// Original capacities as a dense matrix
    pub fn capacity_matrix(&self) -> CapacityMatrix {
        let n = self.vertex_count();
        let mut matrix = vec![vec![0; n]; n];
        for edge in self.forward_edges() {
            matrix[edge.from][edge.to] = edge.capacity;
        }
        matrix
    }
}
