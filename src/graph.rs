//! Directed rating graph and its centrality measures.
//!
//! Nodes are indexed densely by their numeric id, so a graph whose largest id
//! is `k` holds `k + 1` slots. Ids that never occur in an edge are kept out of
//! rankings via [`Graph::contains`].

use anyhow::{Result, bail};
use std::collections::VecDeque;

use crate::cleaner::Edge;

pub type Vertex = usize;
pub type AdjacencyLists = Vec<Vec<Vertex>>;

#[derive(Debug)]
pub struct Graph {
    pub n: usize,
    pub outedges: AdjacencyLists,
    pub inedges: AdjacencyLists,
    present: Vec<bool>,
}

impl Graph {
    /// Builds a graph with `n` slots from `(source, target)` pairs.
    ///
    /// Adjacency lists are sorted. Repeated pairs are kept, one entry per rating.
    ///
    /// # Panics
    ///
    /// Panics if a pair refers to a vertex `>= n`.
    pub fn create_directed(n: usize, edges: &[(Vertex, Vertex)]) -> Graph {
        let mut g = Graph {
            n,
            outedges: vec![Vec::new(); n],
            inedges: vec![Vec::new(); n],
            present: vec![false; n],
        };

        for &(u, v) in edges {
            g.outedges[u].push(v);
            g.inedges[v].push(u);
            g.present[u] = true;
            g.present[v] = true;
        }
        for l in g.outedges.iter_mut().chain(g.inedges.iter_mut()) {
            l.sort_unstable();
        }

        g
    }

    /// Builds a graph from cleaned edges, sized to the largest node id.
    ///
    /// # Errors
    ///
    /// Returns an error if a node id is negative.
    pub fn from_edges(edges: &[Edge]) -> Result<Graph> {
        let mut pairs = Vec::with_capacity(edges.len());
        let mut n = 0;

        for edge in edges {
            let (Ok(u), Ok(v)) =
                (Vertex::try_from(edge.source), Vertex::try_from(edge.target))
            else {
                bail!(
                    "edge {} -> {} has a negative node id",
                    edge.source,
                    edge.target
                );
            };
            n = n.max(u + 1).max(v + 1);
            pairs.push((u, v));
        }

        Ok(Self::create_directed(n, &pairs))
    }

    /// True if `node` is an endpoint of at least one edge.
    pub fn contains(&self, node: Vertex) -> bool {
        self.present.get(node).copied().unwrap_or(false)
    }

    pub fn node_count(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    pub fn edge_count(&self) -> usize {
        self.outedges.iter().map(Vec::len).sum()
    }

    /// Returns `(in_degree, out_degree)` for every slot.
    pub fn degree_centrality(&self) -> (Vec<usize>, Vec<usize>) {
        let in_degree = self.inedges.iter().map(Vec::len).collect();
        let out_degree = self.outedges.iter().map(Vec::len).collect();
        (in_degree, out_degree)
    }

    /// Closeness of each node over the nodes it can reach along out-edges:
    /// reachable count divided by the summed distance. Nodes reaching nothing score 0.
    pub fn closeness(&self) -> Vec<f64> {
        let mut cent = vec![0.0; self.n];

        for (i, c) in cent.iter_mut().enumerate() {
            let mut total_distance = 0usize;
            let mut reachable = 0usize;

            for d in bfs(i, &self.outedges).into_iter().flatten() {
                if d > 0 {
                    total_distance += d;
                    reachable += 1;
                }
            }
            if total_distance > 0 {
                *c = reachable as f64 / total_distance as f64;
            }
        }
        cent
    }

    /// Unnormalized directed betweenness (Brandes).
    pub fn betweenness(&self) -> Vec<f64> {
        let n = self.n;
        let mut centrality = vec![0.0; n];

        for s in 0..n {
            if self.outedges[s].is_empty() {
                continue;
            }

            let mut stack = Vec::new();
            let mut pred: Vec<Vec<Vertex>> = vec![Vec::new(); n];
            let mut sigma = vec![0.0f64; n];
            let mut dist: Vec<Option<usize>> = vec![None; n];
            sigma[s] = 1.0;
            dist[s] = Some(0);

            let mut queue = VecDeque::new();
            queue.push_back(s);
            while let Some(v) = queue.pop_front() {
                stack.push(v);
                let dv = dist[v].unwrap_or_default();
                for &w in &self.outedges[v] {
                    if dist[w].is_none() {
                        dist[w] = Some(dv + 1);
                        queue.push_back(w);
                    }
                    if dist[w] == Some(dv + 1) {
                        sigma[w] += sigma[v];
                        pred[w].push(v);
                    }
                }
            }

            let mut delta = vec![0.0; n];
            while let Some(w) = stack.pop() {
                for &v in &pred[w] {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
                if w != s {
                    centrality[w] += delta[w];
                }
            }
        }
        centrality
    }
}

/// Shortest hop counts from `start` to every vertex, `None` where unreachable.
pub fn bfs(start: Vertex, graph: &AdjacencyLists) -> Vec<Option<usize>> {
    let mut distance = vec![None; graph.len()];
    let mut queue = VecDeque::new();
    distance[start] = Some(0);
    queue.push_back((start, 0));

    while let Some((v, d)) = queue.pop_front() {
        for &u in &graph[v] {
            if distance[u].is_none() {
                distance[u] = Some(d + 1);
                queue.push_back((u, d + 1));
            }
        }
    }
    distance
}

/// Pairs every slot with its degree, highest first. Ties keep ascending node order.
pub fn sort_nodes_by_degree(degrees: &[usize]) -> Vec<(Vertex, usize)> {
    let mut nodes: Vec<(Vertex, usize)> = degrees.iter().copied().enumerate().collect();
    nodes.sort_by(|a, b| b.1.cmp(&a.1));
    nodes
}

/// Pairs every slot with its score, highest first. Ties keep ascending node order.
pub fn sort_nodes_by_score(scores: &[f64]) -> Vec<(Vertex, f64)> {
    let mut nodes: Vec<(Vertex, f64)> = scores.iter().copied().enumerate().collect();
    nodes.sort_by(|a, b| b.1.total_cmp(&a.1));
    nodes
}
