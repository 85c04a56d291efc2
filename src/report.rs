//! Centrality rankings for the full network and for individual year files.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::cleaner::clean;
use crate::config::SplitConfig;
use crate::graph::{Graph, Vertex, sort_nodes_by_degree, sort_nodes_by_score};
use crate::loader::load_edges;

const SEPARATOR: &str = "------------------------------------------------------";

/// Which edges a report covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scope {
    Full,
    Year(i32),
}

/// Top-ranked nodes of one graph.
///
/// Degree rankings are only filled in for [`Scope::Full`].
#[derive(Debug)]
pub struct GraphReport {
    pub scope: Scope,
    pub nodes: usize,
    pub edges: usize,
    pub top_n: usize,
    pub out_degree: Option<Vec<(Vertex, usize)>>,
    pub in_degree: Option<Vec<(Vertex, usize)>>,
    pub closeness: Vec<(Vertex, f64)>,
    pub betweenness: Vec<(Vertex, f64)>,
}

impl GraphReport {
    /// Ranks the nodes of `graph`, keeping the best `top_n` per measure.
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn build(scope: Scope, graph: &Graph, top_n: usize) -> Self {
        let top_degrees = |degrees: &[usize]| {
            sort_nodes_by_degree(degrees)
                .into_iter()
                .filter(|(node, _)| graph.contains(*node))
                .take(top_n)
                .collect::<Vec<_>>()
        };
        let top_scores = |scores: &[f64]| {
            sort_nodes_by_score(scores)
                .into_iter()
                .filter(|(node, _)| graph.contains(*node))
                .take(top_n)
                .collect::<Vec<_>>()
        };

        let (out_degree, in_degree) = match scope {
            Scope::Full => {
                let (in_deg, out_deg) = graph.degree_centrality();
                (Some(top_degrees(&out_deg)), Some(top_degrees(&in_deg)))
            }
            Scope::Year(_) => (None, None),
        };

        let closeness = top_scores(&graph.closeness());
        debug!("Closeness ranked");
        let betweenness = top_scores(&graph.betweenness());
        debug!("Betweenness ranked");

        GraphReport {
            scope,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            top_n,
            out_degree,
            in_degree,
            closeness,
            betweenness,
        }
    }
}

impl fmt::Display for GraphReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Scope::Year(year) = self.scope {
            writeln!(f, "{SEPARATOR}")?;
            writeln!(f, "{year} Subgraph")?;
        }

        if let Some(out_degree) = &self.out_degree {
            writeln!(f, "Sorted by out-degrees:")?;
            for (i, (node, degree)) in out_degree.iter().enumerate() {
                writeln!(f, "{}. Node {} -> out-degree: {}", i + 1, node, degree)?;
            }
        }
        if let Some(in_degree) = &self.in_degree {
            writeln!(f, "\nSorted by in-degrees:")?;
            for (i, (node, degree)) in in_degree.iter().enumerate() {
                writeln!(f, "{}. Node {} <- in-degree: {}", i + 1, node, degree)?;
            }
        }

        writeln!(f, "\nTop {} nodes by closeness centrality:", self.top_n)?;
        for (node, score) in &self.closeness {
            writeln!(f, "Node {}: {:.4}", node, score)?;
        }

        writeln!(f, "\nTop {} nodes by betweenness centrality:", self.top_n)?;
        for (node, score) in &self.betweenness {
            writeln!(f, "Node {}: {:.4}", node, score)?;
        }
        Ok(())
    }
}

/// Loads and cleans an edge CSV, then builds its directed graph.
pub fn load_graph(path: &Path) -> Result<Graph> {
    let rows = load_edges(path)?;
    let cleaned = clean(rows)?;
    Graph::from_edges(&cleaned.edges)
        .with_context(|| format!("building graph from {}", path.display()))
}

/// Ranks the full network from `config.input`, then each year in
/// `config.report_years` whose file exists under `config.output_dir`.
///
/// # Errors
///
/// Returns an error if the input or an existing year file fails to load.
#[tracing::instrument(skip_all, fields(input = %config.input.display()))]
pub fn run_report(config: &SplitConfig) -> Result<Vec<GraphReport>> {
    let mut reports = Vec::with_capacity(config.report_years.len() + 1);

    let graph = load_graph(&config.input)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Full graph loaded"
    );
    reports.push(GraphReport::build(Scope::Full, &graph, config.top_n));

    for &year in &config.report_years {
        let path = config.year_file(year);
        if !path.exists() {
            warn!(year, path = %path.display(), "Year file missing, skipping");
            continue;
        }

        let graph = load_graph(&path)?;
        info!(
            year,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Year graph loaded"
        );
        reports.push(GraphReport::build(Scope::Year(year), &graph, config.top_n));
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn star_graph() -> Graph {
        // 1 -> {2, 3, 4}, 2 -> 3, 3 -> 4
        Graph::create_directed(5, &[(1, 2), (1, 3), (1, 4), (2, 3), (3, 4)])
    }

    #[test]
    fn test_full_report_ranks_degrees() {
        let report = GraphReport::build(Scope::Full, &star_graph(), 2);

        assert_eq!(report.nodes, 4);
        assert_eq!(report.edges, 5);
        assert_eq!(report.out_degree, Some(vec![(1, 3), (2, 1)]));
        assert_eq!(report.in_degree, Some(vec![(3, 2), (4, 2)]));
        assert_eq!(report.closeness.len(), 2);
        assert_eq!(report.betweenness.len(), 2);
    }

    #[test]
    fn test_absent_slots_are_not_ranked() {
        // Slot 0 has no edges and must not appear even with a large top_n.
        let report = GraphReport::build(Scope::Full, &star_graph(), 10);

        assert_eq!(report.closeness.len(), 4);
        assert!(report.closeness.iter().all(|(node, _)| *node != 0));
        assert!(report.out_degree.unwrap().iter().all(|(node, _)| *node != 0));
    }

    #[test]
    fn test_year_report_skips_degrees() {
        let report = GraphReport::build(Scope::Year(2011), &star_graph(), 3);

        assert!(report.out_degree.is_none());
        assert!(report.in_degree.is_none());

        let text = report.to_string();
        assert!(text.starts_with(SEPARATOR));
        assert!(text.contains("2011 Subgraph"));
        assert!(!text.contains("Sorted by out-degrees"));
    }

    #[test]
    fn test_render_full_report() {
        let report = GraphReport::build(Scope::Full, &star_graph(), 1);
        let text = report.to_string();

        assert!(text.starts_with("Sorted by out-degrees:\n1. Node 1 -> out-degree: 3\n"));
        assert!(text.contains("\nSorted by in-degrees:\n1. Node 3 <- in-degree: 2\n"));
        assert!(text.contains("\nTop 1 nodes by closeness centrality:\nNode "));
        // Only the 2 -> 4 shortest path passes through an intermediate (node 3).
        assert!(text.contains("\nTop 1 nodes by betweenness centrality:\nNode 3: 1.0000\n"));
    }

    #[test]
    fn test_run_report_skips_missing_years() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("edges.csv");
        fs::write(&input, "1,2,4,1289241911\n2,3,1,1293840000\n").unwrap();

        let config = SplitConfig {
            input,
            output_dir: dir.path().join("out"),
            report_years: vec![2011],
            ..SplitConfig::default()
        };
        let reports = run_report(&config).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].scope, Scope::Full);
    }
}
