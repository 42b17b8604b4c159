//! Breadth-first traversal over the similarity graph
//!
//! One primitive, [`BreadthFirst`], drives both query modes:
//!
//! - **recommendation**: the first `limit` nodes reached after the source,
//!   in visitation order;
//! - **shortest path**: parent links recorded during the walk, stopping as
//!   soon as the target is dequeued, then followed back to the source.
//!
//! Nodes are marked visited when they are enqueued, not when they are
//! dequeued, so no node enters the frontier twice even when two parents
//! discover it in the same layer.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use crate::core::graph::SimilarityGraph;
use crate::record::RecordId;

/// Maximum number of recommendations per query when not configured.
pub const DEFAULT_RECOMMENDATIONS: usize = 10;

/// FIFO of discovered-but-unexpanded nodes, tagged with their BFS layer.
#[derive(Debug, Default)]
pub struct FrontierQueue {
    queue: VecDeque<(RecordId, usize)>,
    pushed: usize,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: RecordId, depth: usize) {
        self.queue.push_back((id, depth));
        self.pushed += 1;
    }

    pub fn pop(&mut self) -> Option<(RecordId, usize)> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Total pushes since creation.
    pub fn pushed(&self) -> usize {
        self.pushed
    }
}

/// A dequeued node as seen by the visit callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub node: RecordId,
    /// BFS layer: 0 for the source
    pub depth: usize,
    /// Node that discovered this one; `None` for the source
    pub parent: Option<RecordId>,
}

/// Breadth-first walker over one graph. Visited state persists across
/// calls to [`BreadthFirst::run`]; create a new walker per query.
///
/// ```
/// use std::ops::ControlFlow;
/// use nexus_catalog::core::graph::SimilarityGraph;
/// use nexus_catalog::core::traversal::BreadthFirst;
///
/// let graph = SimilarityGraph::from_edges(3, [(0, 1), (1, 2)]);
/// let mut order = Vec::new();
/// BreadthFirst::new(&graph).run(0, |step| {
///     order.push(step.node);
///     ControlFlow::Continue(())
/// });
/// assert_eq!(order, [0, 1, 2]);
/// ```
#[derive(Debug)]
pub struct BreadthFirst<'g> {
    graph: &'g SimilarityGraph,
    visited: Vec<bool>,
    parents: Option<Vec<Option<RecordId>>>,
    frontier: FrontierQueue,
}

impl<'g> BreadthFirst<'g> {
    pub fn new(graph: &'g SimilarityGraph) -> Self {
        Self {
            graph,
            visited: vec![false; graph.node_count()],
            parents: None,
            frontier: FrontierQueue::new(),
        }
    }

    /// Record the discovering parent of every visited node.
    pub fn tracking_parents(mut self) -> Self {
        self.parents = Some(vec![None; self.graph.node_count()]);
        self
    }

    /// Walk from `source`, calling `visit` for every dequeued node, the
    /// source included. Returns the node at which `visit` broke, or `None`
    /// if the frontier emptied first.
    ///
    /// # Panics
    ///
    /// If `source` is outside the graph.
    pub fn run<F>(&mut self, source: RecordId, mut visit: F) -> Option<RecordId>
    where
        F: FnMut(Step) -> ControlFlow<()>,
    {
        assert!(
            source < self.visited.len(),
            "record id {source} outside graph of {} nodes",
            self.visited.len()
        );

        let graph = self.graph;
        self.visited[source] = true;
        self.frontier.push(source, 0);

        while let Some((node, depth)) = self.frontier.pop() {
            let parent = self.parents.as_ref().and_then(|p| p[node]);
            if visit(Step { node, depth, parent }).is_break() {
                return Some(node);
            }

            for next in graph.neighbors(node) {
                if self.visited[next] {
                    continue;
                }
                self.visited[next] = true;
                if let Some(parents) = self.parents.as_mut() {
                    parents[next] = Some(node);
                }
                self.frontier.push(next, depth + 1);
            }
        }
        None
    }

    /// Whether `id` has been reached (enqueued) so far.
    pub fn visited(&self, id: RecordId) -> bool {
        self.visited.get(id).copied().unwrap_or(false)
    }

    /// Number of nodes ever pushed onto the frontier.
    pub fn enqueued(&self) -> usize {
        self.frontier.pushed()
    }

    /// Follow parent links from `target` back to the root of the walk and
    /// return the path root-first. `None` when parents were not tracked or
    /// `target` was never reached.
    pub fn path_to(&self, target: RecordId) -> Option<Vec<RecordId>> {
        let parents = self.parents.as_ref()?;
        if !self.visited(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = parents[current] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Up to `limit` nodes reachable from `source`, excluding it, in BFS order.
pub fn recommend(graph: &SimilarityGraph, source: RecordId, limit: usize) -> Vec<RecordId> {
    let mut found = Vec::with_capacity(limit.min(graph.node_count()));
    if limit == 0 {
        return found;
    }

    BreadthFirst::new(graph).run(source, |step| {
        if step.node == source {
            return ControlFlow::Continue(());
        }
        found.push(step.node);
        if found.len() >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}

/// Fewest-edges path from `source` to `target`, both inclusive.
///
/// `None` means the nodes are disconnected. A node is connected to itself by
/// the single-node path.
///
/// # Panics
///
/// If `source` or `target` is outside the graph.
pub fn shortest_path(
    graph: &SimilarityGraph,
    source: RecordId,
    target: RecordId,
) -> Option<Vec<RecordId>> {
    assert!(
        target < graph.node_count(),
        "record id {target} outside graph of {} nodes",
        graph.node_count()
    );
    let mut bfs = BreadthFirst::new(graph).tracking_parents();
    let reached = bfs.run(source, |step| {
        if step.node == target {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    reached.and_then(|target| bfs.path_to(target))
}
