//! Execution order of active contributors.
//!
//! Kahn's algorithm over `runs_after` edges. Among the contributors that are
//! ready at any point, the one with the smallest (stage, -priority,
//! registration order) key runs first, so without explicit edges the order
//! is simply stage by stage in resolution order. Edges that point to an
//! inactive or unknown contributor are ignored.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::application::{ApplicationError, contributor::Contributor, registry::ContributorRegistry};

/// Scheduling facts about one active contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub stage: u8,
    pub priority: i32,
    pub order: usize,
    pub after: Vec<String>,
}

type Key = (u8, Reverse<i32>, usize, usize);

/// Indices into `nodes`, in execution order.
pub fn execution_order(nodes: &[Node]) -> Result<Vec<usize>, ApplicationError> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut in_degree = vec![0usize; nodes.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for before in &node.after {
            if let Some(&j) = index.get(before.as_str()) {
                successors[j].push(i);
                in_degree[i] += 1;
            }
        }
    }

    let key = |i: usize| -> Key {
        let n = &nodes[i];
        (n.stage, Reverse(n.priority), n.order, i)
    };

    let mut ready: BTreeSet<Key> = (0..nodes.len())
        .filter(|&i| in_degree[i] == 0)
        .map(key)
        .collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(next) = ready.pop_first() {
        let i = next.3;
        order.push(i);
        for &s in &successors[i] {
            in_degree[s] -= 1;
            if in_degree[s] == 0 {
                ready.insert(key(s));
            }
        }
    }

    if order.len() < nodes.len() {
        return Err(ApplicationError::CyclicDependency {
            cycle: find_cycle(nodes, &index, &in_degree),
        });
    }
    Ok(order)
}

/// Walk `after` edges among the unscheduled nodes until one repeats.
fn find_cycle(nodes: &[Node], index: &HashMap<&str, usize>, in_degree: &[usize]) -> Vec<String> {
    let blocked = |i: usize| in_degree[i] > 0;
    let Some(start) = (0..nodes.len()).find(|&i| blocked(i)) else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    loop {
        let next = nodes[current]
            .after
            .iter()
            .filter_map(|id| index.get(id.as_str()).copied())
            .find(|&j| blocked(j));
        let Some(next) = next else {
            break;
        };
        if let Some(pos) = path.iter().position(|&p| p == next) {
            let mut cycle: Vec<String> = path[pos..].iter().map(|&p| nodes[p].id.clone()).collect();
            cycle.reverse();
            cycle.push(cycle[0].clone());
            return cycle;
        }
        path.push(next);
        current = next;
    }
    path.iter().map(|&p| nodes[p].id.clone()).collect()
}

/// Order resolved contributors for execution.
pub fn order_contributors(
    active: &[Arc<dyn Contributor>],
    registry: &ContributorRegistry,
) -> Result<Vec<Arc<dyn Contributor>>, ApplicationError> {
    let nodes: Vec<Node> = active
        .iter()
        .map(|c| Node {
            id: c.id().to_string(),
            stage: c.capability().stage(),
            priority: c.priority(),
            order: registry.registration_order(c.id()).unwrap_or(usize::MAX),
            after: c.runs_after(),
        })
        .collect();

    Ok(execution_order(&nodes)?
        .into_iter()
        .map(|i| Arc::clone(&active[i]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, stage: u8, priority: i32, order: usize, after: &[&str]) -> Node {
        Node {
            id: id.to_string(),
            stage,
            priority,
            order,
            after: after.iter().map(ToString::to_string).collect(),
        }
    }

    fn ids(nodes: &[Node]) -> Result<Vec<String>, ApplicationError> {
        Ok(execution_order(nodes)?
            .into_iter()
            .map(|i| nodes[i].id.clone())
            .collect())
    }

    #[test]
    fn stage_then_priority_then_registration() {
        let nodes = vec![
            node("post", 6, 0, 0, &[]),
            node("src-b", 4, 0, 2, &[]),
            node("src-a", 4, 0, 1, &[]),
            node("src-hi", 4, 9, 3, &[]),
            node("build", 2, 0, 4, &[]),
        ];
        assert_eq!(ids(&nodes).unwrap(), ["build", "src-hi", "src-a", "src-b", "post"]);
    }

    #[test]
    fn edges_override_stage() {
        let nodes = vec![
            node("help", 6, 0, 0, &["gitignore"]),
            node("gitignore", 6, 0, 1, &[]),
            node("late-source", 4, 0, 2, &["help"]),
        ];
        assert_eq!(ids(&nodes).unwrap(), ["gitignore", "help", "late-source"]);
    }

    #[test]
    fn unknown_predecessors_are_ignored() {
        let nodes = vec![node("a", 0, 0, 0, &["inactive"]), node("b", 0, 0, 1, &[])];
        assert_eq!(ids(&nodes).unwrap(), ["a", "b"]);
    }

    #[test]
    fn cycle_is_reported() {
        let nodes = vec![
            node("free", 0, 0, 0, &[]),
            node("a", 1, 0, 1, &["c"]),
            node("b", 1, 0, 2, &["a"]),
            node("c", 1, 0, 3, &["b"]),
        ];
        match execution_order(&nodes).unwrap_err() {
            ApplicationError::CyclicDependency { cycle } => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 4);
                for id in ["a", "b", "c"] {
                    assert!(cycle.iter().any(|c| c == id));
                }
                assert!(!cycle.iter().any(|c| c == "free"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let nodes = vec![node("loop", 0, 0, 0, &["loop"])];
        match execution_order(&nodes).unwrap_err() {
            ApplicationError::CyclicDependency { cycle } => assert_eq!(cycle, ["loop", "loop"]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
