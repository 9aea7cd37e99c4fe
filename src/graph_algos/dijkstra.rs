use super::{shortest_path, GraphNodeMap};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Float;
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::debug;




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Returns the path from start to goal along with its total cost,
/// or None when the frontier empties before the goal is reached
/// Edge costs must be non-negative
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Float + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    let goal_index = goal_index?;
    let (_, &(_, cost)) = node_map.get_index(goal_index)?;
    let path = shortest_path(&node_map, goal_index)?;

    Some((path, cost))
}


/// Returns every reachable node with its final cost from start, in discovery order
pub fn dijkstra_costs<N, C, IT, NN>(start: N, neighbors: NN) -> Vec<(N, C)>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Float + Debug,
    {

    // No goal - runs until the frontier is empty
    let (node_map, _) = build_dijkstra_graph(start, neighbors, |_| false);

    node_map.into_iter().map(|(node, (_, cost))| (node, cost)).collect()
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Float + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest, NodeId reverses that
    // Dijkstra's algorithm uses a priority queue to always expand the least costly node first
    // We store the cost from the starting node
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // Discovered nodes with their best known cost
    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // Nodes missing from the map have an implicit cost of infinity
    // The start node is its own parent
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    // Add start node to the map and queue
    let start_index = nodes_map.insert_full(start, (0, C::zero())).0;
    nodes_to_visit.push(NodeId{
        index: start_index,
        cost: C::zero(),
    });

    let mut expanded = 0_usize;

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId {cost, index}) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, best))) = nodes_map.get_index(index) else {
            continue;
        };

        // If cost of the heap entry is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > best {
            continue;
        }

        // Check if we've reached the goal - non-negative costs make its cost final
        if goal_fn(node) {
            debug!(expanded, goal = ?node, "dijkstra reached goal");
            return (nodes_map, Some(index));
        }

        let node = node.clone();
        expanded += 1;

        // loop over neighbors
        for (neighbor, edge_cost) in neighbors(&node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = best + edge_cost;

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    // unseen nodes sit at infinity, so an overflowed cost is no improvement
                    if !new_cost.is_finite() {
                        continue;
                    }
                    let neighbor_index = e.index();
                    e.insert((index, new_cost));
                    neighbor_index
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        // We've found a strictly better path to this neighbor
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        // The existing path is as good or better, do nothing
                        continue;
                    }
                }
            };

            // Only add to the queue if we've found a better path
            // older entries for this node stay in the heap and are skipped as stale
            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    debug!(expanded, reached = nodes_map.len(), "dijkstra frontier exhausted");
    (nodes_map, None)
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
/// - Ordering is reversed so the BinaryHeap pops the cheapest node first
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Float> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
    }
}
impl<T: Float> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: Float> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<T: Float> Eq for NodeId<T> {}
