use super::GraphNodeMap;

/// Construct the shortest path from the goal node back to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
/// The start node is its own parent, which ends the walk
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Option<Vec<N>>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    // A well formed map never needs more steps than it has nodes
    for _ in 0..node_map.len() {
        let (node, &(parent_index, _)) = node_map.get_index(current_index)?;
        path.push(node.clone());

        if parent_index == current_index {
            // The path is in reverse order, so reverse it
            path.reverse();
            return Some(path);
        }
        current_index = parent_index;
    }

    // predecessor chain never reached the start
    None
}
