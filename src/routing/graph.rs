use crate::error::{DispatchError, Result};
use crate::models::{Coordinates, GraphStats, Neighbor, RegionConnections, Route};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

/// Default travel-time conversion used by route estimates
pub const DEFAULT_HOURS_PER_DISTANCE_UNIT: f64 = 0.5;

#[derive(Debug, Clone)]
struct RegionNode {
    name: String,
    coordinates: Option<Coordinates>,

    /// Neighbor index -> edge weight
    edges: BTreeMap<usize, f64>,
}

/// Undirected weighted graph of regions.
///
/// Regions live in an index arena in registration order; edges are stored
/// symmetrically on both endpoints.
#[derive(Debug, Clone)]
pub struct RegionGraph {
    nodes: Vec<RegionNode>,
    index: HashMap<String, usize>,
    hours_per_distance_unit: f64,
}

impl RegionGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            hours_per_distance_unit: DEFAULT_HOURS_PER_DISTANCE_UNIT,
        }
    }

    /// Set the conversion used for `Route::estimated_hours`
    pub fn with_hours_per_distance_unit(mut self, hours: f64) -> Self {
        self.hours_per_distance_unit = hours;
        self
    }

    /// Register a region. No-op if it already exists.
    pub fn add_region(&mut self, name: &str, coordinates: Option<Coordinates>) {
        self.ensure_region(name, coordinates);
    }

    fn ensure_region(&mut self, name: &str, coordinates: Option<Coordinates>) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }

        let idx = self.nodes.len();
        self.nodes.push(RegionNode {
            name: name.to_string(),
            coordinates,
            edges: BTreeMap::new(),
        });
        self.index.insert(name.to_string(), idx);
        tracing::debug!(region = %name, "Region added to graph");
        idx
    }

    /// Connect two regions. Missing endpoints are registered; an existing
    /// connection between the same pair has its weight replaced.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(DispatchError::Validation(format!(
                "Edge weight between '{}' and '{}' must be finite and non-negative, got {}",
                a, b, weight
            )));
        }
        if a == b {
            return Err(DispatchError::Validation(format!(
                "Self-loop on region '{}' is not allowed",
                a
            )));
        }

        let ia = self.ensure_region(a, None);
        let ib = self.ensure_region(b, None);
        self.nodes[ia].edges.insert(ib, weight);
        self.nodes[ib].edges.insert(ia, weight);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn coordinates(&self, name: &str) -> Option<Coordinates> {
        self.index
            .get(name)
            .and_then(|&idx| self.nodes[idx].coordinates)
    }

    /// Weight of the direct connection between two regions, if any
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let ia = *self.index.get(a)?;
        let ib = *self.index.get(b)?;
        self.nodes[ia].edges.get(&ib).copied()
    }

    fn node_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| DispatchError::RegionNotFound(name.to_string()))
    }

    /// Minimum-weight route between two regions (Dijkstra).
    ///
    /// When several routes share the minimum distance, which one is returned
    /// is not part of the contract.
    pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<Route> {
        let start = self.node_index(origin)?;
        let goal = self.node_index(destination)?;

        let n = self.nodes.len();
        let mut distances = vec![f64::INFINITY; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut frontier = BinaryHeap::new();

        distances[start] = 0.0;
        frontier.push(FrontierEntry {
            distance: 0.0,
            node: start,
        });

        while let Some(FrontierEntry { distance, node }) = frontier.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;

            // Destination distance is final once popped
            if node == goal {
                break;
            }

            for (&neighbor, &weight) in &self.nodes[node].edges {
                if visited[neighbor] {
                    continue;
                }
                let candidate = distance + weight;
                if candidate < distances[neighbor] {
                    distances[neighbor] = candidate;
                    predecessors[neighbor] = Some(node);
                    frontier.push(FrontierEntry {
                        distance: candidate,
                        node: neighbor,
                    });
                }
            }
        }

        let no_route = || DispatchError::NoRouteAvailable {
            from: origin.to_string(),
            to: destination.to_string(),
        };

        if distances[goal].is_infinite() {
            return Err(no_route());
        }

        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(node) = current {
            path.push(node);
            current = predecessors[node];
        }
        path.reverse();

        if path.first() != Some(&start) {
            tracing::warn!(
                origin = %origin,
                destination = %destination,
                "Predecessor chain does not lead back to origin"
            );
            return Err(no_route());
        }

        let distance = distances[goal];
        Ok(Route {
            path: path
                .into_iter()
                .map(|idx| self.nodes[idx].name.clone())
                .collect(),
            distance,
            estimated_hours: distance * self.hours_per_distance_unit,
        })
    }

    /// Shortest distance between two regions
    pub fn distance(&self, origin: &str, destination: &str) -> Result<f64> {
        self.shortest_path(origin, destination)
            .map(|route| route.distance)
    }

    pub fn stats(&self) -> GraphStats {
        let degree_sum: usize = self.nodes.iter().map(|node| node.edges.len()).sum();
        let average_connectivity = if self.nodes.is_empty() {
            0.0
        } else {
            degree_sum as f64 / self.nodes.len() as f64
        };

        GraphStats {
            regions: self.nodes.len(),
            connections: degree_sum / 2,
            average_connectivity,
        }
    }

    /// Every region with its neighbors, in registration order
    pub fn connections(&self) -> Vec<RegionConnections> {
        self.nodes
            .iter()
            .map(|node| RegionConnections {
                region: node.name.clone(),
                neighbors: node
                    .edges
                    .iter()
                    .map(|(&idx, &distance)| Neighbor {
                        region: self.nodes[idx].name.clone(),
                        distance,
                    })
                    .collect(),
            })
            .collect()
    }
}

impl Default for RegionGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Frontier entry ordered so that `BinaryHeap` pops the smallest distance
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    node: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> RegionGraph {
        let mut graph = RegionGraph::new();
        graph.add_edge("A", "B", 12.0).unwrap();
        graph.add_edge("B", "C", 8.0).unwrap();
        graph.add_edge("A", "C", 20.0).unwrap();
        graph
    }

    #[test]
    fn test_add_region_is_idempotent() {
        let mut graph = RegionGraph::new();
        graph.add_region("Pantanal", Some(Coordinates::new(-19.9, -56.1)));
        graph.add_region("Pantanal", None);

        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.coordinates("Pantanal"),
            Some(Coordinates::new(-19.9, -56.1))
        );
    }

    #[test]
    fn test_edges_are_symmetric_and_overwritten() {
        let mut graph = RegionGraph::new();
        graph.add_edge("A", "B", 5.0).unwrap();
        assert_eq!(graph.edge_weight("B", "A"), Some(5.0));

        graph.add_edge("B", "A", 3.0).unwrap();
        assert_eq!(graph.edge_weight("A", "B"), Some(3.0));
        assert_eq!(graph.stats().connections, 1);
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let mut graph = RegionGraph::new();
        assert!(graph.add_edge("A", "B", -1.0).is_err());
        assert!(graph.add_edge("A", "B", f64::NAN).is_err());
        assert!(graph.add_edge("A", "A", 1.0).is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_triangle_tie() {
        let route = triangle().shortest_path("A", "C").unwrap();

        assert_eq!(route.distance, 20.0);
        assert_eq!(route.origin(), Some("A"));
        assert_eq!(route.destination(), Some("C"));
        assert!(
            route.path == vec!["A", "B", "C"] || route.path == vec!["A", "C"],
            "unexpected path {:?}",
            route.path
        );
    }

    #[test]
    fn test_prefers_cheaper_indirect_path() {
        let mut graph = triangle();
        graph.add_edge("A", "C", 25.0).unwrap();

        let route = graph.shortest_path("A", "C").unwrap();
        assert_eq!(route.path, vec!["A", "B", "C"]);
        assert_eq!(route.distance, 20.0);
        assert_eq!(route.estimated_hours, 10.0);
        assert_eq!(route.intermediate_stops(), 1);
    }

    #[test]
    fn test_same_origin_and_destination() {
        let route = triangle().shortest_path("B", "B").unwrap();
        assert_eq!(route.path, vec!["B"]);
        assert_eq!(route.distance, 0.0);
        assert_eq!(route.intermediate_stops(), 0);
    }

    #[test]
    fn test_unknown_endpoint() {
        let graph = triangle();
        assert_eq!(
            graph.shortest_path("A", "Z"),
            Err(DispatchError::RegionNotFound("Z".to_string()))
        );
        assert!(graph.shortest_path("Z", "A").unwrap_err().is_not_found());
    }

    #[test]
    fn test_disconnected_components() {
        let mut graph = triangle();
        graph.add_edge("X", "Y", 1.0).unwrap();

        assert_eq!(
            graph.shortest_path("A", "Y"),
            Err(DispatchError::NoRouteAvailable {
                from: "A".to_string(),
                to: "Y".to_string()
            })
        );
    }

    #[test]
    fn test_stats_and_connections() {
        let graph = triangle();
        let stats = graph.stats();
        assert_eq!(stats.regions, 3);
        assert_eq!(stats.connections, 3);
        assert_eq!(stats.average_connectivity, 2.0);

        let connections = graph.connections();
        assert_eq!(connections[0].region, "A");
        let neighbors: Vec<_> = connections[0]
            .neighbors
            .iter()
            .map(|n| n.region.as_str())
            .collect();
        assert_eq!(neighbors, vec!["B", "C"]);
    }

    #[test]
    fn test_frontier_pops_smallest_distance() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry { distance: 7.0, node: 0 });
        heap.push(FrontierEntry { distance: 2.0, node: 1 });
        heap.push(FrontierEntry { distance: 5.0, node: 2 });

        assert_eq!(heap.pop().unwrap().node, 1);
        assert_eq!(heap.pop().unwrap().node, 2);
        assert_eq!(heap.pop().unwrap().node, 0);
    }
}
