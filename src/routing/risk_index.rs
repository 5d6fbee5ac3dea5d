use serde::{Deserialize, Serialize};

/// Region entry stored in the risk index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskEntry {
    pub region: String,
    pub priority: u8,
}

#[derive(Debug, Clone)]
struct RiskNode {
    entry: RiskEntry,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree of regions keyed by risk priority.
///
/// Nodes are owned by an arena and link to their children by index. Lower
/// priorities go left; equal or higher go right, so regions sharing a
/// priority keep their insertion order in an in-order walk.
#[derive(Debug, Clone, Default)]
pub struct RegionRiskIndex {
    nodes: Vec<RiskNode>,
}

impl RegionRiskIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, region: impl Into<String>, priority: u8) {
        let new_idx = self.nodes.len();
        self.nodes.push(RiskNode {
            entry: RiskEntry {
                region: region.into(),
                priority,
            },
            left: None,
            right: None,
        });

        if new_idx == 0 {
            return;
        }

        let mut current = 0;
        loop {
            let node = &mut self.nodes[current];
            let slot = if priority < node.entry.priority {
                &mut node.left
            } else {
                &mut node.right
            };
            match *slot {
                Some(next) => current = next,
                None => {
                    *slot = Some(new_idx);
                    return;
                }
            }
        }
    }

    /// First region found with exactly this priority
    pub fn find_by_priority(&self, priority: u8) -> Option<&RiskEntry> {
        let mut current = if self.nodes.is_empty() { None } else { Some(0) };

        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if node.entry.priority == priority {
                return Some(&node.entry);
            }
            current = if priority < node.entry.priority {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// Entries in ascending priority order
    pub fn in_order(&self) -> Vec<&RiskEntry> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = if self.nodes.is_empty() { None } else { Some(0) };

        while current.is_some() || !stack.is_empty() {
            while let Some(idx) = current {
                stack.push(idx);
                current = self.nodes[idx].left;
            }
            if let Some(idx) = stack.pop() {
                result.push(&self.nodes[idx].entry);
                current = self.nodes[idx].right;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> RegionRiskIndex {
        let mut index = RegionRiskIndex::new();
        for (region, priority) in [
            ("Mata Atlantica Sul", 8),
            ("Cerrado Central", 6),
            ("Amazonia Norte", 9),
            ("Pantanal", 7),
            ("Caatinga", 5),
        ] {
            index.insert(region, priority);
        }
        index
    }

    #[test]
    fn test_in_order_is_sorted() {
        let index = seeded();
        let priorities: Vec<u8> = index.in_order().iter().map(|e| e.priority).collect();
        assert_eq!(priorities, vec![5, 6, 7, 8, 9]);
        assert_eq!(index.in_order()[0].region, "Caatinga");
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_find_by_priority() {
        let index = seeded();
        assert_eq!(index.find_by_priority(7).unwrap().region, "Pantanal");
        assert!(index.find_by_priority(1).is_none());
        assert!(RegionRiskIndex::new().find_by_priority(5).is_none());
    }

    #[test]
    fn test_equal_priorities_keep_insertion_order() {
        let mut index = RegionRiskIndex::new();
        index.insert("first", 4);
        index.insert("second", 4);
        index.insert("low", 1);
        index.insert("third", 4);

        let regions: Vec<&str> = index.in_order().iter().map(|e| e.region.as_str()).collect();
        assert_eq!(regions, vec!["low", "first", "second", "third"]);
        assert_eq!(index.find_by_priority(4).unwrap().region, "first");
    }
}
