//! Breadth-first traversal used by cycle detection and hierarchy queries.

use std::collections::{HashSet, VecDeque};

use world_model::EntityId;

/// Walks outward from a start node, yielding every reachable node once.
///
/// The start node is never yielded, even if an edge leads back to it, so a
/// walk over a malformed graph still terminates.
pub struct Traversal<F> {
    neighbors: F,
    visited: HashSet<EntityId>,
    frontier: VecDeque<EntityId>,
}

impl<F, I> Traversal<F>
where
    F: FnMut(EntityId) -> I,
    I: IntoIterator<Item = EntityId>,
{
    /// Start a walk at `start`, expanding nodes with `neighbors`.
    pub fn new(start: EntityId, mut neighbors: F) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start);

        let mut frontier = VecDeque::new();
        for next in neighbors(start) {
            if visited.insert(next) {
                frontier.push_back(next);
            }
        }

        Self {
            neighbors,
            visited,
            frontier,
        }
    }

    /// Check if the walk ever arrives at `goal`.
    pub fn reaches(mut self, goal: EntityId) -> bool {
        self.any(|id| id == goal)
    }

    /// Number of nodes discovered so far, including the start.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl<F, I> Iterator for Traversal<F>
where
    F: FnMut(EntityId) -> I,
    I: IntoIterator<Item = EntityId>,
{
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        let current = self.frontier.pop_front()?;
        for next in (self.neighbors)(current) {
            if self.visited.insert(next) {
                self.frontier.push_back(next);
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn adjacency(pairs: &[(EntityId, EntityId)]) -> HashMap<EntityId, Vec<EntityId>> {
        let mut map: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        for (from, to) in pairs {
            map.entry(*from).or_default().push(*to);
        }
        map
    }

    #[test]
    fn test_breadth_first_order() {
        let ids: Vec<_> = (0..4).map(|_| EntityId::new()).collect();
        let map = adjacency(&[(ids[0], ids[1]), (ids[0], ids[2]), (ids[1], ids[3])]);

        let walked: Vec<_> =
            Traversal::new(ids[0], |id: EntityId| map.get(&id).cloned().unwrap_or_default()).collect();
        assert_eq!(walked, vec![ids[1], ids[2], ids[3]]);
    }

    #[test]
    fn test_cycle_terminates_without_start() {
        let ids: Vec<_> = (0..3).map(|_| EntityId::new()).collect();
        let map = adjacency(&[(ids[0], ids[1]), (ids[1], ids[2]), (ids[2], ids[0])]);

        let walked: Vec<_> =
            Traversal::new(ids[0], |id: EntityId| map.get(&id).cloned().unwrap_or_default()).collect();
        assert_eq!(walked, vec![ids[1], ids[2]]);
    }

    #[test]
    fn test_reaches() {
        let ids: Vec<_> = (0..3).map(|_| EntityId::new()).collect();
        let map = adjacency(&[(ids[0], ids[1]), (ids[1], ids[2])]);
        let neighbors = |id: EntityId| map.get(&id).cloned().unwrap_or_default();

        assert!(Traversal::new(ids[0], neighbors).reaches(ids[2]));
        assert!(!Traversal::new(ids[2], neighbors).reaches(ids[0]));
    }

    #[test]
    fn test_diamond_visits_once() {
        let ids: Vec<_> = (0..4).map(|_| EntityId::new()).collect();
        let map = adjacency(&[
            (ids[0], ids[1]),
            (ids[0], ids[2]),
            (ids[1], ids[3]),
            (ids[2], ids[3]),
        ]);

        let mut walk = Traversal::new(ids[0], |id: EntityId| map.get(&id).cloned().unwrap_or_default());
        let walked: Vec<_> = walk.by_ref().collect();
        assert_eq!(walked.len(), 3);
        assert_eq!(walk.visited_count(), 4);
    }
}
