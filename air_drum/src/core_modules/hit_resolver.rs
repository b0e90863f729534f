// THEORY:
// The `hit_resolver` answers one question per frame: which pads currently have an
// object's centroid inside them? It is the bridge between the spatial layer
// (`DetectedObject`s) and the temporal layer (the trigger latch).
//
// Every object is tested against every pad. There is no exclusivity: two sticks
// on two pads hit both, and a centroid on a shared edge hits both neighbours.
// With a handful of objects and six pads a brute-force scan is the right tool.

use crate::core_modules::detected_object::DetectedObject;
use crate::core_modules::zone::{ZoneId, ZoneRegistry};

/// Per-frame "is some centroid inside this pad" table, indexed by `ZoneId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitState {
    hits: Vec<bool>,
}

impl HitState {
    /// All pads clear.
    pub fn clear(zone_count: usize) -> Self {
        Self {
            hits: vec![false; zone_count],
        }
    }

    pub fn from_flags(hits: Vec<bool>) -> Self {
        Self { hits }
    }

    pub fn is_hit(&self, id: ZoneId) -> bool {
        self.hits[id.index()]
    }

    pub fn mark(&mut self, id: ZoneId) {
        self.hits[id.index()] = true;
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn any(&self) -> bool {
        self.hits.iter().any(|hit| *hit)
    }

    /// Handles of every hit pad, in registry order.
    pub fn hit_zones(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.hits
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(index, _)| ZoneId(index))
    }
}

pub fn resolve_hits(objects: &[DetectedObject], registry: &ZoneRegistry) -> HitState {
    let mut state = HitState::clear(registry.len());
    for object in objects {
        for (id, zone) in registry.iter() {
            if zone.bounds.contains(object.centroid) {
                state.mark(id);
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ZoneRegistry {
        ZoneRegistry::standard(640, 480, 100)
    }

    #[test]
    fn no_objects_means_no_hits() {
        let registry = registry();
        let state = resolve_hits(&[], &registry);
        assert_eq!(state.len(), 6);
        assert!(!state.any());
    }

    #[test]
    fn object_in_empty_space_hits_nothing() {
        let registry = registry();
        let state = resolve_hits(&[DetectedObject::at(320, 240)], &registry);
        assert!(!state.any());
    }

    #[test]
    fn each_object_marks_its_own_pad() {
        let registry = registry();
        let objects = [DetectedObject::at(50, 430), DetectedObject::at(80, 50)];
        let state = resolve_hits(&objects, &registry);
        let hit: Vec<ZoneId> = state.hit_zones().collect();
        assert_eq!(
            hit,
            vec![registry.find("Kick").unwrap(), registry.find("Crash").unwrap()]
        );
    }

    #[test]
    fn shared_edge_hits_both_neighbours() {
        let registry = registry();
        let state = resolve_hits(&[DetectedObject::at(128, 430)], &registry);
        assert!(state.is_hit(registry.find("Kick").unwrap()));
        assert!(state.is_hit(registry.find("Snare").unwrap()));
        assert!(!state.is_hit(registry.find("Hi-Hat").unwrap()));
    }

    #[test]
    fn two_objects_on_one_pad_count_once() {
        let registry = registry();
        let objects = [DetectedObject::at(300, 400), DetectedObject::at(310, 450)];
        let state = resolve_hits(&objects, &registry);
        assert_eq!(state.hit_zones().count(), 1);
        assert!(state.is_hit(registry.find("Hi-Hat").unwrap()));
    }
}
