use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Handle to a spawned instance. The generation guards against reuse of a
/// slot after the instance it named has been destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct InstanceId {
    index: usize,
    generation: u32,
}

impl InstanceId {
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Storage for the instances a host keeps alive between spawn and destroy.
///
/// Destroyed slots are recycled oldest-first with a bumped generation, so a
/// handle kept past `remove` never reaches the instance that reused its slot.
pub struct InstanceArena<T> {
    slots: Vec<Slot<T>>,
    vacant: VecDeque<usize>,
    live: usize,
}

impl<T> Default for InstanceArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InstanceArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: VecDeque::new(),
            live: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> InstanceId {
        self.live += 1;
        let index = match self.vacant.pop_front() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    value: None,
                });
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        slot.value = Some(value);
        InstanceId::new(index, slot.generation)
    }

    pub fn get(&self, id: InstanceId) -> Option<&T> {
        self.slot(id)?.value.as_ref()
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut T> {
        self.slot_mut(id)?.value.as_mut()
    }

    /// Removes the instance; stale or unknown ids return `None` and change nothing.
    pub fn remove(&mut self, id: InstanceId) -> Option<T> {
        let slot = self.slot_mut(id)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push_back(id.index);
        self.live -= 1;
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(|slot| slot.value.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn slot(&self, id: InstanceId) -> Option<&Slot<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: InstanceId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_slot_is_reused_with_new_generation() {
        let mut arena = InstanceArena::new();
        let first = arena.insert("a");
        assert_eq!(arena.remove(first), Some("a"));

        let second = arena.insert("b");
        assert_eq!(second.index(), first.index());
        assert_ne!(second.generation(), first.generation());
        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second), Some(&"b"));
    }

    #[test]
    fn stale_remove_does_not_touch_live_instance() {
        let mut arena = InstanceArena::new();
        let first = arena.insert(1);
        arena.remove(first);
        let _second = arena.insert(2);

        assert_eq!(arena.remove(first), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn double_remove_is_ignored() {
        let mut arena = InstanceArena::new();
        let id = arena.insert(7);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn len_tracks_inserts_and_removes() {
        let mut arena = InstanceArena::new();
        let ids: Vec<_> = (0..5).map(|i| arena.insert(i)).collect();
        assert_eq!(arena.len(), 5);
        for id in ids {
            arena.remove(id);
        }
        assert!(arena.is_empty());
        assert_eq!(arena.iter().count(), 0);
    }
}
