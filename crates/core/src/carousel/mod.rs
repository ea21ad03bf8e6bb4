//! Ordered carousel of visible items.
//!
//! Index 0 holds the most recently pushed item. Pushing shifts every item one
//! slot further and evicts whatever falls past the last slot. The state is a
//! plain value owned by the host; all calls are synchronous and either apply
//! fully or leave the carousel untouched.

use serde::Serialize;

use crate::{
    layout::{LayoutConfig, LayoutTables},
    placement::{self, ItemSize, Transform, Transition, TransitionTiming},
    stream::{Item, ItemId, Stream},
    CarouselError, Result,
};

/// An item animated from one slot to the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMove {
    pub id: ItemId,
    pub from: usize,
    pub to: usize,
    pub transition: Transition,
}

/// Instantaneous placement of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemPlacement {
    pub id: ItemId,
    pub slot: usize,
    pub transform: Transform,
}

/// Everything the renderer needs to apply one push.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushOutcome {
    /// Removed items, oldest first.
    pub evicted: Vec<Item>,
    pub moved: Vec<ItemMove>,
    pub inserted: ItemPlacement,
}

/// Result of a configuration change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relayout {
    pub evicted: Vec<Item>,
    pub placed: Vec<ItemPlacement>,
}

#[derive(Debug, Clone)]
pub struct CarouselState {
    tables: LayoutTables,
    timing: TransitionTiming,
    items: Vec<Item>,
    next_id: u64,
}

impl CarouselState {
    pub fn new(layout: LayoutConfig, timing: TransitionTiming) -> Result<Self> {
        Ok(Self {
            tables: LayoutTables::build(&layout)?,
            timing,
            items: Vec::new(),
            next_id: 0,
        })
    }

    pub fn tables(&self) -> &LayoutTables {
        &self.tables
    }

    pub fn layout(&self) -> &LayoutConfig {
        self.tables.config()
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    pub fn slot_count(&self) -> usize {
        self.tables.slot_count()
    }

    /// Visible items, newest first.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Changes the slot count and viewport height, keeping the viewport width.
    pub fn configure(&mut self, slot_count: usize, viewport_height: f32) -> Result<Relayout> {
        let layout = LayoutConfig {
            slot_count,
            viewport_height,
            ..*self.layout()
        };
        self.reconfigure(layout)
    }

    /// Rebuilds the tables for `layout` and snaps every item to its new
    /// transform. Items beyond the new slot count are evicted. On error the
    /// previous tables and items are kept.
    pub fn reconfigure(&mut self, layout: LayoutConfig) -> Result<Relayout> {
        let tables = LayoutTables::build(&layout)?;

        let kept = self.items.len().min(tables.slot_count());
        let transforms = self.items[..kept]
            .iter()
            .enumerate()
            .map(|(slot, item)| placement::resolve(&tables, slot, item.natural_size))
            .collect::<Result<Vec<_>>>()?;

        self.tables = tables;

        let mut evicted = Vec::new();
        while self.items.len() > kept {
            if let Some(item) = self.items.pop() {
                tracing::debug!(id = %item.id, slot = item.slot, "evicting item on relayout");
                evicted.push(item);
            }
        }

        let mut placed = Vec::with_capacity(kept);
        for (slot, (item, transform)) in self.items.iter_mut().zip(transforms).enumerate() {
            item.slot = slot;
            item.transform = transform;
            placed.push(ItemPlacement {
                id: item.id,
                slot,
                transform,
            });
        }

        Ok(Relayout { evicted, placed })
    }

    /// Pushes `stream` into slot 0.
    ///
    /// Items are evicted from the far end until there is room, the survivors
    /// move one slot on, and the new item appears at slot 0 without a
    /// transition. Moves start from each item's committed slot, so a push that
    /// lands while the host is still animating restarts from that slot.
    pub fn push(&mut self, stream: Stream, natural_size: ItemSize) -> Result<PushOutcome> {
        let slot_count = self.slot_count();
        let inserted_transform = placement::resolve(&self.tables, 0, natural_size)?;

        let survivors = self.items.len().min(slot_count - 1);
        let moved = self.items[..survivors]
            .iter()
            .map(|item| -> Result<ItemMove> {
                let to = item.slot + 1;
                let transition = placement::resolve_transition(
                    &self.tables,
                    to,
                    item.slot,
                    item.natural_size,
                    self.timing,
                )?;
                Ok(ItemMove {
                    id: item.id,
                    from: item.slot,
                    to,
                    transition,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut evicted = Vec::new();
        while self.items.len() >= slot_count {
            if let Some(item) = self.items.pop() {
                tracing::debug!(id = %item.id, slot = item.slot, "evicting item");
                evicted.push(item);
            }
        }

        for (item, step) in self.items.iter_mut().zip(&moved) {
            tracing::debug!(id = %item.id, from = step.from, to = step.to, "moving item");
            item.slot = step.to;
            item.transform = step.transition.target;
        }

        let item = self.create_item(stream, natural_size, 0, inserted_transform);
        let inserted = ItemPlacement {
            id: item.id,
            slot: 0,
            transform: inserted_transform,
        };
        self.items.insert(0, item);

        Ok(PushOutcome {
            evicted,
            moved,
            inserted,
        })
    }

    /// Puts `stream` directly into slot `index`, replacing and returning its
    /// current occupant. `index` may be at most one past the last item so the
    /// sequence has no gaps.
    pub fn place_at(
        &mut self,
        index: usize,
        stream: Stream,
        natural_size: ItemSize,
    ) -> Result<Option<Item>> {
        self.tables.check_slot(index)?;
        if index > self.items.len() {
            return Err(CarouselError::msg(format!(
                "slot {index} would leave a gap after {} items",
                self.items.len()
            )));
        }

        let transform = placement::resolve(&self.tables, index, natural_size)?;
        let item = self.create_item(stream, natural_size, index, transform);

        if index == self.items.len() {
            self.items.push(item);
            Ok(None)
        } else {
            let previous = std::mem::replace(&mut self.items[index], item);
            tracing::debug!(id = %previous.id, slot = index, "replacing item");
            Ok(Some(previous))
        }
    }

    fn create_item(
        &mut self,
        stream: Stream,
        natural_size: ItemSize,
        slot: usize,
        transform: Transform,
    ) -> Item {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        Item {
            id,
            stream,
            natural_size,
            slot,
            transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(slots: usize) -> CarouselState {
        CarouselState::new(LayoutConfig::new(slots, 768.0), TransitionTiming::default()).unwrap()
    }

    fn stream(n: usize) -> Stream {
        Stream::new(format!("Track {n}"), "Artist", format!("{n}.jpg"))
    }

    fn cover() -> ItemSize {
        ItemSize::new(256.0, 256.0)
    }

    fn assert_slots_match_indices(state: &CarouselState) {
        for (index, item) in state.items().iter().enumerate() {
            assert_eq!(item.slot, index);
            assert_eq!(
                item.transform,
                placement::resolve(state.tables(), index, item.natural_size).unwrap()
            );
        }
    }

    #[test]
    fn first_push_lands_in_slot_zero_without_moves() {
        let mut state = carousel(5);
        let outcome = state.push(stream(0), cover()).unwrap();

        assert!(outcome.evicted.is_empty());
        assert!(outcome.moved.is_empty());
        assert_eq!(outcome.inserted.slot, 0);
        assert_eq!(outcome.inserted.transform.y, 384.0 - 236.0);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn pushes_shift_existing_items_one_slot() {
        let mut state = carousel(5);
        state.push(stream(0), cover()).unwrap();
        state.push(stream(1), cover()).unwrap();
        let outcome = state.push(stream(2), cover()).unwrap();

        let steps: Vec<_> = outcome.moved.iter().map(|m| (m.from, m.to)).collect();
        assert_eq!(steps, vec![(0, 1), (1, 2)]);
        let first = &outcome.moved[0].transition;
        assert_eq!(first.source, placement::resolve(state.tables(), 0, cover()).unwrap());
        assert_eq!(first.target, placement::resolve(state.tables(), 1, cover()).unwrap());
        assert_eq!(state.items()[0].stream.title, "Track 2");
        assert_eq!(state.items()[2].stream.title, "Track 0");
        assert_slots_match_indices(&state);
    }

    #[test]
    fn sixth_push_evicts_oldest_item() {
        let mut state = carousel(5);
        for n in 0..5 {
            let outcome = state.push(stream(n), cover()).unwrap();
            assert!(outcome.evicted.is_empty());
        }

        let outcome = state.push(stream(5), cover()).unwrap();
        assert_eq!(outcome.evicted.len(), 1);
        assert_eq!(outcome.evicted[0].stream.title, "Track 0");
        assert_eq!(outcome.moved.len(), 4);
        assert_eq!(state.len(), 5);
        assert_eq!(state.items()[0].stream.title, "Track 5");
    }

    #[test]
    fn length_never_exceeds_slot_count() {
        for slots in 1..=6 {
            let mut state = carousel(slots);
            for n in 0..20 {
                let outcome = state.push(stream(n), cover()).unwrap();
                assert!(state.len() <= slots);
                assert_eq!(state.items()[0].id, outcome.inserted.id);
                if n >= slots {
                    assert_eq!(outcome.evicted.len(), 1);
                }
            }
            assert_slots_match_indices(&state);
        }
    }

    #[test]
    fn single_slot_carousel_replaces_every_push() {
        let mut state = carousel(1);
        state.push(stream(0), cover()).unwrap();
        let outcome = state.push(stream(1), cover()).unwrap();

        assert_eq!(outcome.evicted.len(), 1);
        assert!(outcome.moved.is_empty());
        assert_eq!(state.items()[0].stream.title, "Track 1");
    }

    #[test]
    fn rejected_push_leaves_state_untouched() {
        let mut state = carousel(3);
        state.push(stream(0), cover()).unwrap();
        let before = state.items().to_vec();

        let err = state.push(stream(1), ItemSize::new(256.0, 0.0)).unwrap_err();
        assert!(matches!(err, CarouselError::InvalidItemGeometry { .. }));
        assert_eq!(state.items(), before.as_slice());
    }

    #[test]
    fn failed_configure_keeps_previous_tables() {
        let mut state = carousel(5);
        state.push(stream(0), cover()).unwrap();
        let tables = state.tables().clone();

        assert!(matches!(
            state.configure(0, 768.0).unwrap_err(),
            CarouselError::InvalidConfiguration(_)
        ));
        assert!(state.configure(5, -1.0).is_err());
        assert_eq!(state.tables(), &tables);
        assert!(state.push(stream(1), cover()).is_ok());
    }

    #[test]
    fn shrinking_evicts_overflow_and_snaps_survivors() {
        let mut state = carousel(5);
        for n in 0..5 {
            state.push(stream(n), cover()).unwrap();
        }

        let relayout = state.configure(3, 600.0).unwrap();
        let evicted: Vec<_> = relayout.evicted.iter().map(|i| i.stream.title.as_str()).collect();
        assert_eq!(evicted, vec!["Track 0", "Track 1"]);
        assert_eq!(relayout.placed.len(), 3);
        assert_eq!(state.len(), 3);
        assert_eq!(state.layout().viewport_height, 600.0);
        assert_slots_match_indices(&state);
    }

    #[test]
    fn place_at_fills_and_replaces_slots() {
        let mut state = carousel(3);
        assert!(state.place_at(0, stream(0), cover()).unwrap().is_none());
        assert!(state.place_at(1, stream(1), cover()).unwrap().is_none());

        let replaced = state.place_at(0, stream(2), cover()).unwrap();
        assert_eq!(replaced.map(|i| i.stream.title), Some("Track 0".to_string()));
        assert_eq!(state.len(), 2);
        assert_slots_match_indices(&state);

        assert!(state.place_at(3, stream(3), cover()).is_err());
        assert!(state.place_at(2, stream(3), cover()).is_ok());
    }

    #[test]
    fn place_at_rejects_gaps() {
        let mut state = carousel(5);
        let err = state.place_at(2, stream(0), cover()).unwrap_err();
        assert!(format!("{err}").contains("gap"));
        assert!(state.is_empty());
    }

    #[test]
    fn ids_are_unique_per_carousel() {
        let mut state = carousel(2);
        let a = state.push(stream(0), cover()).unwrap().inserted.id;
        let b = state.push(stream(1), cover()).unwrap().inserted.id;
        let c = state.push(stream(2), cover()).unwrap().inserted.id;

        assert!(a < b && b < c);
        assert!(state.item(a).is_none());
        assert_eq!(state.item(c).map(|i| i.slot), Some(0));
    }
}
