//! Display ordering of reorderable lists
//!
//! Positions sent to the backend are one-based for every resource.

use serde::{Deserialize, Serialize};

/// Item of a list whose display position is persisted server-side
pub trait Orderable {
    fn id(&self) -> i64;
    fn sort_order(&self) -> i32;
    fn set_sort_order(&mut self, sort_order: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Position of the first item
pub const FIRST_POSITION: i32 = 1;

/// Entry of the bulk `POST /{resource}/reorder` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: i64,
    pub sort_order: i32,
}

/// Swap the item at `index` with its neighbour.
///
/// Returns `None` when the neighbour does not exist (first item up, last
/// item down, index out of range); the caller must not send anything then.
pub fn move_item<T: Clone>(items: &[T], index: usize, direction: Direction) -> Option<Vec<T>> {
    if index >= items.len() {
        return None;
    }
    let neighbour = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => {
            if index + 1 >= items.len() {
                return None;
            }
            index + 1
        }
    };

    let mut moved = items.to_vec();
    moved.swap(index, neighbour);
    Some(moved)
}

/// Take the item at `from` out and insert it at `to` (drag and drop).
pub fn move_to<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from == to || from >= items.len() || to >= items.len() {
        return None;
    }

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Some(moved)
}

/// Rewrite `sort_order` so it matches array order
pub fn renumber<T: Orderable>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_sort_order(position_of(index));
    }
}

/// One entry per item, in array order
pub fn reorder_payload<T: Orderable>(items: &[T]) -> Vec<ReorderEntry> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| ReorderEntry {
            id: item.id(),
            sort_order: position_of(index),
        })
        .collect()
}

/// Stable sort of a fetched list by `(sort_order, id)`
pub fn sort_for_display<T: Orderable>(items: &mut [T]) {
    items.sort_by_key(|item| (item.sort_order(), item.id()));
}

pub fn position_of(index: usize) -> i32 {
    FIRST_POSITION + index as i32
}

pub fn index_of<T: Orderable>(items: &[T], id: i64) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Row {
        pub id: i64,
        pub name: &'static str,
        pub sort_order: i32,
    }

    impl Orderable for Row {
        fn id(&self) -> i64 {
            self.id
        }
        fn sort_order(&self) -> i32 {
            self.sort_order
        }
        fn set_sort_order(&mut self, sort_order: i32) {
            self.sort_order = sort_order;
        }
    }

    pub(crate) fn abc() -> Vec<Row> {
        vec![
            Row { id: 1, name: "A", sort_order: 1 },
            Row { id: 2, name: "B", sort_order: 2 },
            Row { id: 3, name: "C", sort_order: 3 },
        ]
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_move_up_swaps_with_previous() {
        let moved = move_item(&abc(), 1, Direction::Up).unwrap();
        assert_eq!(names(&moved), vec!["B", "A", "C"]);

        let payload = reorder_payload(&moved);
        assert_eq!(
            payload,
            vec![
                ReorderEntry { id: 2, sort_order: 1 },
                ReorderEntry { id: 1, sort_order: 2 },
                ReorderEntry { id: 3, sort_order: 3 },
            ]
        );
    }

    #[test]
    fn test_boundaries_are_noop() {
        assert!(move_item(&abc(), 0, Direction::Up).is_none());
        assert!(move_item(&abc(), 2, Direction::Down).is_none());
        assert!(move_item(&abc(), 7, Direction::Down).is_none());
        assert!(move_item::<Row>(&[], 0, Direction::Up).is_none());
    }

    #[test]
    fn test_swap_keeps_other_items_in_place() {
        let rows: Vec<Row> = (1..=6)
            .map(|i| Row { id: i, name: "x", sort_order: i as i32 })
            .collect();

        for index in 0..rows.len() {
            for direction in [Direction::Up, Direction::Down] {
                let Some(moved) = move_item(&rows, index, direction) else {
                    continue;
                };
                let neighbour = match direction {
                    Direction::Up => index - 1,
                    Direction::Down => index + 1,
                };
                assert_eq!(moved[neighbour].id, rows[index].id);
                assert_eq!(moved[index].id, rows[neighbour].id);
                for other in 0..rows.len() {
                    if other != index && other != neighbour {
                        assert_eq!(moved[other].id, rows[other].id);
                    }
                }
            }
        }
    }

    #[test]
    fn test_payload_is_complete_and_unique() {
        let moved = move_item(&abc(), 0, Direction::Down).unwrap();
        let payload = reorder_payload(&moved);

        assert_eq!(payload.len(), moved.len());
        let ids: HashSet<i64> = payload.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), moved.len());
        for (index, entry) in payload.iter().enumerate() {
            assert_eq!(entry.id, moved[index].id);
            assert_eq!(entry.sort_order, index as i32 + 1);
        }
    }

    #[test]
    fn test_move_to_drag_down_and_up() {
        let down = move_to(&abc(), 0, 2).unwrap();
        assert_eq!(names(&down), vec!["B", "C", "A"]);

        let up = move_to(&abc(), 2, 0).unwrap();
        assert_eq!(names(&up), vec!["C", "A", "B"]);

        assert!(move_to(&abc(), 1, 1).is_none());
    }

    #[test]
    fn test_sort_for_display_handles_zero_based_and_gaps() {
        let mut rows = vec![
            Row { id: 9, name: "late", sort_order: 10 },
            Row { id: 4, name: "first", sort_order: 0 },
            Row { id: 2, name: "tie-low-id", sort_order: 5 },
            Row { id: 7, name: "tie-high-id", sort_order: 5 },
        ];
        sort_for_display(&mut rows);
        assert_eq!(names(&rows), vec!["first", "tie-low-id", "tie-high-id", "late"]);

        renumber(&mut rows);
        let orders: Vec<i32> = rows.iter().map(|r| r.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }
}
