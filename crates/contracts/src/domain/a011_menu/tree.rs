//! Two-level menu tree: flatten, drag-and-drop, reorder payload
//!
//! Display order is the pre-order walk of the tree (root, then its
//! children). A drop moves the dragged node to the target's position among
//! the target's siblings, so a node dropped on a row of the other level is
//! reparented to that level. A root that has children can never become a
//! child, because the tree is at most two levels deep.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::aggregate::{MenuForm, MenuNode, MenuReorderEntry};
use crate::shared::optimistic::{FetchOutcome, MoveOutcome, ReorderAck, ReorderCommand};
use crate::shared::ordering::position_of;
use crate::shared::request_sequence::{FetchVerdict, MutationFinish, MutationGuard, MutationStart, Ticket};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropError {
    #[error("A menu item with sub-items cannot be placed under another item")]
    WouldNest,
}

/// Tree after a drop and the payload persisting it
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDrop {
    pub tree: Vec<MenuNode>,
    pub payload: Vec<MenuReorderEntry>,
}

/// Pre-order sequence of all nodes, children detached
pub fn flatten(tree: &[MenuNode]) -> Vec<MenuNode> {
    let mut flat = Vec::new();
    for root in tree {
        let mut root = root.clone();
        let children = std::mem::take(&mut root.all_children);
        flat.push(root);
        flat.extend(children.into_iter().map(|mut child| {
            child.all_children.clear();
            child
        }));
    }
    flat
}

/// Rebuild the tree from a pre-order sequence.
///
/// Children whose parent is not in the sequence stay at root level, in the
/// position they had.
pub fn unflatten(flat: Vec<MenuNode>) -> Vec<MenuNode> {
    let root_ids: HashSet<i64> = flat.iter().filter(|node| node.is_root()).map(|node| node.id).collect();
    let mut roots: Vec<MenuNode> = Vec::new();
    let mut waiting: HashMap<i64, Vec<MenuNode>> = HashMap::new();
    for mut node in flat {
        match node.parent_id.filter(|parent_id| root_ids.contains(parent_id)) {
            Some(parent_id) => match roots.iter_mut().find(|root| root.id == parent_id) {
                Some(parent) => parent.all_children.push(node),
                None => waiting.entry(parent_id).or_default().push(node),
            },
            None => {
                if let Some(early) = waiting.remove(&node.id) {
                    node.all_children.extend(early);
                }
                roots.push(node);
            }
        }
    }
    roots
}

/// Parent (None for roots) and index among siblings
fn locate(tree: &[MenuNode], id: i64) -> Option<(Option<i64>, usize)> {
    for (index, root) in tree.iter().enumerate() {
        if root.id == id {
            return Some((None, index));
        }
        if let Some(child_index) = root.all_children.iter().position(|c| c.id == id) {
            return Some((Some(root.id), child_index));
        }
    }
    None
}

pub fn find(tree: &[MenuNode], id: i64) -> Option<&MenuNode> {
    tree.iter()
        .find_map(|root| if root.id == id { Some(root) } else { root.all_children.iter().find(|c| c.id == id) })
}

fn siblings_mut(tree: &mut Vec<MenuNode>, parent: Option<i64>) -> Option<&mut Vec<MenuNode>> {
    match parent {
        None => Some(tree),
        Some(parent_id) => tree
            .iter_mut()
            .find(|root| root.id == parent_id)
            .map(|root| &mut root.all_children),
    }
}

/// Assign `sort_order` from the flattened position
fn renumber(tree: &mut [MenuNode]) {
    let mut index = 0;
    for root in tree.iter_mut() {
        root.sort_order = position_of(index);
        index += 1;
        for child in root.all_children.iter_mut() {
            child.sort_order = position_of(index);
            index += 1;
        }
    }
}

/// Full flattened order, one entry per node
pub fn reorder_payload(tree: &[MenuNode]) -> Vec<MenuReorderEntry> {
    flatten(tree)
        .iter()
        .enumerate()
        .map(|(index, node)| MenuReorderEntry {
            id: node.id,
            sort_order: position_of(index),
            parent_id: node.parent_id,
        })
        .collect()
}

/// Compute the tree after dropping `dragged_id` on `target_id`.
///
/// `Ok(None)` when dropping on itself or when an id is unknown.
pub fn plan_drop(tree: &[MenuNode], dragged_id: i64, target_id: i64) -> Result<Option<MenuDrop>, DropError> {
    if dragged_id == target_id {
        return Ok(None);
    }
    let (Some((from_parent, from_index)), Some((to_parent, to_index))) =
        (locate(tree, dragged_id), locate(tree, target_id))
    else {
        return Ok(None);
    };

    let dragged_has_children = from_parent.is_none() && tree[from_index].has_children();
    if dragged_has_children && to_parent.is_some() {
        return Err(DropError::WouldNest);
    }

    let mut next = tree.to_vec();
    let Some(mut node) = siblings_mut(&mut next, from_parent).map(|s| s.remove(from_index)) else {
        return Ok(None);
    };
    let Some(siblings) = siblings_mut(&mut next, to_parent) else {
        return Ok(None);
    };
    let Some(target_now) = siblings.iter().position(|n| n.id == target_id) else {
        return Ok(None);
    };

    // same list moving down lands after the target, like an array move
    let insert_at = if from_parent == to_parent && from_index < to_index {
        target_now + 1
    } else {
        target_now
    };
    node.parent_id = to_parent;
    siblings.insert(insert_at, node);

    renumber(&mut next);
    let payload = reorder_payload(&next);
    Ok(Some(MenuDrop { tree: next, payload }))
}

/// Check the parent chosen in the form against the current tree
pub fn validate_parent(form: &MenuForm, editing_id: Option<i64>, tree: &[MenuNode]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(parent_id) = form.parent_id {
        if Some(parent_id) == editing_id {
            errors.add("parent_id", "An item cannot be its own parent");
        } else if !tree.iter().any(|root| root.id == parent_id) {
            errors.add("parent_id", "Parent must be a top-level item of the same menu");
        }

        let editing_has_children = editing_id
            .and_then(|id| tree.iter().find(|root| root.id == id))
            .map_or(false, MenuNode::has_children);
        if editing_has_children {
            errors.add("parent_id", "An item with sub-items cannot become a sub-item");
        }
    }
    errors.into_result()
}

fn sort_tree(tree: &mut [MenuNode]) {
    tree.sort_by_key(|node| (node.sort_order, node.id));
    for root in tree.iter_mut() {
        root.all_children.sort_by_key(|node| (node.sort_order, node.id));
    }
}

/// Optimistic drag-and-drop state of one menu location
#[derive(Debug, Clone, Default)]
pub struct OptimisticMenu {
    tree: Vec<MenuNode>,
    guard: MutationGuard,
}

impl OptimisticMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &[MenuNode] {
        &self.tree
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn apply_drop(&mut self, dragged_id: i64, target_id: i64) -> Result<MoveOutcome<MenuReorderEntry>, DropError> {
        let Some(drop) = plan_drop(&self.tree, dragged_id, target_id)? else {
            return Ok(MoveOutcome::Unchanged);
        };
        self.tree = drop.tree;

        Ok(match self.guard.record_change() {
            MutationStart::Send(ticket) => MoveOutcome::Send(ReorderCommand {
                ticket,
                payload: drop.payload,
            }),
            MutationStart::Queued => MoveOutcome::Queued,
        })
    }

    pub fn finish_reorder(&mut self, ticket: Ticket, succeeded: bool) -> ReorderAck<MenuReorderEntry> {
        match self.guard.finish(ticket, succeeded) {
            MutationFinish::Confirmed => ReorderAck::Confirmed,
            MutationFinish::Reload => ReorderAck::Reload,
            MutationFinish::SendNext(next) => ReorderAck::SendNext(ReorderCommand {
                ticket: next,
                payload: reorder_payload(&self.tree),
            }),
            MutationFinish::Rollback => ReorderAck::Rollback,
            MutationFinish::Unknown => ReorderAck::Ignored,
        }
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.guard.begin_fetch()
    }

    pub fn finish_fetch(&mut self, ticket: Ticket, mut tree: Vec<MenuNode>) -> FetchOutcome {
        match self.guard.settle_fetch(ticket) {
            FetchVerdict::Drop => FetchOutcome::Stale,
            FetchVerdict::Retry => FetchOutcome::Refetch,
            FetchVerdict::Apply => {
                sort_tree(&mut tree);
                self.tree = tree;
                FetchOutcome::Applied
            }
        }
    }

    /// Empty the tree after the newest load failed
    pub fn fail_fetch(&mut self, ticket: Ticket) -> bool {
        if !self.guard.accepts_failed_fetch(ticket) {
            return false;
        }
        self.tree.clear();
        true
    }
}
