// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::document::ObjectId;

/// The set of overlays currently marked active in the editor.
///
/// The container only does bookkeeping: a small `Vec` of unique ids plus a
/// monotonically increasing revision counter that bumps when the contents
/// actually change. How pointer input maps onto selection changes (click,
/// shift-click, lasso) is decided by the interaction layer, which is also
/// where the "backgrounds are never selected" rule is enforced — only
/// selectable objects are ever fed in here.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    items: Vec<ObjectId>,
    revision: u64,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selected overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Selected ids in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ObjectId] {
        &self.items
    }

    /// Returns `true` if `id` is currently selected.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.items.contains(&id)
    }

    /// A cheap "did anything change?" marker for observers.
    ///
    /// Bumped only when a mutation changes the selected set; no-op calls
    /// (for example, re-selecting the already-selected singleton) leave it
    /// unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the selection with a single id (plain click).
    pub fn select_only(&mut self, id: ObjectId) {
        if self.items.len() == 1 && self.items[0] == id {
            return;
        }
        self.items.clear();
        self.items.push(id);
        self.bump();
    }

    /// Toggles membership of `id` (modifier click).
    pub fn toggle(&mut self, id: ObjectId) {
        if let Some(idx) = self.items.iter().position(|i| *i == id) {
            self.items.remove(idx);
        } else {
            self.items.push(id);
        }
        self.bump();
    }

    /// Replaces the selection with a batch of ids (lasso result).
    ///
    /// Duplicates in the input are ignored.
    pub fn replace_with<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ObjectId>,
    {
        let mut new_items: Vec<ObjectId> = Vec::new();
        for id in ids {
            if !new_items.contains(&id) {
                new_items.push(id);
            }
        }
        if new_items == self.items {
            return;
        }
        self.items = new_items;
        self.bump();
    }

    /// Removes `id` if selected (for example, after the overlay is deleted).
    pub fn remove(&mut self, id: ObjectId) {
        if let Some(idx) = self.items.iter().position(|i| *i == id) {
            self.items.remove(idx);
            self.bump();
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
