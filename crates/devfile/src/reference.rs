// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Session-scoped tracking of visited devfile locations.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./reference_test.rs"]
mod reference_test;

/// The canonical URIs visited during one resolution session.
///
/// Clones share the same underlying set, so a child context handed a clone of
/// its parent's set sees (and extends) everything the parent has visited.
/// Unrelated sessions should each start from [`ReferenceSet::new`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    visited: Rc<RefCell<BTreeSet<String>>>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `uri` as visited, failing if it was already seen.
    pub fn visit(&self, uri: &str) -> Result<()> {
        let mut visited = self.visited.borrow_mut();
        if visited.contains(uri) {
            return Err(Error::RecursiveReference(uri.to_string()));
        }
        tracing::debug!(uri, "marking devfile as visited");
        visited.insert(uri.to_string());
        Ok(())
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.visited.borrow().contains(uri)
    }

    pub fn len(&self) -> usize {
        self.visited.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.borrow().is_empty()
    }

    /// Snapshot of the visited URIs in sorted order.
    pub fn uris(&self) -> Vec<String> {
        self.visited.borrow().iter().cloned().collect()
    }

    /// True when both handles refer to the same session set.
    pub fn is_shared_with(&self, other: &ReferenceSet) -> bool {
        Rc::ptr_eq(&self.visited, &other.visited)
    }
}
