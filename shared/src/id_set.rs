use std::collections::{hash_set, HashSet};

use crate::IdListOp;

/// Membership set of an id list.
///
/// An `IdSet` is never changed once it is shared: [`IdSet::with_applied`]
/// derives a new set, which the owning list then publishes in one swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet {
    inner: HashSet<String>,
}

impl IdSet {
    pub fn new() -> Self {
        Self {
            inner: HashSet::new(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.inner.iter()
    }

    /// Clones this set and replays `ops` on the clone, in order.
    pub fn with_applied<'a, I>(&self, ops: I) -> Self
    where
        I: IntoIterator<Item = &'a IdListOp>,
    {
        let mut next = self.clone();
        for op in ops {
            match op {
                IdListOp::Add(id) => {
                    next.inner.insert(id.clone());
                }
                IdListOp::Remove(id) => {
                    next.inner.remove(id);
                }
            }
        }
        next
    }
}

impl FromIterator<String> for IdSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = &'a String;
    type IntoIter = hash_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
