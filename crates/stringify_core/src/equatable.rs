//! An ordered sequence that compares and hashes by value.
//!
//! [`EquatableVec`] is what makes "the members of one type" usable as a cache key: two sequences are equal iff they
//! have the same length and pairwise-equal elements in the same order, and the hash feeds every element in order.
//! The order is part of the value because the generated text depends on it.

use std::hash::{Hash, Hasher};
use std::ops::Deref;

/// Build-once ordered sequence with structural equality and order-sensitive hashing.
#[derive(Debug, Clone, Default)]
pub struct EquatableVec<T> {
    items: Vec<T>,
}

impl<T> EquatableVec<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: PartialEq> PartialEq for EquatableVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().zip(&other.items).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for EquatableVec<T> {}

impl<T: Hash> Hash for EquatableVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.items.len());
        for item in &self.items {
            item.hash(state);
        }
    }
}

impl<T> Deref for EquatableVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for EquatableVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for EquatableVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for EquatableVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EquatableVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
