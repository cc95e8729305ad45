//! Replace-on-write sequence operations.
//!
//! Every mutation of an editable sequence (experience, education, skills,
//! achievements) goes through these three functions. They never mutate the
//! input: they return a fresh `Vec` in which untouched entries are
//! `Arc`-shared with the old sequence, so change detection can compare
//! entries by pointer identity.
//!
//! An out-of-range index is a recoverable no-op that returns the sequence
//! unchanged: callers derive indices from the sequence they render, so a
//! stale index means the entry is already gone.

use std::sync::Arc;

/// Appends a zero-value entry at the end. No upper bound on length.
pub fn append<T: Default>(seq: &[Arc<T>]) -> Vec<Arc<T>> {
    let mut next = seq.to_vec();
    next.push(Arc::new(T::default()));
    next
}

/// Removes the entry at `index`, preserving the relative order of the rest.
pub fn remove_at<T>(seq: &[Arc<T>], index: usize) -> Vec<Arc<T>> {
    if index >= seq.len() {
        return seq.to_vec();
    }
    let mut next = seq.to_vec();
    next.remove(index);
    next
}

/// Replaces entry `index` with a copy passed through `apply`. Only the
/// touched entry is cloned; every other slot keeps its `Arc`.
pub fn update_at<T: Clone>(seq: &[Arc<T>], index: usize, apply: impl FnOnce(&mut T)) -> Vec<Arc<T>> {
    if index >= seq.len() {
        return seq.to_vec();
    }
    let mut next = seq.to_vec();
    let mut entry = T::clone(&next[index]);
    apply(&mut entry);
    next[index] = Arc::new(entry);
    next
}
