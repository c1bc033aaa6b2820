//! Playlist ordering engine
//!
//! Answers "what comes after/before song X" over a playlist's ordered
//! member list, wrapping around at both ends:
//!
//! ```text
//! [A, B, C]    next(B) = C    next(C) = A    prev(A) = C
//! ```
//!
//! An id that is not in the list resolves to index 0 before stepping, so
//! `next` of a stale id returns the second member (or the only one). Both
//! directions share [`resolve_index`], so this leniency cannot differ
//! between them.
//!
//! Everything here is pure: callers pass in a snapshot of the member list
//! ordered by the persisted `position` field.

use crate::error::{entity, CadenceError, Result};
use std::fmt;

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Index of `current` in `ordered`, or 0 when it is not a member
pub fn resolve_index<T: PartialEq>(ordered: &[T], current: &T) -> usize {
    ordered.iter().position(|id| id == current).unwrap_or(0)
}

/// Step once from `current` in `direction`, wrapping around
///
/// # Errors
/// Returns [`CadenceError::EmptyPlaylist`] when `ordered` is empty.
pub fn step<'a, T: PartialEq>(ordered: &'a [T], current: &T, direction: Direction) -> Result<&'a T> {
    let len = ordered.len();
    if len == 0 {
        return Err(CadenceError::EmptyPlaylist);
    }

    let index = resolve_index(ordered, current);
    let target = match direction {
        Direction::Next => (index + 1) % len,
        Direction::Prev => (index + len - 1) % len,
    };

    Ok(&ordered[target])
}

/// The member after `current`, wrapping from the last back to the first
pub fn next<'a, T: PartialEq>(ordered: &'a [T], current: &T) -> Result<&'a T> {
    step(ordered, current, Direction::Next)
}

/// The member before `current`, wrapping from the first back to the last
pub fn prev<'a, T: PartialEq>(ordered: &'a [T], current: &T) -> Result<&'a T> {
    step(ordered, current, Direction::Prev)
}

/// Ordered, duplicate-free member list
///
/// In-memory counterpart of the persisted `playlist_songs` rows: appends go
/// to the end, removals keep the relative order of everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership<T> {
    members: Vec<T>,
}

impl<T> Default for Membership<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T: PartialEq + fmt::Display> Membership<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already ordered list, keeping the first occurrence of
    /// any repeated id
    pub fn from_ordered(ordered: impl IntoIterator<Item = T>) -> Self {
        let mut membership = Self::new();
        for id in ordered {
            if !membership.contains(&id) {
                membership.members.push(id);
            }
        }
        membership
    }

    pub fn contains(&self, id: &T) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.members
    }

    /// Append at the end of the current order
    ///
    /// # Errors
    /// Returns [`CadenceError::DuplicateMember`] if `id` is already present.
    pub fn append(&mut self, id: T) -> Result<()> {
        if self.contains(&id) {
            return Err(CadenceError::DuplicateMember);
        }
        self.members.push(id);
        Ok(())
    }

    /// Remove a member, closing the gap it leaves
    ///
    /// # Errors
    /// Returns [`CadenceError::NotFound`] if `id` is not a member.
    pub fn remove(&mut self, id: &T) -> Result<T> {
        let index = self
            .members
            .iter()
            .position(|member| member == id)
            .ok_or_else(|| CadenceError::not_found(entity::PLAYLIST_MEMBER, id.to_string()))?;
        Ok(self.members.remove(index))
    }

    pub fn next(&self, current: &T) -> Result<&T> {
        next(&self.members, current)
    }

    pub fn prev(&self, current: &T) -> Result<&T> {
        prev(&self.members, current)
    }
}

impl<T> IntoIterator for Membership<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}
