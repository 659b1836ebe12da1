//! # Game state
//!
//! A [`GameState`] is everything that can change during play: where the agent
//! stands, and which traps have been toggled by their levers. The static map
//! lives elsewhere, so a state is small, cheap to clone, and safe to share
//! between any number of search nodes.
//!
//! States compare and hash structurally, which makes them usable directly as
//! keys in the visited set or frontier of a search algorithm.
//!
//! ```
//! use dragon_env::{GameState, Position, TrapId};
//! use std::collections::HashSet;
//!
//! let start = GameState::new(Position::new(2, 1), 2);
//! let toggled = start.with_trap_toggled(TrapId(1)).unwrap();
//!
//! assert!(!start.is_trap_open(TrapId(1)));
//! assert!(toggled.is_trap_open(TrapId(1)));
//!
//! let mut seen = HashSet::new();
//! seen.insert(start.clone());
//! assert!(seen.contains(&GameState::new(Position::new(2, 1), 2)));
//! assert!(!seen.contains(&toggled));
//! ```

use crate::{Position, TrapId};
use std::fmt;

/// Agent position plus the toggle status of every trap.
///
/// The trap vector is indexed by [`TrapId`]. A set bit means the trap has
/// been triggered and its slot is currently solid; a cleared bit means the
/// slot is passable. Every state the environment hands out has a vector of
/// exactly [`LeverTrapBinding::trap_count`](crate::LeverTrapBinding::trap_count)
/// entries.
///
/// There are no mutating methods: transitions build a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    position: Position,
    trap_open: Box<[bool]>,
}

impl GameState {
    /// Creates a state at `position` with `trap_count` cleared trap bits.
    pub fn new(position: Position, trap_count: usize) -> Self {
        Self {
            position,
            trap_open: vec![false; trap_count].into_boxed_slice(),
        }
    }

    /// Creates a state from an explicit trap vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragon_env::{GameState, Position, TrapId};
    ///
    /// let state = GameState::with_traps(Position::new(0, 0), vec![true, false]);
    /// assert!(state.is_trap_open(TrapId(0)));
    /// assert_eq!(state.trap_count(), 2);
    /// ```
    pub fn with_traps(position: Position, trap_open: Vec<bool>) -> Self {
        Self {
            position,
            trap_open: trap_open.into_boxed_slice(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn col(&self) -> usize {
        self.position.col
    }

    /// The full trap vector, indexed by trap id.
    pub fn trap_status(&self) -> &[bool] {
        &self.trap_open
    }

    pub fn trap_count(&self) -> usize {
        self.trap_open.len()
    }

    /// Whether trap `id` is currently triggered. Ids beyond the vector read
    /// as untriggered.
    pub fn is_trap_open(&self, id: TrapId) -> bool {
        self.trap_open.get(id.index()).copied().unwrap_or(false)
    }

    /// The same trap vector at a different position.
    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            position,
            trap_open: self.trap_open.clone(),
        }
    }

    /// A copy with trap `id` flipped, or `None` if the vector has no such
    /// entry.
    pub fn with_trap_toggled(&self, id: TrapId) -> Option<Self> {
        let mut trap_open = self.trap_open.clone();
        let bit = trap_open.get_mut(id.index())?;
        *bit = !*bit;
        Some(Self {
            position: self.position,
            trap_open,
        })
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.position)?;
        for &open in self.trap_open.iter() {
            f.write_str(if open { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(state: &GameState) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_state_has_cleared_traps() {
        let state = GameState::new(Position::new(1, 2), 3);
        assert_eq!(state.trap_status(), &[false, false, false]);
        assert_eq!(state.row(), 1);
        assert_eq!(state.col(), 2);
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let a = GameState::with_traps(Position::new(0, 1), vec![true, false]);
        let b = GameState::with_traps(Position::new(0, 1), vec![true, false]);
        let c = GameState::with_traps(Position::new(0, 1), vec![false, false]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
        assert_ne!(a, a.moved_to(Position::new(0, 2)));
    }

    #[test]
    fn test_toggle_leaves_original_untouched() {
        let original = GameState::new(Position::new(0, 0), 2);
        let toggled = original.with_trap_toggled(TrapId(0)).unwrap();
        assert_eq!(original.trap_status(), &[false, false]);
        assert_eq!(toggled.trap_status(), &[true, false]);
        assert_eq!(toggled.with_trap_toggled(TrapId(0)).unwrap(), original);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let state = GameState::new(Position::new(0, 0), 1);
        assert!(state.with_trap_toggled(TrapId(1)).is_none());
        assert!(!state.is_trap_open(TrapId(4)));
    }

    #[test]
    fn test_display() {
        let state = GameState::with_traps(Position::new(3, 4), vec![true, false]);
        assert_eq!(state.to_string(), "(3, 4) [10]");
    }
}
