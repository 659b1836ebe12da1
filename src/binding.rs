//! Static association between levers and the traps they toggle.

use crate::{EnvError, Position, Result, TrapId, TrapKind};
use std::collections::HashMap;

/// A lever placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lever {
    pub position: Position,
    /// Icon the lever was drawn with in the world description.
    pub icon: char,
    pub trap: TrapId,
}

/// Immutable lever→trap mapping and the canonical trap ordering.
///
/// The index of a trap in [`trap_positions`](Self::trap_positions) is its
/// [`TrapId`], which is also its index in every state's trap vector. More
/// than one lever may be bound to the same trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeverTrapBinding {
    traps: Vec<(Position, TrapKind)>,
    levers: Vec<Lever>,
    trap_index: HashMap<Position, TrapId>,
    by_position: HashMap<Position, TrapId>,
}

impl LeverTrapBinding {
    /// Builds a binding from the ordered trap list and the levers found on
    /// the map.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::InvalidWorld` if a lever references a trap id with
    /// no trap, two traps or two levers share a position, or a lever sits on
    /// a trap.
    pub fn new(traps: Vec<(Position, TrapKind)>, levers: Vec<Lever>) -> Result<Self> {
        let mut trap_index = HashMap::with_capacity(traps.len());
        for (id, (position, _)) in traps.iter().enumerate() {
            if trap_index.insert(*position, TrapId(id)).is_some() {
                return Err(EnvError::InvalidWorld(format!(
                    "more than one trap at {}",
                    position
                )));
            }
        }

        let mut by_position = HashMap::with_capacity(levers.len());
        for lever in &levers {
            if lever.trap.index() >= traps.len() {
                return Err(EnvError::InvalidWorld(format!(
                    "lever '{}' at {} references unknown {}",
                    lever.icon, lever.position, lever.trap
                )));
            }
            if trap_index.contains_key(&lever.position) {
                return Err(EnvError::InvalidWorld(format!(
                    "lever '{}' at {} overlaps a trap",
                    lever.icon, lever.position
                )));
            }
            if by_position.insert(lever.position, lever.trap).is_some() {
                return Err(EnvError::InvalidWorld(format!(
                    "more than one lever at {}",
                    lever.position
                )));
            }
        }

        Ok(Self {
            traps,
            levers,
            trap_index,
            by_position,
        })
    }

    /// A binding with no traps or levers.
    pub fn empty() -> Self {
        Self {
            traps: Vec::new(),
            levers: Vec::new(),
            trap_index: HashMap::new(),
            by_position: HashMap::new(),
        }
    }

    pub fn trap_count(&self) -> usize {
        self.traps.len()
    }

    pub fn trap_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.traps.iter().map(|(position, _)| *position)
    }

    pub fn trap_position(&self, id: TrapId) -> Option<Position> {
        self.traps.get(id.index()).map(|(position, _)| *position)
    }

    pub fn trap_kind(&self, id: TrapId) -> Option<TrapKind> {
        self.traps.get(id.index()).map(|(_, kind)| *kind)
    }

    /// The trap id whose slot is at `position`, if any.
    pub fn trap_at(&self, position: Position) -> Option<TrapId> {
        self.trap_index.get(&position).copied()
    }

    /// The trap toggled by a lever at `position`, if any.
    pub fn lever_target(&self, position: Position) -> Option<TrapId> {
        self.by_position.get(&position).copied()
    }

    /// Levers in the order they were found on the map.
    pub fn levers(&self) -> &[Lever] {
        &self.levers
    }

    pub fn lever_at(&self, position: Position) -> Option<&Lever> {
        self.levers.iter().find(|lever| lever.position == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lever(row: usize, col: usize, trap: usize) -> Lever {
        Lever {
            position: Position::new(row, col),
            icon: 'A',
            trap: TrapId(trap),
        }
    }

    #[test]
    fn test_lookups() {
        let binding = LeverTrapBinding::new(
            vec![
                (Position::new(0, 2), TrapKind::Trapdoor),
                (Position::new(1, 4), TrapKind::Drawbridge),
            ],
            vec![lever(0, 0, 1)],
        )
        .unwrap();

        assert_eq!(binding.trap_count(), 2);
        assert_eq!(binding.trap_at(Position::new(1, 4)), Some(TrapId(1)));
        assert_eq!(binding.trap_at(Position::new(0, 0)), None);
        assert_eq!(binding.lever_target(Position::new(0, 0)), Some(TrapId(1)));
        assert_eq!(binding.lever_target(Position::new(0, 2)), None);
        assert_eq!(binding.trap_kind(TrapId(0)), Some(TrapKind::Trapdoor));
        assert_eq!(binding.trap_position(TrapId(5)), None);
    }

    #[test]
    fn test_two_levers_may_share_a_trap() {
        let binding = LeverTrapBinding::new(
            vec![(Position::new(0, 2), TrapKind::Trapdoor)],
            vec![lever(0, 0, 0), lever(0, 1, 0)],
        )
        .unwrap();
        assert_eq!(binding.lever_target(Position::new(0, 0)), Some(TrapId(0)));
        assert_eq!(binding.lever_target(Position::new(0, 1)), Some(TrapId(0)));
    }

    #[test]
    fn test_unknown_trap_rejected() {
        let result = LeverTrapBinding::new(Vec::new(), vec![lever(0, 0, 0)]);
        assert!(matches!(result, Err(EnvError::InvalidWorld(_))));
    }

    #[test]
    fn test_duplicate_lever_position_rejected() {
        let result = LeverTrapBinding::new(
            vec![(Position::new(0, 2), TrapKind::Trapdoor)],
            vec![lever(0, 0, 0), lever(0, 0, 0)],
        );
        assert!(matches!(result, Err(EnvError::InvalidWorld(_))));
    }

    #[test]
    fn test_lever_on_trap_rejected() {
        let result = LeverTrapBinding::new(
            vec![(Position::new(0, 2), TrapKind::Trapdoor)],
            vec![lever(0, 2, 0)],
        );
        assert!(matches!(result, Err(EnvError::InvalidWorld(_))));
    }
}
