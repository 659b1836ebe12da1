//! # Game environment and transition engine
//!
//! [`GameEnv`] ties the static world together (the [`TileMap`], the
//! [`LeverTrapBinding`] and the start position) and exposes the operations a
//! search algorithm needs:
//!
//! - [`initial_state`](GameEnv::initial_state) to seed the frontier
//! - [`perform`](GameEnv::perform) to expand a node by one action
//! - [`is_solved`](GameEnv::is_solved) to test for the goal
//! - [`cost_of`](GameEnv::cost_of) to accumulate path cost
//!
//! ## Derived solidity
//!
//! Traps are never written into the map. Whether a trap slot blocks movement
//! is computed from the trap vector of the state being examined, see
//! [`effective`](GameEnv::effective). Every rule below consults that lookup,
//! so `perform` reads the environment and the input state and writes
//! nothing but its return value. Any number of callers, on any number of
//! threads, may expand states derived from a common ancestor.
//!
//! ## Basic Usage
//!
//! ```
//! use dragon_env::{Action, GameEnv};
//!
//! let env: GameEnv = "\
//! 2,3
//! 2,2
//! 0,0
//! 0,0
//! 0,0
//! A:T
//! P G
//! XXX
//! ".parse().unwrap();
//!
//! let start = env.initial_state();
//! let (legal, middle) = env.perform(&start, Action::WalkRight);
//! assert!(legal);
//! let (legal, end) = env.perform(&middle, Action::WalkRight);
//! assert!(legal);
//! assert!(env.is_solved(&end));
//!
//! // Walking off the left edge is a dead end, not an error.
//! let (legal, same) = env.perform(&start, Action::WalkLeft);
//! assert!(!legal);
//! assert_eq!(same, start);
//! ```

use crate::loader::Targets;
use crate::{
    Action, EnvError, GameState, LeverTrapBinding, Position, Result, Tile, TileMap, TrapId,
    ACTION_COSTS,
};

/// Why an action was rejected from a given state.
///
/// Rejections are an ordinary outcome of the rules; search algorithms treat
/// them as pruned edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    /// Walking without solid ground or a ladder directly below.
    NoFooting,
    /// Climbing while not standing on a ladder.
    NotOnLadder,
    /// The target cell lies outside the grid.
    OutOfBounds,
    /// The target cell is solid, possibly because of a triggered trap.
    Collision,
    /// The lever's trap has no entry in the state's trap vector.
    UnknownTrap(TrapId),
}

/// The static world and the rules that move an agent through it.
///
/// A `GameEnv` is immutable after construction. It is `Send + Sync`, so one
/// instance may be shared by reference across threads expanding a frontier.
#[derive(Debug, Clone)]
pub struct GameEnv {
    tile_map: TileMap,
    binding: LeverTrapBinding,
    start: Position,
    targets: Targets,
}

impl GameEnv {
    /// Assembles an environment from already-built parts.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::InvalidWorld` if the start lies outside the grid or
    /// on a solid tile, if the start coincides with a trap, if a lever lies
    /// outside the grid or on a solid tile, or if the trap slots in the map do
    /// not match the traps in the binding.
    pub fn from_parts(
        tile_map: TileMap,
        binding: LeverTrapBinding,
        start: Position,
    ) -> Result<Self> {
        match tile_map.get(start) {
            None => {
                return Err(EnvError::InvalidWorld(format!(
                    "start {} lies outside the grid",
                    start
                )))
            }
            Some(Tile::Solid) => {
                return Err(EnvError::InvalidWorld(format!(
                    "start {} is inside a solid tile",
                    start
                )))
            }
            Some(_) => {}
        }
        if binding.trap_at(start).is_some() {
            return Err(EnvError::InvalidWorld(format!(
                "start {} coincides with a trap",
                start
            )));
        }

        for lever in binding.levers() {
            match tile_map.get(lever.position) {
                None => {
                    return Err(EnvError::InvalidWorld(format!(
                        "lever '{}' at {} lies outside the grid",
                        lever.icon, lever.position
                    )))
                }
                Some(Tile::Solid) => {
                    return Err(EnvError::InvalidWorld(format!(
                        "lever '{}' at {} is inside a solid tile",
                        lever.icon, lever.position
                    )))
                }
                Some(_) => {}
            }
        }

        let mut slots = 0;
        for row in 0..tile_map.rows() {
            for (col, tile) in tile_map.row(row).enumerate() {
                if let Tile::TrapSlot(kind) = tile {
                    let position = Position::new(row, col);
                    let bound = binding
                        .trap_at(position)
                        .and_then(|id| binding.trap_kind(id));
                    if bound != Some(kind) {
                        return Err(EnvError::InvalidWorld(format!(
                            "trap slot at {} has no matching trap in the binding",
                            position
                        )));
                    }
                    slots += 1;
                }
            }
        }
        if slots != binding.trap_count() {
            return Err(EnvError::InvalidWorld(format!(
                "binding lists {} traps but the map has {} trap slots",
                binding.trap_count(),
                slots
            )));
        }

        Ok(Self {
            tile_map,
            binding,
            start,
            targets: Targets::default(),
        })
    }

    /// Attaches grading targets read from a world description.
    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = targets;
        self
    }

    pub fn tile_map(&self) -> &TileMap {
        &self.tile_map
    }

    pub fn binding(&self) -> &LeverTrapBinding {
        &self.binding
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.tile_map.goal()
    }

    /// Grading targets from the world description. The engine never reads
    /// them.
    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// The state every search starts from: the agent at the start position
    /// and every trap untriggered.
    pub fn initial_state(&self) -> GameState {
        GameState::new(self.start, self.binding.trap_count())
    }

    /// A state at `position` with every trap untriggered.
    pub fn state_at(&self, position: Position) -> GameState {
        GameState::new(position, self.binding.trap_count())
    }

    /// The tile at `position` as seen from `state`.
    ///
    /// Trap slots resolve to `Solid` when the state has triggered them and to
    /// `Air` otherwise. The goal cell reads as `Goal`. Every other cell reads
    /// as stored in the map. Returns `None` outside the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragon_env::{Action, GameEnv, Position, Tile};
    ///
    /// let env: GameEnv = "2,4\n0,0\n0,0\n0,0\n0,0\nA:T\nPA T\nXXXG\n".parse().unwrap();
    /// let trap = Position::new(0, 3);
    ///
    /// let before = env.state_at(Position::new(0, 1));
    /// assert_eq!(env.effective(&before, trap), Some(Tile::Air));
    ///
    /// let (_, after) = env.perform(&before, Action::Activate);
    /// assert_eq!(env.effective(&after, trap), Some(Tile::Solid));
    /// assert_eq!(env.effective(&before, trap), Some(Tile::Air));
    /// ```
    pub fn effective(&self, state: &GameState, position: Position) -> Option<Tile> {
        let stored = self.tile_map.get(position)?;
        if let Some(id) = self.binding.trap_at(position) {
            return Some(if state.is_trap_open(id) {
                Tile::Solid
            } else {
                Tile::Air
            });
        }
        if position == self.tile_map.goal() {
            return Some(Tile::Goal);
        }
        Some(stored)
    }

    /// Applies `action` to `state`.
    ///
    /// Returns `(true, next)` when the action is legal and `(false, state)`
    /// with an unchanged copy of the input otherwise. Neither the environment
    /// nor `state` is modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragon_env::{Action, GameEnv};
    ///
    /// // A ladder with air above it, on top of a floor.
    /// let env: GameEnv = "3,2\n0,0\n0,0\n0,0\n0,0\nA:T\n G\nP=\nXX\n".parse().unwrap();
    /// let start = env.initial_state();
    ///
    /// // The start tile is air, not a ladder.
    /// assert!(!env.perform(&start, Action::Climb).0);
    ///
    /// let (legal, on_ladder) = env.perform(&start, Action::WalkRight);
    /// assert!(legal);
    /// let (legal, top) = env.perform(&on_ladder, Action::Climb);
    /// assert!(legal);
    /// assert!(env.is_solved(&top));
    /// ```
    pub fn perform(&self, state: &GameState, action: Action) -> (bool, GameState) {
        match self.step(state, action) {
            Ok(next) => (true, next),
            Err(reason) => {
                log::trace!("{} from {} blocked: {:?}", action, state, reason);
                (false, state.clone())
            }
        }
    }

    /// Applies `action` to `state`, reporting why it was rejected if it was.
    pub fn step(
        &self,
        state: &GameState,
        action: Action,
    ) -> std::result::Result<GameState, Blocked> {
        let here = state.position();
        let candidate = match action {
            Action::WalkLeft => {
                self.require_footing(state)?;
                here.left().map(|target| state.moved_to(target))
            }
            Action::WalkRight => {
                self.require_footing(state)?;
                here.right().map(|target| state.moved_to(target))
            }
            Action::Climb => {
                if self.tile_map.get(here) != Some(Tile::Ladder) {
                    return Err(Blocked::NotOnLadder);
                }
                here.up().map(|target| state.moved_to(target))
            }
            Action::Drop => here.down().map(|target| state.moved_to(target)),
            Action::Activate => match self.binding.lever_target(here) {
                Some(id) => Some(
                    state
                        .with_trap_toggled(id)
                        .ok_or(Blocked::UnknownTrap(id))?,
                ),
                None => Some(state.clone()),
            },
        };

        let next = candidate.ok_or(Blocked::OutOfBounds)?;
        match self.effective(&next, next.position()) {
            None => Err(Blocked::OutOfBounds),
            Some(Tile::Solid) => Err(Blocked::Collision),
            Some(_) => Ok(next),
        }
    }

    /// Every legal `(action, next_state, cost)` from `state`, in
    /// [`Action::ALL`] order.
    pub fn successors(&self, state: &GameState) -> Vec<(Action, GameState, f64)> {
        Action::ALL
            .into_iter()
            .filter_map(|action| {
                self.step(state, action)
                    .ok()
                    .map(|next| (action, next, self.cost_of(action)))
            })
            .collect()
    }

    /// Whether the agent stands on the goal. Trap status plays no part.
    pub fn is_solved(&self, state: &GameState) -> bool {
        state.position() == self.tile_map.goal()
    }

    /// Path cost of `action`.
    pub fn cost_of(&self, action: Action) -> f64 {
        ACTION_COSTS.cost_of(action)
    }

    /// Replays `plan` from `state`, stopping at the first illegal action.
    ///
    /// Returns the final state and the accumulated cost on success, or the
    /// index of the rejected action and the reason.
    pub fn simulate(
        &self,
        state: &GameState,
        plan: &[Action],
    ) -> std::result::Result<(GameState, f64), (usize, Blocked)> {
        let mut current = state.clone();
        let mut cost = 0.0;
        for (index, &action) in plan.iter().enumerate() {
            current = self.step(&current, action).map_err(|reason| (index, reason))?;
            cost += self.cost_of(action);
        }
        Ok((current, cost))
    }

    // The row below the bottom of the grid counts as floor.
    fn require_footing(&self, state: &GameState) -> std::result::Result<(), Blocked> {
        let below = state.position().down().ok_or(Blocked::NoFooting)?;
        if below.row == self.tile_map.rows() && below.col < self.tile_map.cols() {
            return Ok(());
        }
        match self.effective(state, below) {
            Some(tile) if tile.is_ground() => Ok(()),
            _ => Err(Blocked::NoFooting),
        }
    }
}
