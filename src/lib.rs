//! A deterministic grid-world environment for graph-search agents.
//!
//! The crate holds the static world ([`TileMap`], [`LeverTrapBinding`]), the
//! per-node [`GameState`], and the rules in [`GameEnv`] that decide which
//! [`Action`]s are legal and where they lead. Search algorithms live outside
//! this crate and drive it through [`GameEnv::initial_state`],
//! [`GameEnv::perform`], [`GameEnv::is_solved`] and [`GameEnv::cost_of`].

mod action;
mod binding;
mod env;
mod error;
mod loader;
mod state;
mod tile;
mod tile_map;
mod visualizer;

pub use action::{format_plan, parse_plan, Action, ActionCostTable, ACTION_COSTS};
pub use binding::{Lever, LeverTrapBinding};
pub use env::{Blocked, GameEnv};
pub use error::{EnvError, Result};
pub use loader::{TargetRange, Targets};
pub use state::GameState;
pub use tile::{Position, Tile, TrapId, TrapKind};
pub use tile_map::TileMap;
pub use visualizer::EnvVisualizer;
