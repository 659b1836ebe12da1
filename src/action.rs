//! # Actions available to the agent
//!
//! The agent has a closed vocabulary of five actions. Each one carries a fixed
//! cost, looked up through the static [`ACTION_COSTS`] table, and a short
//! symbol used by solution files.
//!
//! ## Basic Usage
//!
//! ```
//! use dragon_env::{format_plan, parse_plan, Action};
//!
//! assert_eq!(Action::Climb.cost(), 2.0);
//! assert_eq!(Action::WalkLeft.symbol(), "wl");
//!
//! let plan = parse_plan("wr, wr, c, a").unwrap();
//! assert_eq!(plan[2], Action::Climb);
//! assert_eq!(format_plan(&plan), "wr, wr, c, a");
//! ```

use crate::{EnvError, Result};
use std::fmt;
use std::str::FromStr;

/// An action the agent may attempt from any state.
///
/// Whether the action is legal depends on the state it is performed from;
/// see [`GameEnv::perform`](crate::GameEnv::perform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move one cell left. Requires ground below the agent.
    WalkLeft,
    /// Move one cell right. Requires ground below the agent.
    WalkRight,
    /// Move one cell up. Requires the agent to stand on a ladder.
    Climb,
    /// Move one cell down.
    Drop,
    /// Pull the lever under the agent, if there is one.
    Activate,
}

impl Action {
    /// Every action, in a fixed order.
    pub const ALL: [Action; 5] = [
        Action::WalkLeft,
        Action::WalkRight,
        Action::Climb,
        Action::Drop,
        Action::Activate,
    ];

    /// Path cost of performing this action.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragon_env::Action;
    ///
    /// assert_eq!(Action::Drop.cost(), 0.5);
    /// assert_eq!(Action::WalkRight.cost(), 1.0);
    /// ```
    pub fn cost(self) -> f64 {
        ACTION_COSTS.cost_of(self)
    }

    /// Symbol written for this action in solution files.
    pub fn symbol(self) -> &'static str {
        match self {
            Action::WalkLeft => "wl",
            Action::WalkRight => "wr",
            Action::Climb => "c",
            Action::Drop => "d",
            Action::Activate => "a",
        }
    }

    fn slot(self) -> usize {
        match self {
            Action::WalkLeft => 0,
            Action::WalkRight => 1,
            Action::Climb => 2,
            Action::Drop => 3,
            Action::Activate => 4,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Action {
    type Err = EnvError;

    /// Decodes a solution-file symbol.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::InvalidAction` for anything outside `wl`, `wr`,
    /// `c`, `d` and `a`.
    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.symbol() == s)
            .ok_or_else(|| EnvError::InvalidAction(s.to_string()))
    }
}

/// Read-only mapping from each action to its cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionCostTable {
    costs: [f64; 5],
}

/// The cost table used by the environment.
pub const ACTION_COSTS: ActionCostTable = ActionCostTable {
    costs: [1.0, 1.0, 2.0, 0.5, 1.0],
};

impl ActionCostTable {
    /// Cost of a single action.
    ///
    /// ```
    /// use dragon_env::{Action, ACTION_COSTS};
    ///
    /// assert_eq!(ACTION_COSTS.cost_of(Action::Climb), 2.0);
    /// ```
    pub fn cost_of(&self, action: Action) -> f64 {
        self.costs[action.slot()]
    }

    /// Iterates over `(action, cost)` pairs in [`Action::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        Action::ALL.into_iter().map(move |action| (action, self.cost_of(action)))
    }

    /// Sums the cost of a sequence of actions.
    pub fn plan_cost(&self, plan: &[Action]) -> f64 {
        plan.iter().map(|&action| self.cost_of(action)).sum()
    }
}

/// Joins a plan into a solution line, e.g. `wr, c, a`.
pub fn format_plan(plan: &[Action]) -> String {
    plan.iter()
        .map(|action| action.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a solution line. Symbols may be separated by commas, whitespace or
/// both; empty entries are skipped.
///
/// # Errors
///
/// Returns `EnvError::InvalidAction` on the first unknown symbol.
pub fn parse_plan(line: &str) -> Result<Vec<Action>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
