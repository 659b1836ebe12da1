use crate::tile::{AIR_SYMBOL, GOAL_SYMBOL, PLAYER_SYMBOL};
use crate::{GameEnv, GameState, Position, Result, Tile};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Text renderings of an environment for terminals and debugging tools.
#[derive(Debug, Default)]
pub struct EnvVisualizer;

impl EnvVisualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self
    }

    /// Draw `state` with every cell three characters wide.
    ///
    /// Trap slots are drawn as they appear in `state`. The agent is drawn as
    /// `P` and the goal as `G`, each flanked by the tile beneath.
    pub fn render_state(&self, env: &GameEnv, state: &GameState) -> String {
        let map = env.tile_map();
        let mut out = String::with_capacity(map.rows() * (map.cols() * 3 + 1));
        for row in 0..map.rows() {
            for col in 0..map.cols() {
                let position = Position::new(row, col);
                let base = Self::cell_symbol(env, state, position);
                if position == state.position() {
                    let _ = write!(out, "{}{}{}", base, PLAYER_SYMBOL, base);
                } else if position == env.goal() {
                    let _ = write!(out, "{}{}{}", base, GOAL_SYMBOL, base);
                } else {
                    let _ = write!(out, "{}{}{}", base, base, base);
                }
            }
            out.push('\n');
        }
        out
    }

    /// Rebuild the grid rows of the world description, one character per
    /// cell, including start, goal, levers and trap icons.
    pub fn source_grid(&self, env: &GameEnv) -> Vec<String> {
        let map = env.tile_map();
        (0..map.rows())
            .map(|row| {
                (0..map.cols())
                    .map(|col| {
                        let position = Position::new(row, col);
                        if position == env.start() {
                            PLAYER_SYMBOL
                        } else if position == env.goal() {
                            GOAL_SYMBOL
                        } else if let Some(lever) = env.binding().lever_at(position) {
                            lever.icon
                        } else {
                            map.get(position).map_or(AIR_SYMBOL, Tile::symbol)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Grid of pair numbers: each lever and the trap it toggles share a
    /// number, counted from 1 in lever order. Unpaired cells are 0. When
    /// several levers share a trap, the trap shows the last lever's number.
    pub fn lever_trap_grid(&self, env: &GameEnv) -> Vec<Vec<u32>> {
        let map = env.tile_map();
        let mut grid = vec![vec![0u32; map.cols()]; map.rows()];
        for (pair, lever) in (1u32..).zip(env.binding().levers()) {
            grid[lever.position.row][lever.position.col] = pair;
            if let Some(trap) = env.binding().trap_position(lever.trap) {
                grid[trap.row][trap.col] = pair;
            }
        }
        grid
    }

    /// The source grid, the pairing grid and one line per lever.
    pub fn lever_trap_report(&self, env: &GameEnv) -> String {
        let mut out = String::from("Original Grid:\n");
        for row in self.source_grid(env) {
            out.push_str(&row);
            out.push('\n');
        }

        out.push_str("\nLever-Trap Mapping Grid:\n");
        out.push_str("(Numbers show lever-trap pairs, 0 = no relationship)\n");
        for row in self.lever_trap_grid(env) {
            let cells: Vec<String> = row.iter().map(|cell| format!("{:2}", cell)).collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }

        out.push_str("\nMapping Details:\n");
        for (pair, lever) in (1u32..).zip(env.binding().levers()) {
            if let Some(trap) = env.binding().trap_position(lever.trap) {
                let _ = writeln!(
                    out,
                    "ID {}: Lever '{}' at {} -> Trap at {}",
                    pair, lever.icon, lever.position, trap
                );
            }
        }
        out
    }

    /// Write the lever/trap report to `filename`.
    pub fn write_lever_trap_report(
        &self,
        env: &GameEnv,
        filename: impl AsRef<Path>,
    ) -> Result<()> {
        let mut file = File::create(filename)?;
        file.write_all(self.lever_trap_report(env).as_bytes())?;
        Ok(())
    }

    fn cell_symbol(env: &GameEnv, state: &GameState, position: Position) -> char {
        if let Some(lever) = env.binding().lever_at(position) {
            return lever.icon;
        }
        match env.effective(state, position) {
            Some(Tile::Goal) | None => AIR_SYMBOL,
            Some(tile) => tile.symbol(),
        }
    }
}
