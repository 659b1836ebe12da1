//! Parsing of the line-oriented world description.
//!
//! ```text
//! # annotations start with '#'
//! 4,6           rows,cols
//! 10,12         cost target
//! 100,400       node-expansion target
//! 0.5,1.0       UCS time target
//! 0.5,1.0       A* time target
//! A:T, B:D      lever icon -> trap icon
//! XXXXXX        grid rows
//! ...
//! ```
//!
//! A lever names a trap *icon*. The icon resolves to the last trap of that
//! kind in row-major order; every trap still gets its own trap id.

use crate::tile::{
    AIR_SYMBOL, GOAL_SYMBOL, LADDER_SYMBOL, LEVER_SYMBOLS, PLAYER_SYMBOL, SOLID_SYMBOL,
};
use crate::{
    EnvError, GameEnv, Lever, LeverTrapBinding, Position, Result, Tile, TileMap, TrapId, TrapKind,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const HEADER_LINES: usize = 6;

/// A `min,max` pair from the header.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

/// Benchmark targets carried by a world description for external grading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Targets {
    pub cost: TargetRange,
    pub nodes: TargetRange,
    pub ucs_time: TargetRange,
    pub a_star_time: TargetRange,
}

impl GameEnv {
    /// Loads a world description from a file.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Io` if the file cannot be read and
    /// `EnvError::InvalidWorld` if its contents are malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        log::debug!("loading world from {}", path.display());
        text.parse()
    }
}

impl FromStr for GameEnv {
    type Err = EnvError;

    fn from_str(text: &str) -> Result<Self> {
        parse_world(text)
    }
}

fn parse_world(text: &str) -> Result<GameEnv> {
    let mut header: Vec<(usize, &str)> = Vec::with_capacity(HEADER_LINES);
    let mut rows: Vec<(usize, &str)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = raw.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        if header.len() < HEADER_LINES {
            if !trimmed.is_empty() {
                header.push((line_no, trimmed));
            }
        } else {
            rows.push((line_no, raw));
        }
    }

    if header.len() < HEADER_LINES {
        return Err(EnvError::InvalidWorld(format!(
            "expected {} header lines, found {}",
            HEADER_LINES,
            header.len()
        )));
    }

    let (n_rows, n_cols) = parse_dimensions(header[0])?;
    let targets = Targets {
        cost: parse_range(header[1], "cost target")?,
        nodes: parse_range(header[2], "nodes target")?,
        ucs_time: parse_range(header[3], "UCS time target")?,
        a_star_time: parse_range(header[4], "A* time target")?,
    };
    let lever_icons = parse_lever_map(header[5])?;

    // Blank lines are padding unless they are exactly one row of air.
    let rows: Vec<(usize, &str)> = rows
        .into_iter()
        .filter(|(_, row)| !row.trim().is_empty() || row.chars().count() == n_cols)
        .collect();
    if rows.len() != n_rows {
        return Err(EnvError::InvalidWorld(format!(
            "expected {} map rows, found {}",
            n_rows,
            rows.len()
        )));
    }

    let mut grid = Vec::with_capacity(n_rows);
    let mut traps: Vec<(Position, TrapKind)> = Vec::new();
    let mut last_trap_of_kind: HashMap<TrapKind, TrapId> = HashMap::new();
    let mut lever_cells: Vec<(Position, char)> = Vec::new();
    let mut start = None;
    let mut goal = None;

    for (r, (line_no, raw)) in rows.iter().enumerate() {
        // Leading spaces are air; trailing spaces past the last column are not.
        let row = if raw.chars().count() == n_cols {
            *raw
        } else {
            raw.trim_end()
        };
        let width = row.chars().count();
        if width != n_cols {
            return Err(EnvError::InvalidWorld(format!(
                "incorrect map row length {} (expected {}) on line {}",
                width, n_cols, line_no
            )));
        }

        let mut tiles = Vec::with_capacity(n_cols);
        for (c, symbol) in row.chars().enumerate() {
            let position = Position::new(r, c);
            let tile = match symbol {
                SOLID_SYMBOL => Tile::Solid,
                LADDER_SYMBOL => Tile::Ladder,
                AIR_SYMBOL => Tile::Air,
                PLAYER_SYMBOL => {
                    if start.replace(position).is_some() {
                        return Err(EnvError::InvalidWorld(
                            "more than one initial player position".to_string(),
                        ));
                    }
                    Tile::Air
                }
                GOAL_SYMBOL => {
                    if goal.replace(position).is_some() {
                        return Err(EnvError::InvalidWorld(
                            "more than one exit position".to_string(),
                        ));
                    }
                    Tile::Air
                }
                s if LEVER_SYMBOLS.contains(&s) => {
                    lever_cells.push((position, s));
                    Tile::Air
                }
                s => match TrapKind::from_symbol(s) {
                    Some(kind) => {
                        last_trap_of_kind.insert(kind, TrapId(traps.len()));
                        traps.push((position, kind));
                        Tile::TrapSlot(kind)
                    }
                    None => {
                        return Err(EnvError::InvalidWorld(format!(
                            "unknown tile symbol '{}' on line {}",
                            s, line_no
                        )))
                    }
                },
            };
            tiles.push(tile);
        }
        grid.push(tiles);
    }

    let start = start
        .ok_or_else(|| EnvError::InvalidWorld("no player initial position".to_string()))?;
    let goal = goal.ok_or_else(|| EnvError::InvalidWorld("no exit position".to_string()))?;

    let mut levers = Vec::with_capacity(lever_cells.len());
    for (position, icon) in lever_cells {
        let kind = lever_icons.get(&icon).copied().ok_or_else(|| {
            EnvError::InvalidWorld(format!(
                "lever '{}' at {} has no entry in the lever map",
                icon, position
            ))
        })?;
        let trap = last_trap_of_kind.get(&kind).copied().ok_or_else(|| {
            EnvError::InvalidWorld(format!(
                "lever '{}' maps to '{}' but the map has no such trap",
                icon,
                kind.symbol()
            ))
        })?;
        levers.push(Lever {
            position,
            icon,
            trap,
        });
    }

    let tile_map = TileMap::new(grid, goal)?;
    let binding = LeverTrapBinding::new(traps, levers)?;
    log::debug!(
        "world {}x{}: start {}, goal {}, {} traps, {} levers",
        n_rows,
        n_cols,
        start,
        goal,
        binding.trap_count(),
        binding.levers().len()
    );
    Ok(GameEnv::from_parts(tile_map, binding, start)?.with_targets(targets))
}

fn parse_pair<T: FromStr>((line_no, line): (usize, &str), what: &str) -> Result<(T, T)> {
    let invalid = || EnvError::InvalidWorld(format!("{} (line {})", what, line_no));
    let mut parts = line.split(',').map(str::trim);
    let first = parts.next().ok_or_else(invalid)?;
    let second = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    let first = first.parse().map_err(|_| invalid())?;
    let second = second.parse().map_err(|_| invalid())?;
    Ok((first, second))
}

fn parse_dimensions(line: (usize, &str)) -> Result<(usize, usize)> {
    let (rows, cols) = parse_pair::<usize>(line, "n_rows and n_cols")?;
    if rows == 0 || cols == 0 {
        return Err(EnvError::InvalidWorld(format!(
            "grid dimensions must be positive (line {})",
            line.0
        )));
    }
    Ok((rows, cols))
}

fn parse_range(line: (usize, &str), what: &str) -> Result<TargetRange> {
    let (min, max) = parse_pair::<f64>(line, what)?;
    Ok(TargetRange { min, max })
}

fn parse_lever_map((line_no, line): (usize, &str)) -> Result<HashMap<char, TrapKind>> {
    let invalid = |entry: &str| {
        EnvError::InvalidWorld(format!(
            "lever to trap map entry '{}' (line {})",
            entry, line_no
        ))
    };

    let mut map = HashMap::new();
    for entry in line.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (lever, trap) = entry.split_once(':').ok_or_else(|| invalid(entry))?;
        let lever = single_char(lever.trim()).ok_or_else(|| invalid(entry))?;
        let trap = single_char(trap.trim()).ok_or_else(|| invalid(entry))?;
        if !LEVER_SYMBOLS.contains(&lever) {
            return Err(invalid(entry));
        }
        let kind = TrapKind::from_symbol(trap).ok_or_else(|| invalid(entry))?;
        map.insert(lever, kind);
    }
    Ok(map)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "# test world\n5,7\n10,12\n50,100\n0.5,1\n0.5,1\nA:T, B:D\n";

    fn world(grid: &str) -> Result<GameEnv> {
        format!("{}{}", HEADER, grid).parse()
    }

    #[test]
    fn test_parses_header_and_grid() {
        let env = world(
            "XXXXXXX\n\
             XP A GX\n\
             XXTX=XX\n\
             X  D=BX\n\
             XXXXXXX\n",
        )
        .unwrap();

        assert_eq!(env.tile_map().rows(), 5);
        assert_eq!(env.tile_map().cols(), 7);
        assert_eq!(env.start(), Position::new(1, 1));
        assert_eq!(env.goal(), Position::new(1, 5));
        assert_eq!(env.targets().cost, TargetRange { min: 10.0, max: 12.0 });
        assert_eq!(env.targets().nodes.max, 100.0);
        assert_eq!(env.targets().ucs_time.min, 0.5);

        let binding = env.binding();
        assert_eq!(binding.trap_count(), 2);
        assert_eq!(binding.trap_position(TrapId(0)), Some(Position::new(2, 2)));
        assert_eq!(binding.trap_kind(TrapId(1)), Some(TrapKind::Drawbridge));
        assert_eq!(binding.lever_target(Position::new(1, 3)), Some(TrapId(0)));
        assert_eq!(binding.lever_target(Position::new(3, 5)), Some(TrapId(1)));

        assert_eq!(env.tile_map().get(Position::new(1, 1)), Some(Tile::Air));
        assert_eq!(env.tile_map().get(Position::new(1, 3)), Some(Tile::Air));
        assert_eq!(env.tile_map().get(Position::new(1, 5)), Some(Tile::Air));
        assert_eq!(env.tile_map().get(Position::new(2, 4)), Some(Tile::Ladder));
    }

    #[test]
    fn test_lever_binds_last_trap_of_kind() {
        let env = world(
            "XXXXXXX\n\
             XPA  GX\n\
             XTXTXTX\n\
             X     X\n\
             XXXXXXX\n",
        )
        .unwrap();
        let binding = env.binding();
        assert_eq!(binding.trap_count(), 3);
        assert_eq!(binding.lever_target(Position::new(1, 2)), Some(TrapId(2)));
        assert_eq!(binding.trap_position(TrapId(2)), Some(Position::new(2, 5)));
    }

    #[test]
    fn test_all_air_row_is_kept() {
        let env = world("XXXXXXX\nXP   GX\n       \nX     X\nXXXXXXX\n").unwrap();
        assert_eq!(env.tile_map().row(2).filter(|t| *t == Tile::Air).count(), 7);
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let env: GameEnv = "2,3\n0,0\n0,0\n0,0\n0,0\nA:T\nP G  \nXXX \t\n"
            .parse()
            .unwrap();
        assert_eq!(env.tile_map().cols(), 3);
        assert_eq!(env.goal(), Position::new(0, 2));

        let err = world("XXXXXXX   \n XP   GX\nX     X\nX     X\nXXXXXXX\n").unwrap_err();
        assert!(matches!(err, EnvError::InvalidWorld(m) if m.contains("row length")));

        let env = world("XXXXXXX   \n P   GX\nX     X\nX     X\nXXXXXXX\n").unwrap();
        assert_eq!(env.start(), Position::new(1, 1));
        assert_eq!(env.tile_map().get(Position::new(1, 0)), Some(Tile::Air));
    }

    #[test]
    fn test_missing_start() {
        let result = world("XXXXXXX\nX    GX\nX     X\nX     X\nXXXXXXX\n");
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("initial")));
    }

    #[test]
    fn test_duplicate_goal() {
        let result = world("XXXXXXX\nXP G GX\nX     X\nX     X\nXXXXXXX\n");
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("exit")));
    }

    #[test]
    fn test_short_row() {
        let result = world("XXXXXXX\nXP  GX\nX     X\nX     X\nXXXXXXX\n");
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("row length")));
    }

    #[test]
    fn test_wrong_row_count() {
        let result = world("XXXXXXX\nXP   GX\nXXXXXXX\n");
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("map rows")));
    }

    #[test]
    fn test_lever_without_matching_trap() {
        let result = world("XXXXXXX\nXPB  GX\nXXTXXXX\nX     X\nXXXXXXX\n");
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("no such trap")));
    }

    #[test]
    fn test_lever_missing_from_map() {
        let result = world("XXXXXXX\nXPC  GX\nXXTXXXX\nX     X\nXXXXXXX\n");
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("lever map")));
    }

    #[test]
    fn test_unknown_symbol() {
        let result = world("XXXXXXX\nXP ? GX\nX     X\nX     X\nXXXXXXX\n");
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("'?'")));
    }

    #[test]
    fn test_bad_header() {
        let result: Result<GameEnv> = "5;7\n1,1\n1,1\n1,1\n1,1\nA:T\n".parse();
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("n_rows")));

        let result: Result<GameEnv> = "1,3\n1,x\n1,1\n1,1\n1,1\nA:T\nP G\n".parse();
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("cost")));

        let result: Result<GameEnv> = "1,3\n1,1\n1,1\n1,1\n1,1\nA-T\nP G\n".parse();
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("lever")));

        let result: Result<GameEnv> = "1,3\n1,1\n".parse();
        assert!(matches!(result, Err(EnvError::InvalidWorld(m)) if m.contains("header")));
    }

    #[test]
    fn test_lever_map_rejects_non_trap_icon() {
        let result = parse_lever_map((6, "A:T, B:X"));
        assert!(result.is_err());
        let map = parse_lever_map((6, " A:T ,B : D,")).unwrap();
        assert_eq!(map.get(&'A'), Some(&TrapKind::Trapdoor));
        assert_eq!(map.get(&'B'), Some(&TrapKind::Drawbridge));
    }

    #[test]
    fn test_windows_line_endings() {
        let text = "1,3\r\n1,1\r\n1,1\r\n1,1\r\n1,1\r\nA:T\r\nP G\r\n";
        let env: GameEnv = text.parse().unwrap();
        assert_eq!(env.goal(), Position::new(0, 2));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameEnv::from_file("/definitely/not/here/world.txt");
        assert!(matches!(result, Err(EnvError::Io(_))));
    }
}
