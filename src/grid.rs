use std::fmt;

use crate::{
    error::{MazeError, Result},
    tile::{Dir, Tile},
};

/// (row, col)
pub type Pos = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    h: usize,
    w: usize,
    start: Pos,
}

impl Grid {
    /// Blank lines around the sketch are skipped, anything else that is not
    /// a tile (including stray spaces inside a row) is an error.
    pub fn parse(input: &str) -> Result<Grid> {
        let lines = input.lines().collect::<Vec<_>>();
        let blank = |line: &&str| line.trim().is_empty();

        let first = lines.iter().position(|l| !blank(l)).unwrap_or(lines.len());
        let last = lines.iter().rposition(|l| !blank(l)).map_or(first, |i| i + 1);

        Grid::from_lines(lines[first..last].iter().copied())
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Grid> {
        let tiles = lines
            .into_iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        Tile::from_char(ch).ok_or(MazeError::InvalidTile { ch, row, col })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Grid::from_tiles(tiles)
    }

    /// Rows shorter than the longest one are padded with ground, since
    /// trailing ground carries no pipe.
    pub fn from_tiles(mut tiles: Vec<Vec<Tile>>) -> Result<Grid> {
        let h = tiles.len();
        let w = tiles.iter().map(Vec::len).max().unwrap_or(0);
        if h == 0 || w == 0 {
            return Err(MazeError::EmptyGrid);
        }

        for line in &mut tiles {
            line.resize(w, Tile::Ground);
        }

        let (start, second) = {
            let mut starts = tiles.iter().enumerate().flat_map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .filter(|(_, t)| **t == Tile::Start)
                    .map(move |(col, _)| (row, col))
            });
            (starts.next(), starts.next())
        };

        let start = start.ok_or(MazeError::MissingStart)?;
        if let Some(second) = second {
            return Err(MazeError::MultipleStarts {
                first: start,
                second,
            });
        }

        Ok(Grid { tiles, h, w, start })
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn get(&self, (row, col): Pos) -> Option<Tile> {
        self.tiles.get(row).and_then(|line| line.get(col)).copied()
    }

    /// The position one step away in `dir`, if it is still on the grid
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        step_within(pos, dir, self.h, self.w)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }
}

pub(crate) fn step_within((row, col): Pos, dir: Dir, h: usize, w: usize) -> Option<Pos> {
    let (dr, dc) = dir.delta();
    let row = row.checked_add_signed(dr)?;
    let col = col.checked_add_signed(dc)?;
    (row < h && col < w).then_some((row, col))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.tiles {
            for tile in line {
                write!(f, "{tile}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
