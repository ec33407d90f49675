use tracing::debug;

use crate::{
    error::{MazeError, Result},
    grid::{Grid, Pos},
    tile::{Dir, Tile},
};

/// The start tile, once its real shape has been worked out from the pipes
/// around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStart {
    pub pos: Pos,
    pub shape: Tile,
    pub neighbors: [Pos; 2],
}

/// The neighbors of the start that have a pipe opening back towards it
pub fn start_connections(grid: &Grid) -> Vec<(Dir, Pos)> {
    let start = grid.start();

    Dir::ALL
        .into_iter()
        .filter_map(|dir| {
            let n = grid.step(start, dir)?;
            grid.get(n)?.accepts(dir).then_some((dir, n))
        })
        .collect()
}

pub fn resolve_start(grid: &Grid) -> Result<ResolvedStart> {
    let found = start_connections(grid);

    let [(da, a), (db, b)] = found[..] else {
        return Err(MazeError::AmbiguousStart {
            connections: found.len(),
        });
    };

    // two distinct directions always make one of the six pipes
    let shape = Tile::from_connections(da, db).ok_or(MazeError::AmbiguousStart {
        connections: found.len(),
    })?;

    debug!(start = ?grid.start(), %shape, "resolved start tile");

    Ok(ResolvedStart {
        pos: grid.start(),
        shape,
        neighbors: [a, b],
    })
}

/// Looks up pipe connections on a grid, treating the start tile as the pipe
/// it was resolved to.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    grid: &'a Grid,
    start: ResolvedStart,
}

impl<'a> Resolver<'a> {
    pub fn new(grid: &'a Grid) -> Result<Self> {
        Ok(Resolver {
            grid,
            start: resolve_start(grid)?,
        })
    }

    pub fn start(&self) -> ResolvedStart {
        self.start
    }

    pub fn shape_at(&self, pos: Pos) -> Option<Tile> {
        match self.grid.get(pos)? {
            Tile::Start => Some(self.start.shape),
            tile => Some(tile),
        }
    }

    pub fn neighbors(&self, pos: Pos) -> Vec<Pos> {
        let Some(dirs) = self.shape_at(pos).and_then(Tile::connections) else {
            return vec![];
        };

        dirs.into_iter()
            .filter_map(|dir| {
                let n = self.grid.step(pos, dir)?;
                self.shape_at(n)?.accepts(dir).then_some(n)
            })
            .collect()
    }
}

pub fn neighbors(grid: &Grid, pos: Pos) -> Result<Vec<Pos>> {
    if pos == grid.start() {
        return Ok(resolve_start(grid)?.neighbors.to_vec());
    }

    Ok(Resolver::new(grid)?.neighbors(pos))
}
