use std::{collections::VecDeque, fmt, iter::once};

use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    connectivity::{ResolvedStart, Resolver},
    error::{MazeError, Result},
    grid::{Grid, Pos},
    tile::Tile,
};

#[derive(Debug, Clone)]
pub struct PipeLoop {
    start: ResolvedStart,
    distances: FxHashMap<Pos, usize>,
    cycle: Vec<Pos>,
    h: usize,
    w: usize,
}

fn no_loop(reason: String) -> MazeError {
    MazeError::NoLoopFound { reason }
}

impl PipeLoop {
    pub fn extract(grid: &Grid) -> Result<PipeLoop> {
        let resolver = Resolver::new(grid)?;
        let start = resolver.start();

        // walk both ways around at once, first arrival wins
        let mut distances = FxHashMap::from_iter([(start.pos, 0)]);
        let mut todo = VecDeque::from_iter([start.pos]);

        while let Some(p) = todo.pop_front() {
            let d = distances[&p];

            let ns = resolver.neighbors(p);
            if ns.len() != 2 {
                return Err(no_loop(format!(
                    "pipe at {p:?} connects to {} neighbors instead of 2",
                    ns.len()
                )));
            }

            for n in ns {
                // a known neighbor is either where we came from, or the other
                // front, which is never more than one step apart from this one
                if let Some(&known) = distances.get(&n) {
                    if known + 1 < d || known > d + 1 {
                        return Err(no_loop(format!(
                            "{n:?} at distance {known} is next to {p:?} at distance {d}"
                        )));
                    }
                    continue;
                }

                distances.insert(n, d + 1);
                todo.push_back(n);
            }
        }

        if distances.len() < 4 {
            return Err(no_loop(format!(
                "loop of {} tiles is too short",
                distances.len()
            )));
        }

        let cycle = walk_cycle(&resolver, distances.len())?;

        debug!(
            len = distances.len(),
            farthest = ?distances.values().max(),
            "extracted loop"
        );

        Ok(PipeLoop {
            start,
            distances,
            cycle,
            h: grid.height(),
            w: grid.width(),
        })
    }

    pub fn start(&self) -> ResolvedStart {
        self.start
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.distances.contains_key(&pos)
    }

    pub fn distance(&self, pos: Pos) -> Option<usize> {
        self.distances.get(&pos).copied()
    }

    pub fn distances(&self) -> &FxHashMap<Pos, usize> {
        &self.distances
    }

    pub fn farthest(&self) -> usize {
        self.distances.values().copied().max().unwrap_or(0)
    }

    /// The loop's tiles in walking order, starting at the start tile
    pub fn cycle(&self) -> &[Pos] {
        &self.cycle
    }

    /// On screen, i.e. with rows growing downwards
    pub fn is_clockwise(&self) -> bool {
        self.double_signed_area() > 0
    }

    fn double_signed_area(&self) -> isize {
        let cycle = &self.cycle;
        cycle
            .iter()
            .zip(cycle.iter().skip(1).chain(once(&cycle[0])))
            .map(|(&(ar, ac), &(br, bc))| {
                (ac as isize) * (br as isize) - (bc as isize) * (ar as isize)
            })
            .sum()
    }

    /// Number of enclosed tiles, by the shoelace formula and Pick's theorem
    /// on the polygon through the tile centers.
    pub fn interior_by_area(&self) -> usize {
        let area2 = self.double_signed_area().unsigned_abs();
        (area2 + 2 - self.len()) / 2
    }

    /// The grid with every tile that is not on the loop erased to ground, and
    /// the start replaced by its real shape
    pub fn loop_map(&self, grid: &Grid) -> LoopMap {
        let tiles = grid
            .rows()
            .enumerate()
            .map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .map(|(col, &tile)| match tile {
                        _ if !self.contains((row, col)) => Tile::Ground,
                        Tile::Start => self.start.shape,
                        tile => tile,
                    })
                    .collect()
            })
            .collect();

        LoopMap {
            tiles,
            h: self.h,
            w: self.w,
        }
    }

    /// Like the puzzle's drawings: last digit of each loop tile's distance
    pub fn render_distances(&self) -> String {
        (0..self.h)
            .map(|row| {
                (0..self.w)
                    .map(|col| match self.distance((row, col)) {
                        Some(d) => char::from_digit((d % 10) as u32, 10).unwrap_or('?'),
                        None => '.',
                    })
                    .chain(once('\n'))
                    .collect::<String>()
            })
            .collect()
    }
}

fn walk_cycle(resolver: &Resolver, len: usize) -> Result<Vec<Pos>> {
    let start = resolver.start();
    let mut cycle = vec![start.pos];
    let (mut prev, mut at) = (start.pos, start.neighbors[0]);

    while at != start.pos {
        if cycle.len() >= len {
            return Err(no_loop(format!("walk from {:?} does not close", start.pos)));
        }
        cycle.push(at);

        let next = resolver
            .neighbors(at)
            .into_iter()
            .find(|&n| n != prev)
            .ok_or_else(|| no_loop(format!("pipe at {at:?} turns back on itself")))?;
        (prev, at) = (at, next);
    }

    if cycle.len() != len {
        return Err(no_loop(format!(
            "walking the loop visits {} tiles, but {len} are connected",
            cycle.len()
        )));
    }

    Ok(cycle)
}

/// A grid holding only the loop's pipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopMap {
    tiles: Vec<Vec<Tile>>,
    h: usize,
    w: usize,
}

impl LoopMap {
    pub fn height(&self) -> usize {
        self.h
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, (row, col): Pos) -> Tile {
        self.tiles
            .get(row)
            .and_then(|line| line.get(col))
            .copied()
            .unwrap_or(Tile::Ground)
    }

    pub fn is_loop(&self, pos: Pos) -> bool {
        self.get(pos).is_pipe()
    }
}

impl fmt::Display for LoopMap {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(lines: &[&str]) -> Result<PipeLoop> {
        PipeLoop::extract(&Grid::from_lines(lines.iter().copied()).unwrap())
    }

    #[test]
    fn test_square() {
        let l = extract(&[".....", ".S-7.", ".|.|.", ".L-J.", "....."]).unwrap();
        assert_eq!(l.len(), 8);
        assert_eq!(l.farthest(), 4);
        assert_eq!(l.distance((3, 3)), Some(4));
        assert_eq!(l.distance((2, 2)), None);
        assert_eq!(
            l.render_distances(),
            ".....\n.012.\n.1.3.\n.234.\n.....\n"
        );
    }

    #[test]
    fn test_complex() {
        let l = extract(&["..F7.", ".FJ|.", "SJ.L7", "|F--J", "LJ..."]).unwrap();
        assert_eq!(l.len(), 16);
        assert_eq!(l.farthest(), 8);
        assert_eq!(
            l.render_distances(),
            "..45.\n.236.\n01.78\n14567\n23...\n"
        );
    }

    #[test]
    fn test_clutter() {
        let l = extract(&["7-F7-", ".FJ|7", "SJLL7", "|F--J", "LJ.LJ"]).unwrap();
        assert_eq!(l.farthest(), 8);
        assert!(!l.contains((0, 0)));
        assert!(!l.contains((2, 2)));
    }

    #[test]
    fn test_two_regular() {
        let grid = Grid::from_lines(["-L|F7", "7S-7|", "L|7||", "-L-J|", "L|-JF"]).unwrap();
        let l = PipeLoop::extract(&grid).unwrap();
        let resolver = Resolver::new(&grid).unwrap();

        for &p in l.distances().keys() {
            let ns = resolver.neighbors(p);
            assert_eq!(ns.len(), 2);
            assert!(ns.iter().all(|&n| l.contains(n)));
        }
    }

    #[test]
    fn test_fronts_meet() {
        for lines in [
            [".....", ".S-7.", ".|.|.", ".L-J.", "....."],
            ["..F7.", ".FJ|.", "SJ.L7", "|F--J", "LJ..."],
            ["F-S-7", "|...|", "|...|", "|...|", "L---J"],
        ] {
            let l = extract(&lines).unwrap();
            let cycle = l.cycle();

            // going round, distances change by exactly one step, except where
            // the two fronts meet
            let mut flat = 0;
            for (i, &p) in cycle.iter().enumerate() {
                let q = cycle[(i + 1) % cycle.len()];
                let (dp, dq) = (l.distance(p).unwrap(), l.distance(q).unwrap());
                match dp.abs_diff(dq) {
                    0 => flat += 1,
                    1 => {}
                    _ => panic!("{p:?} at {dp} next to {q:?} at {dq}"),
                }
            }
            assert_eq!(flat, l.len() % 2);
            assert_eq!(
                cycle
                    .iter()
                    .filter(|&&p| l.distance(p) == Some(l.farthest()))
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_cycle_order() {
        let l = extract(&[".....", ".S-7.", ".|.|.", ".L-J.", "....."]).unwrap();
        assert_eq!(
            l.cycle(),
            &[
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 3),
                (3, 3),
                (3, 2),
                (3, 1),
                (2, 1)
            ]
        );
        assert!(l.is_clockwise());
        assert_eq!(l.interior_by_area(), 1);

        // same loop, walked the other way round
        let l = extract(&[".....", ".F-7.", ".|.|.", ".L-S.", "....."]).unwrap();
        assert!(!l.is_clockwise());
        assert_eq!(l.interior_by_area(), 1);
    }

    #[test]
    fn test_loop_map() {
        let grid = Grid::from_lines(["-L|F7", "7S-7|", "L|7||", "-L-J|", "L|-JF"]).unwrap();
        let l = PipeLoop::extract(&grid).unwrap();
        assert_eq!(
            l.loop_map(&grid).to_string(),
            ".....\n.F-7.\n.|.|.\n.L-J.\n.....\n"
        );
    }

    #[test]
    fn test_no_loop() {
        // dead end
        assert!(matches!(
            extract(&["S-7", "|.|", "L-."]),
            Err(MazeError::NoLoopFound { .. })
        ));

        // runs off the edge
        assert!(matches!(
            extract(&["S--", "|..", "L--"]),
            Err(MazeError::NoLoopFound { .. })
        ));

        assert_eq!(
            extract(&["S--", "...", "..."]).unwrap_err(),
            MazeError::AmbiguousStart { connections: 1 }
        );
    }
}
