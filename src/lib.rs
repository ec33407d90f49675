pub mod connectivity;
pub mod enclosure;
pub mod error;
pub mod grid;
pub mod pipe_loop;
pub mod tile;

pub use enclosure::{Class, Enclosure, Strategy};
pub use error::{MazeError, Result};
pub use grid::{Grid, Pos};
pub use pipe_loop::PipeLoop;
pub use tile::{Dir, Tile};

/// Steps along the loop from the start to the tile farthest away from it
pub fn solve_farthest(grid: &Grid) -> Result<usize> {
    Ok(PipeLoop::extract(grid)?.farthest())
}

/// Number of tiles enclosed by the loop
pub fn solve_enclosed(grid: &Grid) -> Result<usize> {
    solve_enclosed_with(grid, Strategy::default())
}

pub fn solve_enclosed_with(grid: &Grid, strategy: Strategy) -> Result<usize> {
    Ok(classify(grid, strategy)?.inside())
}

pub fn classify(grid: &Grid, strategy: Strategy) -> Result<Enclosure> {
    let pipe_loop = PipeLoop::extract(grid)?;
    Ok(classify_loop(&pipe_loop, grid, strategy))
}

/// Like [`classify`], for a loop that was already extracted from `grid`
pub fn classify_loop(pipe_loop: &PipeLoop, grid: &Grid, strategy: Strategy) -> Enclosure {
    Enclosure::classify(&pipe_loop.loop_map(grid), strategy)
}

#[test]
fn test() {
    let grid = Grid::parse(
        "
7-F7-
.FJ|7
SJLL7
|F--J
LJ.LJ
    ",
    )
    .unwrap();
    assert_eq!(solve_farthest(&grid), Ok(8));
    assert_eq!(solve_enclosed(&grid), Ok(1));

    let grid = Grid::parse(
        "
...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
    ",
    )
    .unwrap();
    assert_eq!(solve_farthest(&grid), Ok(23));
    assert_eq!(solve_enclosed(&grid), Ok(4));

    let pipe_loop = PipeLoop::extract(&grid).unwrap();
    for strategy in [Strategy::ParityScan, Strategy::Magnify] {
        let enclosure = classify_loop(&pipe_loop, &grid, strategy);
        assert_eq!(Ok(&enclosure), classify(&grid, strategy).as_ref());
        assert_eq!(enclosure.inside(), 4);
    }
}
