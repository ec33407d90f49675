use std::fmt;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

use Dir::*;

impl Dir {
    pub const ALL: [Dir; 4] = [North, East, South, West];

    pub fn opposite(self) -> Dir {
        match self {
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    /// (drow, dcol)
    pub fn delta(self) -> (isize, isize) {
        match self {
            North => (-1, 0),
            East => (0, 1),
            South => (1, 0),
            West => (0, -1),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Tile {
    Vertical,
    Horizontal,
    BendNE,
    BendNW,
    BendSW,
    BendSE,
    Ground,
    Start,
}

impl Tile {
    pub const PIPES: [Tile; 6] = [
        Tile::Vertical,
        Tile::Horizontal,
        Tile::BendNE,
        Tile::BendNW,
        Tile::BendSW,
        Tile::BendSE,
    ];

    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '|' => Some(Tile::Vertical),
            '-' => Some(Tile::Horizontal),
            'L' => Some(Tile::BendNE),
            'J' => Some(Tile::BendNW),
            '7' => Some(Tile::BendSW),
            'F' => Some(Tile::BendSE),
            '.' => Some(Tile::Ground),
            'S' => Some(Tile::Start),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Vertical => '|',
            Tile::Horizontal => '-',
            Tile::BendNE => 'L',
            Tile::BendNW => 'J',
            Tile::BendSW => '7',
            Tile::BendSE => 'F',
            Tile::Ground => '.',
            Tile::Start => 'S',
        }
    }

    /// The two directions a pipe opens towards. The start's shape is not
    /// known from the tile alone, see [`crate::connectivity::resolve_start`].
    pub fn connections(self) -> Option<[Dir; 2]> {
        match self {
            Tile::Vertical => Some([North, South]),
            Tile::Horizontal => Some([East, West]),
            Tile::BendNE => Some([North, East]),
            Tile::BendNW => Some([North, West]),
            Tile::BendSW => Some([South, West]),
            Tile::BendSE => Some([South, East]),
            Tile::Ground | Tile::Start => None,
        }
    }

    pub fn from_connections(a: Dir, b: Dir) -> Option<Tile> {
        Tile::PIPES.into_iter().find(|pipe| {
            pipe.connections()
                .is_some_and(|[x, y]| (x, y) == (a, b) || (x, y) == (b, a))
        })
    }

    pub fn is_pipe(self) -> bool {
        self.connections().is_some()
    }

    pub fn connects(self, dir: Dir) -> bool {
        self.connections().is_some_and(|dirs| dirs.contains(&dir))
    }

    /// Whether this tile takes a connection coming in while travelling `dir`,
    /// i.e. whether it opens back towards where we came from.
    pub fn accepts(self, dir: Dir) -> bool {
        self.connects(dir.opposite())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[test]
fn test_symbols() {
    for c in "|-LJ7F.S".chars() {
        assert_eq!(Tile::from_char(c).map(Tile::to_char), Some(c));
    }

    for c in ['s', 'l', ' ', '\t', 'X', '+', '0'] {
        assert_eq!(Tile::from_char(c), None);
    }
}

#[test]
fn test_accepts() {
    // travelling east into a `-` or `J` or `7` works, into an `L` doesn't
    assert!(Tile::Horizontal.accepts(East));
    assert!(Tile::BendNW.accepts(East));
    assert!(Tile::BendSW.accepts(East));
    assert!(!Tile::BendNE.accepts(East));
    assert!(!Tile::Vertical.accepts(East));

    // travelling north lands on the bottom side
    assert!(Tile::Vertical.accepts(North));
    assert!(Tile::BendSE.accepts(North));
    assert!(!Tile::BendNE.accepts(North));

    assert!(!Tile::Ground.accepts(North));
    assert!(!Tile::Start.accepts(West));
}

#[test]
fn test_from_connections() {
    for pipe in Tile::PIPES {
        let [a, b] = pipe.connections().unwrap();
        assert_eq!(Tile::from_connections(a, b), Some(pipe));
        assert_eq!(Tile::from_connections(b, a), Some(pipe));
    }

    assert_eq!(Tile::from_connections(North, North), None);
}
