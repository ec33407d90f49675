use std::{collections::VecDeque, fmt};

use tracing::{debug, trace};

use crate::{
    grid::{step_within, Pos},
    pipe_loop::LoopMap,
    tile::Dir,
};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Class {
    OnLoop,
    Inside,
    Outside,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Strategy {
    /// Count crossings of north-opening pipes along each row
    #[default]
    ParityScan,
    /// Blow every tile up to 3x3 and flood fill the gaps
    Magnify,
}

/// Every tile of the grid, classified relative to the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    cells: Vec<Vec<Class>>,
}

impl Enclosure {
    pub fn classify(map: &LoopMap, strategy: Strategy) -> Enclosure {
        let cells = match strategy {
            Strategy::ParityScan => parity_scan(map),
            Strategy::Magnify => Magnified::new(map).classify(map),
        };

        let enclosure = Enclosure { cells };
        debug!(
            ?strategy,
            inside = enclosure.count(Class::Inside),
            outside = enclosure.count(Class::Outside),
            on_loop = enclosure.count(Class::OnLoop),
            "classified tiles"
        );

        enclosure
    }

    pub fn get(&self, (row, col): Pos) -> Option<Class> {
        self.cells.get(row).and_then(|line| line.get(col)).copied()
    }

    pub fn count(&self, class: Class) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == class)
            .count()
    }

    pub fn inside(&self) -> usize {
        self.count(Class::Inside)
    }
}

impl fmt::Display for Enclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            for class in line {
                let c = match class {
                    Class::OnLoop => '*',
                    Class::Inside => 'I',
                    Class::Outside => 'O',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// A ray going east from a tile crosses the loop once for every `|`, and once
// for every `L--7` or `F--J` run, but not for `L--J` or `F--7`. Counting only
// the tiles that open north gets all of those right.
fn parity_scan(map: &LoopMap) -> Vec<Vec<Class>> {
    (0..map.height())
        .map(|row| {
            let mut inside = false;

            (0..map.width())
                .map(|col| {
                    let tile = map.get((row, col));
                    if tile.is_pipe() {
                        if tile.connects(Dir::North) {
                            inside = !inside;
                        }
                        Class::OnLoop
                    } else if inside {
                        Class::Inside
                    } else {
                        Class::Outside
                    }
                })
                .collect()
        })
        .collect()
}

const SCALE: usize = 3;

/// The loop drawn at three times the resolution, so that the gap between two
/// pipes that merely touch becomes an open lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magnified {
    solid: Vec<Vec<bool>>,
    h: usize,
    w: usize,
}

#[derive(Debug, Clone)]
pub struct Component {
    pub cells: Vec<Pos>,
    pub leaks: bool,
}

impl Magnified {
    pub fn new(map: &LoopMap) -> Magnified {
        let h = map.height() * SCALE;
        let w = map.width() * SCALE;
        let mut solid = vec![vec![false; w]; h];

        for row in 0..map.height() {
            for col in 0..map.width() {
                let Some(dirs) = map.get((row, col)).connections() else {
                    continue;
                };

                let center = center((row, col));
                solid[center.0][center.1] = true;
                for dir in dirs {
                    if let Some((r, c)) = step_within(center, dir, h, w) {
                        solid[r][c] = true;
                    }
                }
            }
        }

        Magnified { solid, h, w }
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn is_solid(&self, (row, col): Pos) -> bool {
        self.solid[row][col]
    }

    fn on_border(&self, (row, col): Pos) -> bool {
        row == 0 || col == 0 || row == self.h - 1 || col == self.w - 1
    }

    /// Groups all open cells into 4-connected components
    pub fn components(&self) -> (Vec<Component>, Vec<Vec<Option<usize>>>) {
        let mut labels = vec![vec![None; self.w]; self.h];
        let mut components = vec![];

        for row in 0..self.h {
            for col in 0..self.w {
                if self.solid[row][col] || labels[row][col].is_some() {
                    continue;
                }

                let label = components.len();
                let mut component = Component {
                    cells: vec![],
                    leaks: false,
                };

                labels[row][col] = Some(label);
                let mut todo = VecDeque::from_iter([(row, col)]);

                while let Some(p) = todo.pop_front() {
                    component.cells.push(p);
                    component.leaks |= self.on_border(p);

                    for dir in Dir::ALL {
                        let Some((r, c)) = step_within(p, dir, self.h, self.w) else {
                            continue;
                        };
                        if !self.solid[r][c] && labels[r][c].is_none() {
                            labels[r][c] = Some(label);
                            todo.push_back((r, c));
                        }
                    }
                }

                trace!(
                    label,
                    size = component.cells.len(),
                    leaks = component.leaks,
                    "found component"
                );
                components.push(component);
            }
        }

        (components, labels)
    }

    fn classify(&self, map: &LoopMap) -> Vec<Vec<Class>> {
        let (components, labels) = self.components();

        (0..map.height())
            .map(|row| {
                (0..map.width())
                    .map(|col| {
                        if map.is_loop((row, col)) {
                            return Class::OnLoop;
                        }

                        let (r, c) = center((row, col));
                        match labels[r][c] {
                            Some(label) if !components[label].leaks => Class::Inside,
                            _ => Class::Outside,
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

fn center((row, col): Pos) -> Pos {
    (row * SCALE + 1, col * SCALE + 1)
}

impl fmt::Display for Magnified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.solid {
            for &solid in line {
                write!(f, "{}", if solid { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
