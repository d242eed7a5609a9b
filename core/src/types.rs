/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Direction of a straight run across the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Whether both coordinates lie on one line along this axis.
    pub const fn aligned(self, a: Coord2, b: Coord2) -> bool {
        match self {
            Self::Horizontal => a.1 == b.1,
            Self::Vertical => a.0 == b.0,
        }
    }

    const fn along(self, coords: Coord2) -> Coord {
        match self {
            Self::Horizontal => coords.0,
            Self::Vertical => coords.1,
        }
    }

    const fn with(self, coords: Coord2, value: Coord) -> Coord2 {
        match self {
            Self::Horizontal => (value, coords.1),
            Self::Vertical => (coords.0, value),
        }
    }
}

/// Walks the cells strictly between `from` and `to` followed by `to` itself,
/// on a single line along `axis`.
#[derive(Debug)]
pub struct LineIter {
    axis: Axis,
    origin: Coord2,
    next: Coord,
    last: Coord,
    forward: bool,
    done: bool,
}

impl LineIter {
    pub fn new(axis: Axis, from: Coord2, to: Coord2) -> Self {
        debug_assert!(axis.aligned(from, to));
        let start = axis.along(from);
        let last = axis.along(to);
        let forward = start < last;
        let next = if forward {
            start.saturating_add(1)
        } else {
            start.saturating_sub(1)
        };
        Self {
            axis,
            origin: from,
            next,
            last,
            forward,
            done: start == last,
        }
    }
}

impl Iterator for LineIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.next;
        if current == self.last {
            self.done = true;
        } else if self.forward {
            self.next += 1;
        } else {
            self.next -= 1;
        }

        Some(self.axis.with(self.origin, current))
    }
}

/// Scans outward from `center` along `axis`: first towards zero, then towards
/// `bound`, yielding every cell up to (but excluding) the first one rejected
/// by `passable` in each direction.
pub fn scan_outward(
    axis: Axis,
    center: Coord2,
    bound: Coord,
    mut passable: impl FnMut(Coord2) -> bool,
) -> impl Iterator<Item = Coord2> {
    let origin = axis.along(center);
    let backward = (0..origin)
        .rev()
        .map(move |value| axis.with(center, value))
        .take_while(|&pos| passable(pos));
    let backward: alloc::vec::Vec<Coord2> = backward.collect();

    let forward = (origin.saturating_add(1)..bound)
        .map(move |value| axis.with(center, value))
        .take_while(move |&pos| passable(pos));

    backward.into_iter().chain(forward)
}
