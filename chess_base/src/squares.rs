use crate::types::Coord;
use std::fmt;

/// Set of squares
///
/// Squares are stored as bits of a single `u64`, indexed by [`Coord::index()`]. Iteration goes in
/// the same order as [`Coord::iter()`], i.e. row by row starting from a8.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Returns the set with `coord` added
    #[inline]
    pub const fn with(self, coord: Coord) -> SquareSet {
        SquareSet(self.0 | (1_u64 << coord.index()))
    }

    #[inline]
    pub fn insert(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    #[inline]
    pub const fn contains(&self, coord: Coord) -> bool {
        (self.0 >> coord.index()) & 1 != 0
    }

    /// Returns the number of squares in the set
    #[inline]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> Iter {
        Iter(self.0)
    }
}

impl FromIterator<Coord> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> SquareSet {
        iter.into_iter().fold(SquareSet::EMPTY, SquareSet::with)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Coord::from_index(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for SquareSet {
    type Item = Coord;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_set() {
        let a4 = Coord::from_parts(File::A, Rank::R4);
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let f3 = Coord::from_parts(File::F, Rank::R3);

        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(e2);
        set.insert(a4);
        set.insert(f3);
        set.insert(e2);
        assert_eq!(set.len(), 3);
        assert!(set.contains(a4));
        assert!(!set.contains(Coord::from_parts(File::H, Rank::R8)));

        // a4 is on row 4, f3 on row 5, e2 on row 6
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![a4, f3, e2]);
        assert_eq!(set.iter().len(), 3);
        assert_eq!(set.into_iter().collect::<SquareSet>(), set);
        assert_eq!(format!("{:?}", set), "{Coord(a4), Coord(f3), Coord(e2)}");
    }

    #[test]
    fn test_corners() {
        let set: SquareSet = Coord::iter().collect();
        assert_eq!(set.len(), 64);
        assert_eq!(set.iter().next(), Some(Coord::from_parts(File::A, Rank::R8)));
        assert_eq!(set.iter().last(), Some(Coord::from_parts(File::H, Rank::R1)));
    }
}
