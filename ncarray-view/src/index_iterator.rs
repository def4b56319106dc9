use std::iter::FusedIterator;
use std::ops::Range;

use smallvec::{smallvec, SmallVec};

/// The index type used for multi-dimensional indices.
pub type DynIndex = SmallVec<[usize; 5]>;

/// Iterator over a range of N-dimensional indices in row-major order (the
/// last dimension varies fastest).
///
/// The number of dimensions may be zero, in which case the iterator will yield
/// a single empty index, since a rank-0 array holds one element.
#[derive(Clone, Debug)]
pub struct Indices {
    /// Start index along each dimension.
    start: DynIndex,

    /// End index (exclusive) along each dimension.
    end: DynIndex,

    next: Option<DynIndex>,

    /// Remaining iteration steps.
    steps: usize,
}

/// Return the number of steps for an index iterator over the range of indices
/// from `from` to `to`.
fn steps(from: &[usize], to: &[usize]) -> usize {
    from.iter()
        .zip(to.iter())
        .map(|(&from, &to)| to.saturating_sub(from))
        .product()
}

impl Indices {
    fn from_start_and_end(start: DynIndex, end: DynIndex) -> Indices {
        let steps = steps(&start, &end);
        Indices {
            // If the index is empty, `start == end` but the iterator should
            // yield a single empty element.
            next: (steps > 0).then(|| start.clone()),
            start,
            end,
            steps,
        }
    }

    /// Return an iterator over all the indices where each dimension is between
    /// `0` and `shape[dim]`.
    pub fn from_shape(shape: &[usize]) -> Indices {
        Self::from_start_and_end(smallvec![0; shape.len()], shape.iter().copied().collect())
    }

    /// Return an iterator over all the indices where each dimension lies
    /// within the corresponding range in `ranges`.
    pub fn from_ranges(ranges: &[Range<usize>]) -> Indices {
        let start = ranges.iter().map(|r| r.start).collect();
        let end = ranges.iter().map(|r| r.end).collect();
        Self::from_start_and_end(start, end)
    }
}

impl Iterator for Indices {
    type Item = DynIndex;

    fn next(&mut self) -> Option<DynIndex> {
        let current = self.next.take()?;
        self.steps -= 1;

        let mut next = current.clone();
        let mut has_next = false;
        for ((&dim_end, &dim_start), index) in self
            .end
            .iter()
            .zip(self.start.iter())
            .zip(next.iter_mut())
            .rev()
        {
            *index += 1;
            if *index == dim_end {
                *index = dim_start;
            } else {
                has_next = true;
                break;
            }
        }
        self.next = has_next.then_some(next);

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.steps, Some(self.steps))
    }
}

impl ExactSizeIterator for Indices {}

impl FusedIterator for Indices {}

#[cfg(test)]
mod tests {
    use super::{DynIndex, Indices};

    #[test]
    fn test_indices_from_shape() {
        let indices: Vec<DynIndex> = Indices::from_shape(&[2, 3]).collect();
        let expected: Vec<&[usize]> = vec![&[0, 0], &[0, 1], &[0, 2], &[1, 0], &[1, 1], &[1, 2]];
        assert_eq!(indices.len(), expected.len());
        for (actual, expected) in indices.iter().zip(expected) {
            assert_eq!(actual.as_slice(), expected);
        }
    }

    #[test]
    fn test_indices_scalar_and_empty() {
        // Rank 0 yields one empty index.
        let mut iter = Indices::from_shape(&[]);
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().map(|i| i.len()), Some(0));
        assert!(iter.next().is_none());

        // Any zero-sized dim yields nothing.
        let iter = Indices::from_shape(&[2, 0, 3]);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.count(), 0);
    }

    #[test]
    fn test_indices_from_ranges() {
        let indices: Vec<Vec<usize>> = Indices::from_ranges(&[1..3, 4..6])
            .map(|i| i.to_vec())
            .collect();
        assert_eq!(
            indices,
            vec![vec![1, 4], vec![1, 5], vec![2, 4], vec![2, 5]]
        );
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut iter = Indices::from_shape(&[3, 2]);
        assert_eq!(iter.len(), 6);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 4);
    }
}
