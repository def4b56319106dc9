//! Selections of indices along a single axis.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::errors::RangeError;

/// A strided selection of indices along one axis, described by an inclusive
/// `first` and `last` index and a positive `stride`.
///
/// The selected indices are `first, first + stride, ...` up to and including
/// the largest such value that is `<= last`. A range may carry an optional
/// name, typically the name of the dimension it selects from.
///
/// ```
/// use ncarray_view::Range;
///
/// let range = Range::with_stride(1, 8, 3).unwrap();
/// assert_eq!(range.len(), 3);
/// assert_eq!(range.iter().collect::<Vec<_>>(), [1, 4, 7]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "crate::impl_serialize::RangeRepr",
        into = "crate::impl_serialize::RangeRepr"
    )
)]
pub struct Range {
    name: Option<String>,
    first: usize,
    last: usize,
    stride: usize,

    /// Number of selected indices. This is zero only for [`Range::EMPTY`].
    len: usize,
}

impl Range {
    /// A range which selects no indices.
    pub const EMPTY: Range = Range {
        name: None,
        first: 0,
        last: 0,
        stride: 1,
        len: 0,
    };

    /// Create a range selecting every index in `[first, last]`.
    pub fn new(first: usize, last: usize) -> Result<Range, RangeError> {
        Self::with_stride(first, last, 1)
    }

    /// Create a range selecting every `stride`-th index in `[first, last]`.
    ///
    /// Fails if `stride` is zero, if `first > last` or if the range would
    /// select more than `usize::MAX` indices.
    pub fn with_stride(first: usize, last: usize, stride: usize) -> Result<Range, RangeError> {
        if stride < 1 {
            return Err(RangeError::InvalidStride);
        }
        if first > last {
            return Err(RangeError::FirstAfterLast { first, last });
        }
        let len = ((last - first) / stride)
            .checked_add(1)
            .ok_or(RangeError::TooLarge)?;
        Ok(Range {
            name: None,
            first,
            last,
            stride,
            len,
        })
    }

    /// Create a range selecting `[0, len)`, or [`Range::EMPTY`] if `len` is zero.
    pub fn from_len(len: usize) -> Range {
        if len == 0 {
            Range::EMPTY
        } else {
            Range {
                name: None,
                first: 0,
                last: len - 1,
                stride: 1,
                len,
            }
        }
    }

    /// Return a copy of this range with the given name.
    pub fn with_name(self, name: impl Into<String>) -> Range {
        Range {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return the first selected index.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Return the `last` bound of the range.
    ///
    /// This is the bound given at construction. The last index actually
    /// selected may be smaller if `stride > 1`, see [`Range::last_element`].
    pub fn last(&self) -> usize {
        self.last
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Return the number of selected indices.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the last index that is actually selected.
    pub fn last_element(&self) -> Option<usize> {
        self.element(self.len.checked_sub(1)?)
    }

    /// Return true if `index` is one of the selected indices.
    pub fn contains(&self, index: usize) -> bool {
        !self.is_empty()
            && index >= self.first
            && index <= self.last
            && (index - self.first) % self.stride == 0
    }

    /// Return the `i`th selected index.
    pub fn element(&self, i: usize) -> Option<usize> {
        (i < self.len).then(|| self.first + i * self.stride)
    }

    /// Return the position of `index` within the selection. This is the
    /// inverse of [`element`](Range::element).
    pub fn index(&self, index: usize) -> Option<usize> {
        self.contains(index)
            .then(|| (index - self.first) / self.stride)
    }

    /// Return an iterator over the selected indices.
    ///
    /// Each call returns a new iterator that starts from the first index.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: self.first,
            stride: self.stride,
            remaining: self.len,
        }
    }

    /// Select the elements of `self` given by `r`, ie. the range of a range.
    ///
    /// `r` is interpreted as positions within this range's selection, so
    /// `r.last()` must be less than `self.len()`. The result keeps the name
    /// of `self`.
    pub fn compose(&self, r: &Range) -> Result<Range, RangeError> {
        if r.is_empty() {
            return Ok(Range {
                name: self.name.clone(),
                ..Range::EMPTY
            });
        }
        if r.last >= self.len {
            return Err(RangeError::OutOfBounds(r.to_string()));
        }
        let first = self.first + r.first * self.stride;
        let last = self.first + r.last * self.stride;
        let mut composed = Range::with_stride(first, last, self.stride * r.stride)?;
        composed.name = self.name.clone();
        Ok(composed)
    }

    /// Return the indices selected by both `self` and `other`.
    ///
    /// The intersection of two strided ranges is a range whose stride is the
    /// least common multiple of both strides. If the ranges have no index in
    /// common, [`Range::EMPTY`] is returned. The result keeps the name of
    /// `self`.
    pub fn intersect(&self, other: &Range) -> Range {
        let empty = Range {
            name: self.name.clone(),
            ..Range::EMPTY
        };
        let (Some(self_last), Some(other_last)) = (self.last_element(), other.last_element())
        else {
            return empty;
        };
        let lo = self.first.max(other.first);
        let hi = self_last.min(other_last);
        if lo > hi {
            return empty;
        }

        // The selected indices of `self` cycle through every residue modulo
        // `other.stride` within `other.stride` steps, so if there is a common
        // index it is found within that many candidates.
        let start = (lo - self.first).div_ceil(self.stride);
        let common = (start..start.saturating_add(other.stride))
            .map(|i| self.first + i * self.stride)
            .take_while(|&idx| idx <= hi)
            .find(|&idx| other.contains(idx));
        let Some(first) = common else {
            return empty;
        };

        let stride = lcm(self.stride, other.stride);
        let last = first + ((hi - first) / stride) * stride;
        Range {
            name: self.name.clone(),
            first,
            last,
            stride,
            len: (last - first) / stride + 1,
        }
    }

    /// Return a copy of this range with `origin` subtracted from its bounds.
    pub fn shift_origin(&self, origin: usize) -> Result<Range, RangeError> {
        if self.is_empty() {
            return Ok(self.clone());
        }
        if origin > self.first {
            return Err(RangeError::OutOfBounds(self.to_string()));
        }
        Ok(Range {
            first: self.first - origin,
            last: self.last - origin,
            ..self.clone()
        })
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: usize, b: usize) -> usize {
    (a / gcd(a, b)).saturating_mul(b)
}

impl fmt::Display for Range {
    /// Format the range as `first:last` or `first:last:stride`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "EMPTY")
        } else if self.stride == 1 {
            write!(f, "{}:{}", self.first, self.last)
        } else {
            write!(f, "{}:{}:{}", self.first, self.last, self.stride)
        }
    }
}

impl FromStr for Range {
    type Err = RangeError;

    /// Parse a range from `index`, `first:last` or `first:last:stride`
    /// syntax. All bounds are inclusive.
    fn from_str(s: &str) -> Result<Range, RangeError> {
        let s = s.trim();
        if s == "EMPTY" {
            return Ok(Range::EMPTY);
        }
        let syntax_err = || RangeError::Syntax(s.to_string());
        let parts: Vec<usize> = s
            .split(':')
            .map(|part| part.trim().parse::<usize>().map_err(|_| syntax_err()))
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            &[index] => Range::new(index, index),
            &[first, last] => Range::new(first, last),
            &[first, last, stride] => Range::with_stride(first, last, stride),
            _ => Err(syntax_err()),
        }
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = usize;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Iterator over the indices selected by a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    next: usize,
    stride: usize,
    remaining: usize,
}

impl Iterator for RangeIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next = self.next.wrapping_add(self.stride);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeIter {}
impl FusedIterator for RangeIter {}

/// An ordered union of several ranges, exposed as a single axis selection.
///
/// This is used to describe non-contiguous selections that cannot be
/// expressed with a single stride, eg. `[0, 1, 2, 10, 11]`. The composite
/// has its own name, which is independent of the names of its members.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeRange {
    name: Option<String>,
    ranges: Vec<Range>,
}

impl CompositeRange {
    pub fn new(name: Option<String>, ranges: Vec<Range>) -> CompositeRange {
        CompositeRange { name, ranges }
    }

    /// Return a composite with the same members and a different name.
    pub fn copy_with_name(&self, name: impl Into<String>) -> CompositeRange {
        CompositeRange {
            name: Some(name.into()),
            ranges: self.ranges.clone(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Return the total number of selected indices across all members.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return true if any member selects `index`.
    pub fn contains(&self, index: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(index))
    }

    /// Return the `i`th selected index, counting through members in order.
    pub fn element(&self, mut i: usize) -> Option<usize> {
        for range in &self.ranges {
            if i < range.len() {
                return range.element(i);
            }
            i -= range.len();
        }
        None
    }

    /// Return an iterator over the selected indices of each member in order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        self.ranges.iter().flat_map(Range::iter)
    }
}
