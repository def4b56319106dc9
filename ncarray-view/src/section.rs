use std::fmt;
use std::str::FromStr;

use crate::errors::{RangeError, SectionError};
use crate::index_iterator::Indices;
use crate::layout::DynLayout;
use crate::range::Range;

/// A rectangular, possibly strided, sub-region of an N-dimensional array.
///
/// A section holds one entry per dimension. An entry of `None` selects the
/// whole dimension; it is resolved into a concrete range once the shape it
/// applies to is known, see [`Section::fill`].
///
/// Sections have a text form with comma-separated [`Range`]s and `:` for a
/// whole dimension:
///
/// ```
/// use ncarray_view::Section;
///
/// let section: Section = "0:2:2,:,3".parse().unwrap();
/// let resolved = Section::fill(&section, &[3, 4, 5]).unwrap();
/// assert_eq!(resolved.shape().unwrap(), [2, 4, 1]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    ranges: Vec<Option<Range>>,
}

impl Section {
    pub fn new(ranges: Vec<Option<Range>>) -> Section {
        Section { ranges }
    }

    /// Create a section that selects every element of an array with the
    /// given shape.
    pub fn from_shape(shape: &[usize]) -> Section {
        Section {
            ranges: shape.iter().map(|&size| Some(Range::from_len(size))).collect(),
        }
    }

    /// Create a section starting at `origin` with size `shape`.
    pub fn from_origin_and_shape(origin: &[usize], shape: &[usize]) -> Result<Section, SectionError> {
        if origin.len() != shape.len() {
            return Err(SectionError::RankMismatch {
                actual: origin.len(),
                expected: shape.len(),
            });
        }
        let ranges = origin
            .iter()
            .zip(shape)
            .map(|(&origin, &size)| match size {
                0 => Ok(Some(Range::EMPTY)),
                size => origin
                    .checked_add(size - 1)
                    .ok_or(RangeError::TooLarge)
                    .and_then(|last| Range::new(origin, last))
                    .map(Some),
            })
            .collect::<Result<_, RangeError>>()?;
        Ok(Section { ranges })
    }

    /// Resolve the whole-dimension entries of `partial` against `shape`.
    ///
    /// Every `None` entry is replaced with a range covering the whole
    /// dimension. Fails if `partial` has a different rank than `shape`.
    pub fn fill(partial: &Section, shape: &[usize]) -> Result<Section, SectionError> {
        if partial.rank() != shape.len() {
            return Err(SectionError::RankMismatch {
                actual: partial.rank(),
                expected: shape.len(),
            });
        }
        let ranges = partial
            .ranges
            .iter()
            .zip(shape)
            .map(|(range, &size)| {
                Some(
                    range
                        .clone()
                        .unwrap_or_else(|| Range::from_len(size)),
                )
            })
            .collect();
        Ok(Section { ranges })
    }

    /// Return the number of dimensions.
    pub fn rank(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[Option<Range>] {
        &self.ranges
    }

    /// Return the range for dimension `dim`, or `None` if it is unresolved
    /// or out of bounds.
    pub fn range(&self, dim: usize) -> Option<&Range> {
        self.ranges.get(dim)?.as_ref()
    }

    /// Return true if every entry has been resolved to a concrete range.
    pub fn is_resolved(&self) -> bool {
        self.ranges.iter().all(Option::is_some)
    }

    fn resolved(&self) -> Result<impl Iterator<Item = &Range>, SectionError> {
        if let Some(dim) = self.ranges.iter().position(Option::is_none) {
            return Err(SectionError::Unresolved(dim));
        }
        Ok(self.ranges.iter().flatten())
    }

    /// Return the number of elements selected by this section.
    ///
    /// Fails if any entry is unresolved.
    pub fn compute_size(&self) -> Result<usize, SectionError> {
        Ok(self.resolved()?.map(Range::len).product())
    }

    /// Check that every entry is resolved and lies within `shape`.
    pub fn check_in_range(&self, shape: &[usize]) -> Result<(), SectionError> {
        if self.rank() != shape.len() {
            return Err(SectionError::RankMismatch {
                actual: self.rank(),
                expected: shape.len(),
            });
        }
        for (dim, (range, &size)) in self.resolved()?.zip(shape).enumerate() {
            if !range.is_empty() && range.last() >= size {
                return Err(SectionError::OutOfBounds {
                    dim,
                    last: range.last(),
                    size,
                });
            }
        }
        Ok(())
    }

    /// Return the shape of the sub-array selected by this section.
    pub fn shape(&self) -> Result<Vec<usize>, SectionError> {
        Ok(self.resolved()?.map(Range::len).collect())
    }

    /// Return the first selected index along each dimension.
    pub fn origin(&self) -> Result<Vec<usize>, SectionError> {
        Ok(self.resolved()?.map(Range::first).collect())
    }

    /// Return the stride along each dimension.
    pub fn stride(&self) -> Result<Vec<usize>, SectionError> {
        Ok(self.resolved()?.map(Range::stride).collect())
    }

    /// Return the section selecting elements that both `self` and `other`
    /// select.
    pub fn intersect(&self, other: &Section) -> Result<Section, SectionError> {
        if self.rank() != other.rank() {
            return Err(SectionError::RankMismatch {
                actual: other.rank(),
                expected: self.rank(),
            });
        }
        let ranges = self
            .resolved()?
            .zip(other.resolved()?)
            .map(|(a, b)| Some(a.intersect(b)))
            .collect();
        Ok(Section { ranges })
    }

    /// Return true if this section selects every element of an array with
    /// shape `shape`, in order.
    pub fn is_whole(&self, shape: &[usize]) -> bool {
        self.rank() == shape.len()
            && self.ranges.iter().zip(shape).all(|(range, &size)| match range {
                None => true,
                Some(range) => {
                    range.len() == size && (size == 0 || (range.first() == 0 && range.stride() == 1))
                }
            })
    }

    /// Return the storage offsets, in a canonical array of shape `shape`, of
    /// every element this section selects, in row-major section order.
    ///
    /// `None` entries select the whole dimension.
    pub fn offsets(&self, shape: &[usize]) -> Result<Vec<usize>, SectionError> {
        let section = Section::fill(self, shape)?;
        section.check_in_range(shape)?;
        let strides = DynLayout::contiguous_strides(shape);
        let ranges: Vec<&Range> = section.resolved()?.collect();
        let section_shape: Vec<usize> = ranges.iter().map(|r| r.len()).collect();

        let offsets = Indices::from_shape(&section_shape)
            .map(|index| {
                index
                    .iter()
                    .zip(&ranges)
                    .zip(&strides)
                    .map(|((&i, range), &stride)| {
                        (range.first() + i * range.stride()) * stride as usize
                    })
                    .sum::<usize>()
            })
            .collect();
        Ok(offsets)
    }
}

impl From<Vec<Range>> for Section {
    fn from(ranges: Vec<Range>) -> Section {
        Section {
            ranges: ranges.into_iter().map(Some).collect(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match range {
                Some(range) => write!(f, "{}", range)?,
                None => write!(f, ":")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Section {
    type Err = SectionError;

    /// Parse a section from comma-separated ranges, eg. `"0:2:2,:,3"`.
    ///
    /// An empty string is a rank-0 section.
    fn from_str(s: &str) -> Result<Section, SectionError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Section::default());
        }
        let ranges = s
            .split(',')
            .map(|item| match item.trim() {
                ":" => Ok(None),
                item => item.parse::<Range>().map(Some),
            })
            .collect::<Result<_, RangeError>>()?;
        Ok(Section { ranges })
    }
}
