use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{FromDataError, IndexError, LayoutError};
use crate::index::Index;
use crate::iterators::Iter;
use crate::layout::{DynLayout, Layout};
use crate::section::Section;
use crate::storage::{IntoStorage, Storage, StorageMut};

/// The base type for multi-dimensional arrays. This consists of storage for
/// elements, plus a _layout_ which maps from a multi-dimensional index to a
/// storage offset. This base type is not normally used directly but instead
/// through a type alias which selects the storage type.
///
/// The storage can be owned (like a `Vec<T>`), borrowed (like `&[T]`),
/// either (`Cow<[T]>`) or shared (`Arc<[T]>`). Layout transformations such as
/// [`flip`](ArrayView::flip), [`permute`](ArrayView::permute) and
/// [`section`](ArrayView::section) only change the layout and return views
/// of the same storage.
#[derive(Clone)]
pub struct ArrayBase<S: Storage> {
    data: S,

    // Layout mapping N-dimensional indices to offsets in `data`.
    //
    // Constructors must ensure that every index that is valid for `layout`
    // maps to an offset that is less than `data.len()`.
    layout: DynLayout,
}

/// View of an array which borrows its elements.
pub type ArrayView<'a, T> = ArrayBase<&'a [T]>;

/// Array which owns its elements.
pub type Array<T> = ArrayBase<Vec<T>>;

/// Array which either borrows or owns its elements.
///
/// This is returned by operations which avoid copying when they can, such as
/// [`reshape`](ArrayView::reshape).
pub type CowArray<'a, T> = ArrayBase<Cow<'a, [T]>>;

/// Array whose elements are reference-counted and can be shared between
/// owners without copying.
pub type ArcArray<T> = ArrayBase<Arc<[T]>>;

impl<S: Storage> ArrayBase<S> {
    /// Create an array with a canonical layout from a shape and storage.
    ///
    /// The length of the storage must be exactly the product of `shape`. The
    /// storage is never copied.
    pub fn from_data<D: IntoStorage<Output = S>>(
        shape: &[usize],
        data: D,
    ) -> Result<ArrayBase<S>, FromDataError> {
        let data = data.into_storage();
        let layout = DynLayout::from_shape(shape);
        if layout.len() != data.len() {
            return Err(FromDataError::StorageLengthMismatch {
                len: data.len(),
                shape: shape.to_vec(),
            });
        }
        Ok(ArrayBase { data, layout })
    }

    /// Create an array from storage and an arbitrary layout.
    ///
    /// Fails if any index of `layout` maps to an offset beyond the end of
    /// the storage.
    pub fn from_parts<D: IntoStorage<Output = S>>(
        layout: DynLayout,
        data: D,
    ) -> Result<ArrayBase<S>, FromDataError> {
        let data = data.into_storage();
        if layout.min_data_len() > data.len() {
            return Err(FromDataError::StorageTooShort);
        }
        Ok(ArrayBase { data, layout })
    }

    /// Return the underlying storage, in storage order.
    ///
    /// This may include elements that are not selected by the layout.
    pub fn storage(&self) -> &[S::Elem] {
        self.data.as_slice()
    }
}

impl<S: StorageMut> ArrayBase<S> {
    /// Return a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut S::Elem, IndexError> {
        let offset = self.layout.offset_of(index)?;
        Ok(&mut self.data.as_slice_mut()[offset])
    }

    /// Write `value` to the element addressed by the cursor `index`.
    pub fn set(&mut self, index: &Index, value: S::Elem) -> Result<(), IndexError> {
        *self.get_mut(index.current_counter())? = value;
        Ok(())
    }
}

impl<T> Array<T> {
    /// Create an array of the given shape where every element is `value`.
    ///
    /// Only one element is stored. Every index maps to it via zero strides.
    pub fn constant(value: T, shape: &[usize]) -> Array<T> {
        ArrayBase {
            data: vec![value],
            layout: DynLayout::constant(shape),
        }
    }

    /// Consume the array and return its elements in logical order.
    ///
    /// The storage is returned without copying if the layout is canonical.
    pub fn into_data(self) -> Vec<T>
    where
        T: Clone,
    {
        if self.layout.is_canonical() && self.layout.len() == self.data.len() {
            self.data
        } else {
            self.view().to_vec()
        }
    }

    /// Convert this array into one whose storage can be shared.
    pub fn into_arc(self) -> ArcArray<T> {
        ArrayBase {
            data: self.data.into(),
            layout: self.layout,
        }
    }

    /// Convert this array into a [`CowArray`] which owns its storage.
    pub fn into_cow<'a>(self) -> CowArray<'a, T>
    where
        T: Clone,
    {
        ArrayBase {
            data: Cow::Owned(self.data),
            layout: self.layout,
        }
    }
}

impl<T> CowArray<'_, T>
where
    [T]: ToOwned,
{
    /// Return true if this array borrows its storage.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }
}

impl<S: Storage> Layout for ArrayBase<S> {
    #[inline]
    fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    #[inline]
    fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    #[inline]
    fn try_offset(&self, index: &[usize]) -> Option<usize> {
        self.layout.try_offset(index)
    }
}

/// Trait implemented by all variants of [`ArrayBase`], which provides a
/// `view` method to get an immutable view of the array, plus methods which
/// forward to such a view.
///
/// [`ArrayView`] has inherent methods with the same names which preserve the
/// lifetime of the borrowed storage in their return types. This allows
/// transformations to be chained, eg. `view.flip(0)?.permute(&[1, 0])?`.
pub trait AsView: Layout {
    /// Type of element stored in this array.
    type Elem;

    /// Return a borrowed view of this array.
    fn view(&self) -> ArrayView<'_, Self::Elem>;

    /// Return the layout of this array.
    fn layout(&self) -> &DynLayout;

    /// Return a fresh cursor positioned at the first element of this array.
    fn index(&self) -> Index {
        Index::new(self.layout().clone())
    }

    /// Return the element at `index`.
    ///
    /// Fails if `index` has the wrong length or is out of bounds for the
    /// current shape.
    fn get(&self, index: &[usize]) -> Result<&Self::Elem, IndexError> {
        self.view().get(index)
    }

    /// Return the element addressed by the cursor `index`.
    fn get_at(&self, index: &Index) -> Result<&Self::Elem, IndexError> {
        self.view().get_at(index)
    }

    /// Return the single element of an array with one element.
    fn item(&self) -> Option<&Self::Elem> {
        self.view().item()
    }

    /// Return an iterator over elements of this array in logical order.
    ///
    /// Each call returns an iterator which starts from the first element.
    fn iter(&self) -> Iter<'_, Self::Elem> {
        self.view().iter()
    }

    fn flip(&self, dim: usize) -> Result<ArrayView<'_, Self::Elem>, LayoutError> {
        self.view().flip(dim)
    }

    fn permute(&self, order: &[usize]) -> Result<ArrayView<'_, Self::Elem>, LayoutError> {
        self.view().permute(order)
    }

    fn transpose(&self, dim1: usize, dim2: usize) -> Result<ArrayView<'_, Self::Elem>, LayoutError> {
        self.view().transpose(dim1, dim2)
    }

    fn reduce(&self) -> ArrayView<'_, Self::Elem> {
        self.view().reduce()
    }

    fn reduce_dim(&self, dim: usize) -> Result<ArrayView<'_, Self::Elem>, LayoutError> {
        self.view().reduce_dim(dim)
    }

    fn reduce_first(&self, max: usize) -> ArrayView<'_, Self::Elem> {
        self.view().reduce_first(max)
    }

    fn section(&self, section: &Section) -> Result<ArrayView<'_, Self::Elem>, LayoutError> {
        self.view().section(section)
    }

    fn slice(&self, dim: usize, index: usize) -> Result<ArrayView<'_, Self::Elem>, LayoutError> {
        self.view().slice(dim, index)
    }

    fn reshape(&self, shape: &[usize]) -> Result<CowArray<'_, Self::Elem>, LayoutError>
    where
        Self::Elem: Clone,
    {
        self.view().reshape(shape)
    }

    fn to_contiguous(&self) -> CowArray<'_, Self::Elem>
    where
        Self::Elem: Clone,
    {
        self.view().to_contiguous()
    }

    /// Return the elements of this array in logical order.
    fn to_vec(&self) -> Vec<Self::Elem>
    where
        Self::Elem: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Return a copy of this array with a canonical layout.
    fn to_array(&self) -> Array<Self::Elem>
    where
        Self::Elem: Clone,
    {
        ArrayBase {
            data: self.to_vec(),
            layout: DynLayout::from_shape(self.shape()),
        }
    }

    /// Return a new array with the same shape, where each element is
    /// produced by applying `f` to the corresponding element of this array.
    fn map<F, U>(&self, f: F) -> Array<U>
    where
        F: Fn(&Self::Elem) -> U,
    {
        ArrayBase {
            data: self.iter().map(f).collect(),
            layout: DynLayout::from_shape(self.shape()),
        }
    }
}

impl<S: Storage> AsView for ArrayBase<S> {
    type Elem = S::Elem;

    fn view(&self) -> ArrayView<'_, S::Elem> {
        ArrayBase {
            data: self.data.as_slice(),
            layout: self.layout.clone(),
        }
    }

    fn layout(&self) -> &DynLayout {
        &self.layout
    }
}

impl<'a, T> ArrayView<'a, T> {
    fn with_layout(&self, layout: DynLayout) -> ArrayView<'a, T> {
        ArrayBase {
            data: self.data,
            layout,
        }
    }

    pub fn get(&self, index: &[usize]) -> Result<&'a T, IndexError> {
        let offset = self.layout.offset_of(index)?;
        Ok(&self.data[offset])
    }

    pub fn get_at(&self, index: &Index) -> Result<&'a T, IndexError> {
        self.get(index.current_counter())
    }

    pub fn item(&self) -> Option<&'a T> {
        if self.layout.len() != 1 {
            return None;
        }
        self.data.get(self.layout.offset())
    }

    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(self.data, &self.layout)
    }

    /// Reverse the order of elements along `dim`.
    pub fn flip(&self, dim: usize) -> Result<ArrayView<'a, T>, LayoutError> {
        Ok(self.with_layout(self.layout.flipped(dim)?))
    }

    /// Reorder the dimensions so that dimension `i` of the result is
    /// dimension `order[i]` of this view.
    pub fn permute(&self, order: &[usize]) -> Result<ArrayView<'a, T>, LayoutError> {
        Ok(self.with_layout(self.layout.permuted(order)?))
    }

    /// Swap dimensions `dim1` and `dim2`.
    pub fn transpose(&self, dim1: usize, dim2: usize) -> Result<ArrayView<'a, T>, LayoutError> {
        Ok(self.with_layout(self.layout.transposed(dim1, dim2)?))
    }

    /// Remove all dimensions of size one.
    pub fn reduce(&self) -> ArrayView<'a, T> {
        self.with_layout(self.layout.squeezed())
    }

    /// Remove dimension `dim`, which must have size one.
    pub fn reduce_dim(&self, dim: usize) -> Result<ArrayView<'a, T>, LayoutError> {
        Ok(self.with_layout(self.layout.remove_axis(dim)?))
    }

    /// Remove up to `max` leading dimensions of size one.
    pub fn reduce_first(&self, max: usize) -> ArrayView<'a, T> {
        self.with_layout(self.layout.squeeze_leading(max))
    }

    /// Return a view of the sub-array selected by `section`.
    ///
    /// The rank is preserved, so a section with single-index ranges yields
    /// size-one dimensions. Use [`reduce`](ArrayView::reduce) to drop them.
    pub fn section(&self, section: &Section) -> Result<ArrayView<'a, T>, LayoutError> {
        Ok(self.with_layout(self.layout.sectioned(section)?))
    }

    /// Return the sub-array at position `index` along `dim`, with `dim`
    /// removed.
    pub fn slice(&self, dim: usize, index: usize) -> Result<ArrayView<'a, T>, LayoutError> {
        Ok(self.with_layout(self.layout.sliced(dim, index)?))
    }

    /// Return an array with the same elements in logical order and a
    /// different shape.
    ///
    /// If this view is contiguous, the result borrows the storage. Otherwise
    /// the elements are copied into a new buffer.
    pub fn reshape(&self, shape: &[usize]) -> Result<CowArray<'a, T>, LayoutError>
    where
        T: Clone,
    {
        let layout = self.layout.reshaped(shape)?;
        if self.layout.is_contiguous() {
            Ok(ArrayBase {
                data: Cow::Borrowed(self.contiguous_data()),
                layout,
            })
        } else {
            debug!(
                from_shape = ?self.layout.shape(),
                from_strides = ?self.layout.strides(),
                to_shape = ?shape,
                "copying non-contiguous view for reshape"
            );
            Ok(ArrayBase {
                data: Cow::Owned(self.iter().cloned().collect()),
                layout,
            })
        }
    }

    /// Return a canonical array with the same shape and elements, borrowing
    /// the storage if this view is already contiguous.
    pub fn to_contiguous(&self) -> CowArray<'a, T>
    where
        T: Clone,
    {
        let layout = DynLayout::from_shape(self.layout.shape());
        let data = if self.layout.is_contiguous() {
            Cow::Borrowed(self.contiguous_data())
        } else {
            Cow::Owned(self.iter().cloned().collect())
        };
        ArrayBase { data, layout }
    }

    /// Return the storage range holding the elements of a contiguous view.
    fn contiguous_data(&self) -> &'a [T] {
        let start = self.layout.offset();
        self.data
            .get(start..start + self.layout.len())
            .unwrap_or_default()
    }
}

impl<S1, S2> PartialEq<ArrayBase<S2>> for ArrayBase<S1>
where
    S1: Storage,
    S2: Storage<Elem = S1::Elem>,
    S1::Elem: PartialEq,
{
    /// Arrays are equal if they have the same shape and the same elements in
    /// logical order, regardless of layout.
    fn eq(&self, other: &ArrayBase<S2>) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use ncarray_testing::TestCases;

    use super::{ArcArray, Array, ArrayView, AsView};
    use crate::errors::{FromDataError, IndexError, LayoutError};
    use crate::layout::{DynLayout, Layout};
    use crate::{Range, Section};

    fn data_1_to_6() -> Vec<i32> {
        (1..=6).collect()
    }

    #[test]
    fn test_from_data() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[1, 2, 3], data.as_slice()).unwrap();
        assert_eq!(view.shape(), &[1, 2, 3]);
        assert!(view.layout().is_canonical());

        // Construction never copies.
        assert!(std::ptr::eq(view.storage(), data.as_slice()));

        assert_eq!(
            ArrayView::from_data(&[2, 2], data.as_slice()).err(),
            Some(FromDataError::StorageLengthMismatch {
                len: 6,
                shape: vec![2, 2]
            })
        );
    }

    #[test]
    fn test_from_parts() {
        let data = data_1_to_6();
        let layout = DynLayout::try_from_parts(&[3], &[2], 1).unwrap();
        let view = ArrayView::from_parts(layout, data.as_slice()).unwrap();
        assert_eq!(view.to_vec(), [2, 4, 6]);

        let layout = DynLayout::try_from_parts(&[3], &[3], 0).unwrap();
        assert_eq!(
            ArrayView::from_parts(layout, data.as_slice()).err(),
            Some(FromDataError::StorageTooShort)
        );
    }

    #[test]
    fn test_flip_last_axis() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[1, 2, 3], data.as_slice()).unwrap();
        let flipped = view.flip(2).unwrap();
        assert_eq!(flipped.get(&[0, 0, 2]), Ok(&1));
        assert_eq!(flipped.to_vec(), [3, 2, 1, 6, 5, 4]);

        // The source view is unchanged.
        assert_eq!(view.to_vec(), data);
    }

    #[test]
    fn test_flip_round_trip() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        for dim in 0..view.ndim() {
            let round_trip = view.flip(dim).unwrap().flip(dim).unwrap();
            assert_eq!(round_trip, view);
            assert_eq!(round_trip.layout(), view.layout());
        }
    }

    #[test]
    fn test_permute() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[1, 2, 3], data.as_slice()).unwrap();
        let permuted = view.permute(&[2, 0, 1]).unwrap();
        assert_eq!(permuted.shape(), &[3, 1, 2]);
        assert_eq!(permuted.get(&[0, 0, 0]), Ok(&1));
        assert_eq!(permuted.get(&[1, 0, 0]), Ok(&2));
        assert_eq!(permuted.get(&[2, 0, 0]), Ok(&3));
        assert_eq!(permuted.get(&[0, 0, 1]), Ok(&4));
    }

    #[test]
    fn test_transformations_preserve_shape_multiset() {
        #[derive(Clone, Copy, Debug)]
        enum Op {
            Flip(usize),
            Permute([usize; 3]),
            Transpose(usize, usize),
        }

        let cases = [
            Op::Flip(1),
            Op::Permute([1, 2, 0]),
            Op::Transpose(0, 2),
        ];

        let data: Vec<i32> = (0..24).collect();
        let view = ArrayView::from_data(&[2, 3, 4], data.as_slice()).unwrap();
        cases.test_each_value(|op| {
            let transformed = match op {
                Op::Flip(dim) => view.flip(dim),
                Op::Permute(order) => view.permute(&order),
                Op::Transpose(dim1, dim2) => view.transpose(dim1, dim2),
            }
            .unwrap();
            let mut shape = transformed.shape().to_vec();
            shape.sort();
            assert_eq!(shape, [2, 3, 4]);
            assert_eq!(transformed.len(), view.len());
        })
    }

    #[test]
    fn test_permute_invalid() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[1, 2, 3], data.as_slice()).unwrap();
        for order in [vec![0, 0, 1], vec![0, 1], vec![0, 1, 2, 3], vec![3, 1, 0]] {
            assert_eq!(
                view.permute(&order).err(),
                Some(LayoutError::InvalidPermutation(order.clone()))
            );
        }
    }

    #[test]
    fn test_section() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[1, 2, 3], data.as_slice()).unwrap();
        let section = Section::new(vec![None, None, Some(Range::with_stride(0, 2, 2).unwrap())]);
        let sectioned = view.section(&section).unwrap();

        assert_eq!(sectioned.shape(), &[1, 2, 2]);
        assert_eq!(sectioned.get(&[0, 0, 1]), Ok(&3));
        assert_eq!(sectioned.iter().sum::<i32>(), 14);

        // The parent's unselected elements are not reachable.
        assert_eq!(
            sectioned.get(&[0, 0, 2]),
            Err(IndexError::OutOfBounds {
                dim: 2,
                index: 2,
                size: 2
            })
        );
    }

    #[test]
    fn test_section_out_of_bounds() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        let section: Section = "0:1,1:3".parse().unwrap();
        assert!(matches!(
            view.section(&section),
            Err(LayoutError::Section(_))
        ));
    }

    #[test]
    fn test_slice() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        assert_eq!(view.slice(0, 1).unwrap().to_vec(), [4, 5, 6]);
        assert_eq!(view.slice(1, 0).unwrap().to_vec(), [1, 4]);
        assert!(view.slice(1, 3).is_err());
    }

    #[test]
    fn test_reduce() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[1, 2, 1, 3], data.as_slice()).unwrap();
        assert_eq!(view.reduce().shape(), &[2, 3]);
        assert_eq!(view.reduce_dim(2).unwrap().shape(), &[1, 2, 3]);
        assert_eq!(view.reduce_first(4).shape(), &[2, 1, 3]);
        assert_eq!(
            view.reduce_dim(1).err(),
            Some(LayoutError::NotUnitAxis { axis: 1, size: 2 })
        );
    }

    #[test]
    fn test_reshape_contiguous_shares_storage() {
        let data: Vec<i32> = (0..12).collect();
        let view = ArrayView::from_data(&[3, 4], data.as_slice()).unwrap();

        // Slicing off the first row gives a contiguous view with a non-zero
        // offset.
        let rows = view.section(&"1:2,:".parse().unwrap()).unwrap();
        let reshaped = rows.reshape(&[4, 2]).unwrap();
        assert!(matches!(reshaped.data, Cow::Borrowed(_)));
        assert_eq!(reshaped.shape(), &[4, 2]);
        assert_eq!(reshaped.to_vec(), (4..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_reshape_non_contiguous_copies() {
        let data: Vec<i32> = (0..6).collect();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        let transposed = view.transpose(0, 1).unwrap();
        let reshaped = transposed.reshape(&[6]).unwrap();
        assert!(matches!(reshaped.data, Cow::Owned(_)));
        assert_eq!(reshaped.to_vec(), [0, 3, 1, 4, 2, 5]);
        assert!(reshaped.layout().is_canonical());
    }

    #[test]
    fn test_reshape_size_mismatch() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        assert_eq!(
            view.reshape(&[4]).err(),
            Some(LayoutError::LengthMismatch { from: 6, to: 4 })
        );
    }

    #[test]
    fn test_iter_is_restartable() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        let flipped = view.flip(0).unwrap();
        let first: Vec<_> = flipped.iter().copied().collect();
        let second: Vec<_> = flipped.iter().copied().collect();
        assert_eq!(first, [4, 5, 6, 1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_chained_transforms_keep_borrow() {
        let data: Vec<i32> = (0..24).collect();
        let view = ArrayView::from_data(&[2, 3, 4], data.as_slice()).unwrap();
        let result = view
            .flip(2)
            .and_then(|v| v.permute(&[2, 1, 0]))
            .and_then(|v| v.slice(1, 0))
            .unwrap();
        assert_eq!(result.shape(), &[4, 2]);
        assert_eq!(result.to_vec(), [3, 15, 2, 14, 1, 13, 0, 12]);
    }

    #[test]
    fn test_cursor_read_and_write() {
        let mut array = Array::from_data(&[2, 3], data_1_to_6()).unwrap();
        let mut index = array.index();
        index.set(&[1, 1]).unwrap();
        assert_eq!(array.get_at(&index), Ok(&5));

        array.set(&index, 50).unwrap();
        assert!(index.incr());
        array.set(&index, 60).unwrap();
        assert_eq!(array.to_vec(), [1, 2, 3, 4, 50, 60]);

        *array.get_mut(&[0, 0]).unwrap() = 10;
        assert_eq!(array.get(&[0, 0]), Ok(&10));
        assert!(array.get_mut(&[2, 0]).is_err());
    }

    #[test]
    fn test_constant() {
        let array = Array::constant(7, &[2, 3]);
        assert_eq!(array.len(), 6);
        assert_eq!(array.storage(), &[7]);
        assert_eq!(array.get(&[1, 2]), Ok(&7));
        assert_eq!(array.to_vec(), [7; 6]);
        assert_eq!(array.into_data(), vec![7; 6]);
    }

    #[test]
    fn test_item() {
        let scalar = Array::from_data(&[], vec![5]).unwrap();
        assert_eq!(scalar.item(), Some(&5));

        let array = Array::from_data(&[2], vec![1, 2]).unwrap();
        assert_eq!(array.item(), None);
        assert_eq!(array.slice(0, 1).unwrap().item(), Some(&2));
    }

    #[test]
    fn test_map_and_to_array() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        let doubled = view.transpose(0, 1).unwrap().map(|x| x * 2);
        assert_eq!(doubled.shape(), &[3, 2]);
        assert_eq!(doubled.into_data(), [2, 8, 4, 10, 6, 12]);

        let copy = view.flip(1).unwrap().to_array();
        assert!(copy.layout().is_canonical());
        assert_eq!(copy.into_data(), [3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_to_contiguous() {
        let data = data_1_to_6();
        let view = ArrayView::from_data(&[2, 3], data.as_slice()).unwrap();
        assert!(matches!(view.to_contiguous().data, Cow::Borrowed(_)));
        let flipped = view.flip(1).unwrap().to_contiguous();
        assert!(matches!(flipped.data, Cow::Owned(_)));
        assert_eq!(flipped.to_vec(), [3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_owned_variants() {
        let array = Array::from_data(&[2, 3], data_1_to_6()).unwrap();
        let shared: ArcArray<i32> = array.clone().into_arc();
        let other = shared.clone();
        assert_eq!(shared, array);
        assert_eq!(other.flip(0).unwrap().to_vec(), [4, 5, 6, 1, 2, 3]);

        let cow = array.into_cow();
        assert_eq!(cow.reshape(&[3, 2]).unwrap().get(&[2, 1]), Ok(&6));
    }

    #[test]
    fn test_empty() {
        let data: Vec<i32> = Vec::new();
        let view = ArrayView::from_data(&[2, 0], data.as_slice()).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert_eq!(view.flip(1).unwrap().iter().count(), 0);
        assert_eq!(view.reshape(&[0]).unwrap().len(), 0);
    }
}
