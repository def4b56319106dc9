use std::borrow::Cow;
use std::sync::Arc;

/// Trait for backing storage used by arrays and views.
///
/// Storage is a flat, contiguous buffer of elements. It may be owned
/// (`Vec<T>`, `Arc<[T]>`), borrowed (`&[T]`) or either (`Cow<[T]>`). The
/// layout of an array decides which elements of the storage it refers to
/// and in what order.
pub trait Storage {
    /// The element type.
    type Elem;

    /// Return the contents of the storage as a slice.
    fn as_slice(&self) -> &[Self::Elem];

    /// Return the number of elements in the storage.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Return true if `self.len() == 0`.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the element at a given offset, or None if `offset >= self.len()`.
    fn get(&self, offset: usize) -> Option<&Self::Elem> {
        self.as_slice().get(offset)
    }
}

/// Storage whose elements can be modified in place.
///
/// This is only implemented for storage that is uniquely owned.
pub trait StorageMut: Storage {
    fn as_slice_mut(&mut self) -> &mut [Self::Elem];
}

impl<T> Storage for Vec<T> {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> StorageMut for Vec<T> {
    fn as_slice_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Storage for &[T] {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> Storage for Cow<'_, [T]>
where
    [T]: ToOwned,
{
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> Storage for Arc<[T]> {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self
    }
}

/// Trait for converting owned and borrowed element containers (`Vec<T>`,
/// slices) into their corresponding `Storage` type.
///
/// This is used by [`ArrayBase::from_data`](crate::ArrayBase::from_data).
pub trait IntoStorage {
    type Output: Storage;

    fn into_storage(self) -> Self::Output;
}

impl<T> IntoStorage for Vec<T> {
    type Output = Self;

    fn into_storage(self) -> Self {
        self
    }
}

impl<'a, T> IntoStorage for &'a [T] {
    type Output = Self;

    fn into_storage(self) -> &'a [T] {
        self
    }
}

impl<'a, T, const N: usize> IntoStorage for &'a [T; N] {
    type Output = &'a [T];

    fn into_storage(self) -> &'a [T] {
        self.as_slice()
    }
}

impl<'a, T> IntoStorage for Cow<'a, [T]>
where
    [T]: ToOwned,
{
    type Output = Self;

    fn into_storage(self) -> Self {
        self
    }
}

impl<T> IntoStorage for Arc<[T]> {
    type Output = Self;

    fn into_storage(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::sync::Arc;

    use super::{IntoStorage, Storage, StorageMut};

    fn first<S: Storage>(storage: &S) -> Option<&S::Elem> {
        storage.get(0)
    }

    #[test]
    fn test_storage_impls() {
        let data = vec![1, 2, 3];
        assert_eq!(first(&data), Some(&1));
        assert_eq!(first(&data.as_slice()), Some(&1));
        assert_eq!(first(&Cow::Borrowed(data.as_slice())), Some(&1));
        assert_eq!(first(&Arc::<[i32]>::from(data.clone())), Some(&1));

        let empty: Vec<i32> = Vec::new();
        assert!(empty.is_empty());
        assert_eq!(empty.get(0), None);
    }

    #[test]
    fn test_storage_mut() {
        let mut data = vec![1, 2, 3];
        data.as_slice_mut()[1] = 5;
        assert_eq!(data.as_slice(), &[1, 5, 3]);
    }

    #[test]
    fn test_into_storage() {
        let array = [1, 2, 3];
        let storage = (&array).into_storage();
        assert_eq!(storage.len(), 3);
    }
}
