use std::fmt::{Debug, Error, Formatter};

use crate::{ArrayBase, ArrayView, AsView, Layout, Storage};

/// Configuration for debug formatting of an array.
struct FormatOptions {
    /// Maximum number of entries to print along each dimension before
    /// eliding the middle ones.
    max_items: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions { max_items: 10 }
    }
}

/// A [`Debug`]-implementing wrapper around an array view with custom
/// formatting options.
struct FormatArray<'a, T> {
    view: ArrayView<'a, T>,
    opts: FormatOptions,
}

impl<'a, T: Debug> FormatArray<'a, T> {
    fn new(view: ArrayView<'a, T>, opts: FormatOptions) -> Self {
        Self { view, opts }
    }

    /// Return the positions along a dimension of size `size` to print, with
    /// `None` marking where the elided entries go.
    fn positions(&self, size: usize) -> Vec<Option<usize>> {
        let max = self.opts.max_items;
        if size <= max {
            return (0..size).map(Some).collect();
        }
        let head = max / 2;
        let tail = max - head;
        (0..head)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((size - tail..size).map(Some))
            .collect()
    }

    /// Format `view` as nested lists, one level per dimension.
    fn write_nested(&self, f: &mut Formatter<'_>, view: &ArrayView<'a, T>) -> Result<(), Error> {
        if view.ndim() == 0 {
            return match view.item() {
                Some(item) => write!(f, "{:?}", item),
                None => Ok(()),
            };
        }
        write!(f, "[")?;
        for (i, pos) in self.positions(view.size(0)).into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match pos.and_then(|pos| view.slice(0, pos).ok()) {
                Some(sub) => self.write_nested(f, &sub)?,
                None => write!(f, "...")?,
            }
        }
        write!(f, "]")
    }
}

impl<T: Debug> Debug for FormatArray<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.view.ndim() == 0 {
            write!(f, "(")?;
            self.write_nested(f, &self.view)?;
            write!(f, ")")?;
        } else {
            self.write_nested(f, &self.view)?;
        }
        write!(
            f,
            ", shape={:?}, strides={:?}",
            self.view.shape(),
            self.view.strides()
        )
    }
}

impl<S: Storage> Debug for ArrayBase<S>
where
    S::Elem: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{:?}", FormatArray::new(self.view(), FormatOptions::default()))
    }
}
