//! Internal testing utilities for the ncarray crates.

use std::fmt::Debug;
use std::panic::{catch_unwind, RefUnwindSafe, UnwindSafe};

/// Table-driven tests over a collection of cases.
///
/// Write a `Case` struct holding the inputs and expected outputs of one
/// check (it must implement `Debug`), build an array or `Vec` of cases and
/// call one of the `test_each` methods with the check as a closure. Every
/// case runs, even after a failure. If any case panics, the method panics
/// once at the end with the number of failures and the position and debug
/// representation of each failing case.
///
/// ```
/// use ncarray_testing::TestCases;
///
/// fn element_count(shape: &[usize]) -> usize {
///     shape.iter().product()
/// }
///
/// #[derive(Debug)]
/// struct Case<'a> {
///     shape: &'a [usize],
///     len: usize,
/// }
///
/// let cases = [
///     Case { shape: &[2, 3], len: 6 },
///     Case { shape: &[], len: 1 },
///     Case { shape: &[4, 0], len: 0 },
/// ];
///
/// cases.test_each(|case| {
///     assert_eq!(element_count(case.shape), case.len);
/// });
/// ```
///
/// Cases and the captures of the closure must be unwind safe, since panics
/// are caught with [`catch_unwind`]. Values that are not can be built inside
/// the closure, or wrapped in [`AssertUnwindSafe`](std::panic::AssertUnwindSafe).
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Run `test` with a reference to each case.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Run `test` with a clone of each case.
    fn test_each_clone(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + Clone + UnwindSafe;

    /// Run `test` with each case by value.
    ///
    /// The debug representation of each case is captured before the test
    /// runs, so cases need not be `Clone`.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

/// Panic with a summary if any cases failed.
fn report(failures: Vec<(usize, String)>) {
    if failures.is_empty() {
        return;
    }
    let details: Vec<String> = failures
        .iter()
        .map(|(pos, case)| format!("#{}: {}", pos, case))
        .collect();
    panic!(
        "{} test cases failed:\n{}",
        failures.len(),
        details.join("\n")
    );
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe,
    {
        let failures = self
            .into_iter()
            .enumerate()
            .filter(|(_, case)| catch_unwind(|| test(case)).is_err())
            .map(|(pos, case)| (pos, format!("{:?}", case)))
            .collect();
        report(failures);
    }

    fn test_each_clone(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + Clone + UnwindSafe,
    {
        let test = &test;
        let failures = self
            .into_iter()
            .enumerate()
            .filter(|(_, case)| {
                let case = case.clone();
                catch_unwind(move || test(case)).is_err()
            })
            .map(|(pos, case)| (pos, format!("{:?}", case)))
            .collect();
        report(failures);
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe,
    {
        let test = &test;
        let mut failures = Vec::new();
        for (pos, case) in self.into_iter().enumerate() {
            let case_str = format!("{:?}", case);
            if catch_unwind(move || test(case)).is_err() {
                failures.push((pos, case_str));
            }
        }
        report(failures);
    }
}
