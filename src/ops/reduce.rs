use crate::ops::{number_values, OpError};
use crate::ValueView;

/// Decides which values of an array are missing data.
pub trait MissingEvaluator {
    /// Return true if the array may contain missing values.
    ///
    /// [`is_missing`](MissingEvaluator::is_missing) is only consulted when
    /// this returns true.
    fn has_missing(&self) -> bool;

    /// Return true if `value` is missing.
    fn is_missing(&self, value: f64) -> bool;
}

/// Minimum and maximum of a set of values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Result for an empty set of values.
    pub const EMPTY: MinMax = MinMax {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    pub fn new(min: f64, max: f64) -> MinMax {
        MinMax { min, max }
    }

    /// Return true if no value has been included.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Return the range extended to include `value`.
    ///
    /// NaN values are ignored.
    fn include(self, value: f64) -> MinMax {
        MinMax {
            min: if value < self.min { value } else { self.min },
            max: if value > self.max { value } else { self.max },
        }
    }
}

/// Return the evaluator if it is enabled.
fn enabled(evaluator: Option<&dyn MissingEvaluator>) -> Option<&dyn MissingEvaluator> {
    evaluator.filter(|eval| eval.has_missing())
}

/// Return the sum of all elements of a numeric array, accumulated as `f64`.
pub fn sum(view: &ValueView) -> Result<f64, OpError> {
    Ok(number_values(view)?.sum())
}

/// Return the sum of the elements which are not missing.
pub fn sum_skip_missing(
    view: &ValueView,
    evaluator: Option<&dyn MissingEvaluator>,
) -> Result<f64, OpError> {
    let evaluator = enabled(evaluator);
    Ok(number_values(view)?
        .filter(|&value| !evaluator.is_some_and(|eval| eval.is_missing(value)))
        .sum())
}

/// Return the minimum and maximum of all elements of a numeric array.
///
/// An empty array yields [`MinMax::EMPTY`].
pub fn min_max(view: &ValueView) -> Result<MinMax, OpError> {
    min_max_skip_missing(view, None)
}

/// Return the minimum and maximum of the elements which are not missing.
///
/// The evaluator is ignored unless its `has_missing` method returns true.
/// If every element is skipped the result is [`MinMax::EMPTY`].
pub fn min_max_skip_missing(
    view: &ValueView,
    evaluator: Option<&dyn MissingEvaluator>,
) -> Result<MinMax, OpError> {
    let evaluator = enabled(evaluator);
    Ok(number_values(view)?
        .filter(|&value| !evaluator.is_some_and(|eval| eval.is_missing(value)))
        .fold(MinMax::EMPTY, MinMax::include))
}

#[cfg(test)]
mod tests {
    use ncarray_testing::TestCases;
    use ncarray_view::{Range, Section};

    use super::{min_max, min_max_skip_missing, sum, sum_skip_missing, MinMax, MissingEvaluator};
    use crate::ops::OpError;
    use crate::{DataType, ValueView};

    struct FillValues {
        has_missing: bool,
        missing: Vec<f64>,
    }

    impl MissingEvaluator for FillValues {
        fn has_missing(&self) -> bool {
            self.has_missing
        }

        fn is_missing(&self, value: f64) -> bool {
            self.missing.contains(&value)
        }
    }

    #[test]
    fn test_min_max_skip_missing_gate() {
        let data = [1i32, 2, 3, 4, 5, 6];
        let view = ValueView::factory(DataType::Int, &[2, 3], &data).unwrap();

        let disabled = FillValues {
            has_missing: false,
            missing: vec![1., 6.],
        };
        assert_eq!(
            min_max_skip_missing(&view, Some(&disabled)),
            Ok(MinMax::new(1., 6.))
        );

        let enabled = FillValues {
            has_missing: true,
            missing: vec![1., 6.],
        };
        assert_eq!(
            min_max_skip_missing(&view, Some(&enabled)),
            Ok(MinMax::new(2., 5.))
        );
        assert_eq!(sum_skip_missing(&view, Some(&enabled)), Ok(14.));
        assert_eq!(sum_skip_missing(&view, Some(&disabled)), Ok(21.));
    }

    #[test]
    fn test_min_max_empty() {
        let data: [f32; 0] = [];
        let view = ValueView::factory(DataType::Float, &[0, 3], &data).unwrap();
        let result = min_max(&view).unwrap();
        assert_eq!(result, MinMax::EMPTY);
        assert!(result.is_empty());

        let data = [7u16];
        let view = ValueView::factory(DataType::UShort, &[1], &data).unwrap();
        let all_missing = FillValues {
            has_missing: true,
            missing: vec![7.],
        };
        assert_eq!(
            min_max_skip_missing(&view, Some(&all_missing)),
            Ok(MinMax::EMPTY)
        );
    }

    #[test]
    fn test_sum() {
        #[derive(Debug)]
        struct Case {
            section: Option<Section>,
            expected: f64,
        }

        let cases = [
            Case {
                section: None,
                expected: 21.,
            },
            Case {
                section: Some(Section::new(vec![
                    None,
                    None,
                    Some(Range::with_stride(0, 2, 2).unwrap()),
                ])),
                expected: 14.,
            },
            Case {
                section: Some("0,1,:".parse().unwrap()),
                expected: 15.,
            },
        ];

        cases.test_each(|case| {
            let data = [1i8, 2, 3, 4, 5, 6];
            let view = ValueView::factory(DataType::Byte, &[1, 2, 3], &data).unwrap();
            let view = match &case.section {
                Some(section) => view.section(section).unwrap(),
                None => view,
            };
            assert_eq!(sum(&view), Ok(case.expected));
        })
    }

    #[test]
    fn test_min_max_kinds() {
        let bytes = [200u8, 3, 17];
        let view = ValueView::factory(DataType::UByte, &[3], &bytes).unwrap();
        assert_eq!(min_max(&view), Ok(MinMax::new(3., 200.)));

        let view = ValueView::factory(DataType::Enum1, &[3], &bytes).unwrap();
        assert_eq!(min_max(&view), Ok(MinMax::new(3., 200.)));

        let doubles = [0.5, f64::NAN, -2.5];
        let view = ValueView::factory(DataType::Double, &[3], &doubles).unwrap();
        assert_eq!(min_max(&view), Ok(MinMax::new(-2.5, 0.5)));
    }

    #[test]
    fn test_not_numeric() {
        let chars = *b"abc";
        let view = ValueView::factory(DataType::Char, &[3], &chars).unwrap();
        assert_eq!(sum(&view), Err(OpError::NotNumeric(DataType::Char)));

        let strings = vec!["x".to_string()];
        let view = ValueView::factory(DataType::String, &[1], &strings).unwrap();
        assert_eq!(min_max(&view), Err(OpError::NotNumeric(DataType::String)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_min_max() {
        let min_max = MinMax::new(-1.5, 4.);
        let json = serde_json::to_value(min_max).unwrap();
        assert_eq!(json, serde_json::json!({"min": -1.5, "max": 4.0}));
    }
}
