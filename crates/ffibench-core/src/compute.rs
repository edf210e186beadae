//! The payload functions whose cost is measured across the boundary.
//!
//! Both functions are deterministic, side-effect-free and allocation-free so
//! that their internal timing is stable and attributable.

use crate::error::ComputeError;

/// A borrowed, validated sequence of finite `f64` values.
///
/// Construction is the argument-decoding step: it runs before the timing
/// bracket opens, so the finiteness scan never counts as internal time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatSeq<'a> {
    values: &'a [f64],
}

impl<'a> FloatSeq<'a> {
    /// Validate `values`, rejecting the first NaN or infinite element.
    pub fn new(values: &'a [f64]) -> Result<Self, ComputeError> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(ComputeError::NonFiniteInput {
                index,
                value: values[index],
            }),
            None => Ok(Self { values }),
        }
    }

    /// The underlying slice.
    pub fn as_slice(&self) -> &'a [f64] {
        self.values
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Add two `i64` values, failing instead of wrapping on overflow.
pub fn sum_as_i64(a: i64, b: i64) -> Result<i64, ComputeError> {
    a.checked_add(b).ok_or(ComputeError::IntegerOverflow { a, b })
}

/// Sum `values` by sequential left-to-right accumulation from `0.0`.
///
/// Rounding follows the element order; no compensated or pairwise
/// summation is applied. The empty sequence sums to `0.0`.
pub fn sum_list_of_floats(values: FloatSeq<'_>) -> Result<f64, ComputeError> {
    let sum = values.as_slice().iter().fold(0.0_f64, |acc, &v| acc + v);
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(ComputeError::NonFiniteSum { sum })
    }
}
