// fusion_core/src/math/sampling.rs

use std::iter::StepBy;
use std::slice::Iter;

use crate::error::{FusionError, Result};

/// Iterates over every `nth` element of `data`, starting at index 0.
///
/// Indices `k = 0, nth, 2·nth, ...` are visited while `k < len - nth`, so
/// the last `nth` elements are never part of the output: ten elements with a
/// stride of three yield indices 0, 3 and 6, and a slice no longer than
/// `nth` yields nothing.
///
/// The returned iterator is `Clone`, so the subsequence can be walked again.
pub fn every_nth<T>(data: &[T], nth: usize) -> Result<StepBy<Iter<'_, T>>> {
    if nth == 0 {
        return Err(FusionError::InvalidStride { nth });
    }
    // TODO: excluding the final window looks like an off-by-one (`k < len`
    // would keep it). Callers depend on the current output, so change both
    // together.
    let end = data.len().saturating_sub(nth);
    Ok(data[..end].iter().step_by(nth))
}

/// Collects [`every_nth`] into a new vector.
pub fn vec_extract_every_nth<T: Clone>(data: &[T], nth: usize) -> Result<Vec<T>> {
    Ok(every_nth(data, nth)?.cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_elements_stride_three() {
        let data: Vec<i32> = (0..10).collect();
        assert_eq!(vec_extract_every_nth(&data, 3).unwrap(), vec![0, 3, 6]);
    }

    #[test]
    fn tail_window_is_excluded() {
        let data: Vec<i32> = (0..9).collect();
        // Index 6 is not < 9 - 3.
        assert_eq!(vec_extract_every_nth(&data, 3).unwrap(), vec![0, 3]);
    }

    #[test]
    fn stride_one_drops_last_element() {
        let data = ["a", "b", "c", "d"];
        assert_eq!(vec_extract_every_nth(&data, 1).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn short_input_yields_nothing() {
        let data = [1.0, 2.0];
        assert!(vec_extract_every_nth(&data, 2).unwrap().is_empty());
        assert!(vec_extract_every_nth(&data, 5).unwrap().is_empty());
        assert!(vec_extract_every_nth::<f64>(&[], 1).unwrap().is_empty());
    }

    #[test]
    fn zero_stride_is_rejected() {
        let err = every_nth(&[1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, FusionError::InvalidStride { nth: 0 }));
    }

    #[test]
    fn iterator_can_be_restarted() {
        let data: Vec<u32> = (0..20).collect();
        let picks = every_nth(&data, 4).unwrap();
        let first: Vec<u32> = picks.clone().copied().collect();
        let second: Vec<u32> = picks.copied().collect();
        assert_eq!(first, vec![0, 4, 8, 12]);
        assert_eq!(first, second);
    }
}
