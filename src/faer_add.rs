use faer::Mat;
use faer_core::MatRef;

use crate::Float;

/// Column of `size` evenly spaced values from `lower` to `upper` inclusive.
pub fn linspace(lower: Float, upper: Float, size: usize) -> Mat<Float> {
    let h = (upper - lower) / (size.max(2) - 1) as Float;
    Mat::<Float>::from_fn(size, 1, |i, _| {
        if i + 1 == size {
            upper
        } else {
            lower + h * i as Float
        }
    })
}

pub fn apply_func(m: MatRef<'_, Float>, f: impl Fn(Float) -> Float) -> Mat<Float> {
    Mat::from_fn(m.nrows(), m.ncols(), |i, j| f(m[(i, j)]))
}

/// `max |a - b|` over all entries.
pub fn max_abs_error(a: MatRef<'_, Float>, b: MatRef<'_, Float>) -> Float {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));

    let mut max = 0.0 as Float;
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            max = max.max((a[(i, j)] - b[(i, j)]).abs());
        }
    }
    max
}

/// Root mean square of the entry-wise differences.
pub fn l2_error(a: MatRef<'_, Float>, b: MatRef<'_, Float>) -> Float {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));

    let mut sum = 0.0 as Float;
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            let d = a[(i, j)] - b[(i, j)];
            sum += d * d;
        }
    }
    (sum / (a.nrows() * a.ncols()).max(1) as Float).sqrt()
}
