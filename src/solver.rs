//! Dense direct solver: Gaussian elimination with partial pivoting.
//!
//! Truss models are small enough that a dense `O(n³)` elimination is the
//! simplest robust choice. The solver consumes the reduced system and works in
//! place, so no copy of the matrix is made.

use log::trace;
use ndarray::{Array1, Array2, Axis};

use crate::errors::SolverError;
use crate::reduction::ReducedSystem;

/// Relative size below which a pivot is treated as zero.
///
/// The threshold is scaled by the largest absolute entry of the matrix so it is
/// independent of the unit system.
pub const PIVOT_TOLERANCE: f64 = 1.0e-12;

/// Solve `K·D = F` for `D`.
///
/// # Errors
///
/// Returns [`SolverError::Singular`] when no acceptable pivot exists for some
/// column, which for a truss means a mechanism or missing supports, and
/// [`SolverError::DimensionMismatch`] when `K` is not square or does not match
/// the length of `F`.
///
/// # Examples
/// ```
/// use ndarray::{arr1, arr2};
/// use truss3d::{solve, ReducedSystem};
///
/// let system = ReducedSystem {
///     stiffness: arr2(&[[2.0, 1.0], [1.0, 3.0]]),
///     loads: arr1(&[5.0, 10.0]),
/// };
/// let solution = solve(system).expect("regular system");
/// assert!((solution[0] - 1.0).abs() < 1.0e-12);
/// assert!((solution[1] - 3.0).abs() < 1.0e-12);
/// ```
pub fn solve(system: ReducedSystem) -> Result<Array1<f64>, SolverError> {
    let ReducedSystem {
        stiffness: mut k,
        loads: mut f,
    } = system;
    let n = f.len();
    if k.dim() != (n, n) {
        return Err(SolverError::DimensionMismatch {
            order: k.nrows(),
            rhs: n,
        });
    }
    if n == 0 {
        return Ok(f);
    }

    let scale = k.iter().fold(0.0_f64, |acc, value| acc.max(value.abs()));
    let threshold = PIVOT_TOLERANCE * scale;

    for p in 0..n {
        let pivot_row = select_pivot(&k, p);
        let pivot = k[[pivot_row, p]];
        if !pivot.is_finite() || pivot.abs() <= threshold {
            return Err(SolverError::Singular {
                column: p,
                pivot: pivot.abs(),
            });
        }
        if pivot_row != p {
            swap_rows(&mut k, p, pivot_row);
            f.swap(p, pivot_row);
        }
        eliminate_below(&mut k, &mut f, p);
    }
    trace!("eliminated {n}x{n} system");

    Ok(back_substitute(&k, &f))
}

/// Row index in `p..n` holding the largest magnitude entry of column `p`.
///
/// Ties keep the earliest row so no swap happens needlessly.
fn select_pivot(k: &Array2<f64>, p: usize) -> usize {
    let mut best = p;
    for row in p + 1..k.nrows() {
        if k[[row, p]].abs() > k[[best, p]].abs() {
            best = row;
        }
    }
    best
}

fn swap_rows(k: &mut Array2<f64>, a: usize, b: usize) {
    for col in 0..k.ncols() {
        k.swap([a, col], [b, col]);
    }
}

/// Subtract multiples of row `p` from every row below it.
fn eliminate_below(k: &mut Array2<f64>, f: &mut Array1<f64>, p: usize) {
    let n = f.len();
    let pivot = k[[p, p]];
    for i in p + 1..n {
        let factor = k[[i, p]] / pivot;
        if factor == 0.0 {
            continue;
        }
        for j in p..n {
            k[[i, j]] -= factor * k[[p, j]];
        }
        f[i] -= factor * f[p];
    }
}

/// Solve the upper-triangular system left behind by elimination.
fn back_substitute(k: &Array2<f64>, f: &Array1<f64>) -> Array1<f64> {
    let n = f.len();
    let mut d = Array1::zeros(n);
    for i in (0..n).rev() {
        let row = k.index_axis(Axis(0), i);
        let known: f64 = (i + 1..n).map(|j| row[j] * d[j]).sum();
        d[i] = (f[i] - known) / row[i];
    }
    d
}
