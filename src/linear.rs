use crate::{Float, SolveError};

fn check_pivot(pivot: Float, size: usize, row: usize) -> Result<Float, SolveError> {
    if pivot == 0.0 || !pivot.is_finite() {
        Err(SolveError::SingularSystem { size, row })
    } else {
        Ok(pivot)
    }
}

/// First non-finite entry of `values`, reported as `what`.
pub(crate) fn check_finite(values: &[Float], what: &'static str) -> Result<(), SolveError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SolveError::NonFinite { what, index }),
        None => Ok(()),
    }
}

/// Tridiagonal system `lower[i] x[i-1] + diag[i] x[i] + upper[i] x[i+1] = rhs[i]`.
///
/// `lower[0]` and `upper[size - 1]` are never read.
#[derive(Debug, Clone, Default)]
pub struct Tridiagonal {
    pub lower: Vec<Float>,
    pub diag: Vec<Float>,
    pub upper: Vec<Float>,
    pub rhs: Vec<Float>,
    // forward-sweep scratch
    c: Vec<Float>,
    d: Vec<Float>,
}

impl Tridiagonal {
    pub fn with_size(size: usize) -> Self {
        let mut out = Self::default();
        out.resize(size);
        out
    }

    pub fn resize(&mut self, size: usize) {
        for v in [
            &mut self.lower,
            &mut self.diag,
            &mut self.upper,
            &mut self.rhs,
            &mut self.c,
            &mut self.d,
        ] {
            v.clear();
            v.resize(size, 0.0);
        }
    }

    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Thomas algorithm, writing the solution into `out`.
    ///
    /// No pivoting: the system is expected to be diagonally dominant.
    pub fn solve_to(&mut self, out: &mut [Float]) -> Result<(), SolveError> {
        let n = self.size();
        assert_eq!(out.len(), n);
        if n == 0 {
            return Ok(());
        }

        let pivot = check_pivot(self.diag[0], n, 0)?;
        self.c[0] = self.upper[0] / pivot;
        self.d[0] = self.rhs[0] / pivot;
        for i in 1..n {
            let pivot = check_pivot(self.diag[i] - self.lower[i] * self.c[i - 1], n, i)?;
            self.c[i] = if i + 1 < n { self.upper[i] / pivot } else { 0.0 };
            self.d[i] = (self.rhs[i] - self.lower[i] * self.d[i - 1]) / pivot;
        }

        out[n - 1] = self.d[n - 1];
        for i in (0..n - 1).rev() {
            out[i] = self.d[i] - self.c[i] * out[i + 1];
        }
        Ok(())
    }

    pub fn solve(&mut self) -> Result<Vec<Float>, SolveError> {
        let mut out = vec![0.0; self.size()];
        self.solve_to(&mut out)?;
        Ok(out)
    }
}

/// Square sparse system in compressed sparse row layout, assembled row by row.
#[derive(Debug, Clone)]
pub struct SparseSystem {
    size: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<Float>,
    rhs: Vec<Float>,
}

impl SparseSystem {
    pub fn with_capacity(size: usize, nnz: usize) -> Self {
        let mut row_ptr = Vec::with_capacity(size + 1);
        row_ptr.push(0);
        Self {
            size,
            row_ptr,
            col_idx: Vec::with_capacity(nnz),
            values: Vec::with_capacity(nnz),
            rhs: Vec::with_capacity(size),
        }
    }

    /// Appends the next row. Duplicate columns are summed by the solver.
    pub fn push_row(&mut self, entries: &[(usize, Float)], rhs: Float) {
        assert!(self.rows() < self.size, "too many rows");
        for &(col, value) in entries {
            assert!(col < self.size, "column {col} out of bounds");
            self.col_idx.push(col);
            self.values.push(value);
        }
        self.row_ptr.push(self.col_idx.len());
        self.rhs.push(rhs);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.row_ptr.len() - 1
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn rhs(&self) -> &[Float] {
        &self.rhs
    }

    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, Float)> + '_ {
        let range = self.row_ptr[i]..self.row_ptr[i + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// `(below, above)` diagonal bandwidths.
    pub fn bandwidths(&self) -> (usize, usize) {
        (0..self.rows()).fold((0, 0), |(kl, ku), i| {
            self.row(i).fold((kl, ku), |(kl, ku), (j, _)| {
                (kl.max(i.saturating_sub(j)), ku.max(j.saturating_sub(i)))
            })
        })
    }

    pub fn mul_vec(&self, x: &[Float], y: &mut [Float]) {
        assert_eq!(x.len(), self.size);
        assert_eq!(y.len(), self.rows());
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = self.row(i).map(|(j, v)| v * x[j]).sum();
        }
    }

    /// Direct solve by banded Gaussian elimination with partial pivoting.
    ///
    /// Non-finite right-hand sides and solutions are errors.
    pub fn solve(&self) -> Result<Vec<Float>, SolveError> {
        assert_eq!(self.rows(), self.size, "system is not fully assembled");
        check_finite(&self.rhs, "right-hand side")?;
        let x = Band::from_system(self).solve()?;
        check_finite(&x, "solution")?;
        Ok(x)
    }
}

/// Dense band storage with room for the fill-in produced by row swaps:
/// row `i` keeps columns `i - kl ..= i + kl + ku`.
struct Band {
    n: usize,
    kl: usize,
    ku: usize,
    width: usize,
    data: Vec<Float>,
    rhs: Vec<Float>,
}

impl Band {
    fn from_system(system: &SparseSystem) -> Self {
        let (kl, ku) = system.bandwidths();
        let n = system.size();
        let width = 2 * kl + ku + 1;
        let mut band = Self {
            n,
            kl,
            ku,
            width,
            data: vec![0.0; n * width],
            rhs: system.rhs().to_vec(),
        };
        for i in 0..n {
            for (j, v) in system.row(i) {
                *band.at(i, j) += v;
            }
        }
        band
    }

    #[inline]
    fn at(&mut self, i: usize, j: usize) -> &mut Float {
        &mut self.data[i * self.width + j + self.kl - i]
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> Float {
        self.data[i * self.width + j + self.kl - i]
    }

    fn solve(&mut self) -> Result<Vec<Float>, SolveError> {
        let n = self.n;
        let reach = self.kl + self.ku;

        for k in 0..n {
            let last_row = (k + self.kl).min(n - 1);
            let last_col = (k + reach).min(n - 1);

            let p = (k..=last_row)
                .max_by(|&a, &b| self.get(a, k).abs().total_cmp(&self.get(b, k).abs()))
                .unwrap_or(k);
            let pivot = check_pivot(self.get(p, k), n, k)?;

            if p != k {
                for j in k..=last_col {
                    let tmp = self.get(k, j);
                    *self.at(k, j) = self.get(p, j);
                    *self.at(p, j) = tmp;
                }
                self.rhs.swap(k, p);
            }

            for r in k + 1..=last_row {
                let l = self.get(r, k) / pivot;
                if l == 0.0 {
                    continue;
                }
                *self.at(r, k) = 0.0;
                for j in k + 1..=last_col {
                    let akj = self.get(k, j);
                    *self.at(r, j) -= l * akj;
                }
                self.rhs[r] -= l * self.rhs[k];
            }
        }

        let mut x = vec![0.0; n];
        for k in (0..n).rev() {
            let last_col = (k + reach).min(n - 1);
            let s = (k + 1..=last_col).fold(self.rhs[k], |s, j| s - self.get(k, j) * x[j]);
            x[k] = s / self.get(k, k);
        }
        Ok(x)
    }
}
