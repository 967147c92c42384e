//! Gaussian Process regression surrogate.
//!
//! [`GaussianProcess::fit`] standardizes the inputs feature-wise, centers
//! the targets, builds `K + λI` with the configured [`Kernel`] and keeps its
//! Cholesky factor. [`GaussianProcess::predict`] reuses that factor for the
//! posterior mean and covariance, so each query costs two triangular solves
//! instead of a matrix inverse.
//!
//! Normalization statistics are recomputed from scratch on every fit by
//! [`Normalization::from_data`]; nothing carries over between fits.
//!
//! # Examples
//!
//! ```
//! use bayes_opt::gp::GaussianProcess;
//! use bayes_opt::kernel::Matern;
//!
//! let mut gp = GaussianProcess::new(Matern::default(), 1e-6);
//! let x = vec![vec![0.0], vec![1.0], vec![2.0]];
//! let y = vec![0.0, 1.0, 4.0];
//! gp.fit(&x, &y).unwrap();
//!
//! let (mean, var) = gp.predict_point(&[1.0]).unwrap();
//! assert!((mean - 1.0).abs() < 1e-3);
//! assert!(var < 1e-4);
//! ```

use nalgebra::linalg::Cholesky;
use nalgebra::{DMatrix, DVector, Dyn};

use crate::error::{Error, Result};
use crate::kernel::Kernel;

/// Feature-wise input statistics and the target mean of one training set.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalization {
    /// Per-feature mean of the training inputs.
    pub x_mean: Vec<f64>,
    /// Per-feature population standard deviation of the training inputs.
    /// Features with zero spread are stored as `1.0`.
    pub x_scale: Vec<f64>,
    /// Mean of the training targets.
    pub y_mean: f64,
}

impl Normalization {
    /// Compute statistics for `x` (rows of equal width) and `y`.
    ///
    /// Callers must pass at least one row.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_data(x: &[Vec<f64>], y: &[f64]) -> Self {
        let n = x.len() as f64;
        let d = x.first().map_or(0, Vec::len);

        let x_mean: Vec<f64> = (0..d)
            .map(|j| x.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let x_scale = x_mean
            .iter()
            .enumerate()
            .map(|(j, &mean)| {
                let var = x.iter().map(|row| (row[j] - mean).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                if std > 0.0 { std } else { 1.0 }
            })
            .collect();
        let y_mean = if y.is_empty() {
            0.0
        } else {
            y.iter().sum::<f64>() / y.len() as f64
        };

        Self {
            x_mean,
            x_scale,
            y_mean,
        }
    }

    /// Standardize rows into a matrix with one point per row.
    #[must_use]
    pub fn standardize(&self, x: &[Vec<f64>]) -> DMatrix<f64> {
        DMatrix::from_fn(x.len(), self.x_mean.len(), |i, j| {
            (x[i][j] - self.x_mean[j]) / self.x_scale[j]
        })
    }
}

/// State produced by a successful fit.
struct Fitted {
    normalization: Normalization,
    /// Standardized training inputs, one point per row.
    x_train: DMatrix<f64>,
    /// Cholesky factor of `K + λI`.
    cholesky: Cholesky<f64, Dyn>,
    /// `(K + λI)⁻¹ (y − ȳ)`.
    alpha: DVector<f64>,
}

/// Gaussian Process surrogate with a fixed kernel and diagonal ridge.
pub struct GaussianProcess<K: Kernel = Box<dyn Kernel>> {
    kernel: K,
    regularization: f64,
    fitted: Option<Fitted>,
}

impl<K: Kernel> GaussianProcess<K> {
    /// Creates an unfitted surrogate.
    ///
    /// `regularization` is added to the diagonal of the training
    /// covariance. It keeps the Cholesky factorization stable and doubles
    /// as the assumed observation-noise variance.
    #[must_use]
    pub fn new(kernel: K, regularization: f64) -> Self {
        Self {
            kernel,
            regularization,
            fitted: None,
        }
    }

    /// The kernel used for covariance evaluation.
    #[must_use]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// The diagonal ridge λ.
    #[must_use]
    pub fn regularization(&self) -> f64 {
        self.regularization
    }

    /// Whether [`fit`](Self::fit) has succeeded at least once since the
    /// last failed fit.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Number of training points in the current fit.
    #[must_use]
    pub fn n_train(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.x_train.nrows())
    }

    /// Statistics of the current fit.
    #[must_use]
    pub fn normalization(&self) -> Option<&Normalization> {
        self.fitted.as_ref().map(|f| &f.normalization)
    }

    /// Lower-triangular factor `L` with `L Lᵀ = K + λI`.
    #[must_use]
    pub fn cholesky_factor(&self) -> Option<DMatrix<f64>> {
        self.fitted.as_ref().map(|f| f.cholesky.l())
    }

    /// Fit the surrogate to `x` (one point per row) and targets `y`.
    ///
    /// Any previous fit is discarded first, so a failed fit never leaves
    /// stale state behind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTrainingSet`] for zero rows,
    /// [`Error::DimensionMismatch`] when rows differ in width or `y` has a
    /// different length, and [`Error::NotPositiveDefinite`] when `K + λI`
    /// cannot be factorized.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        self.fitted = None;

        let n = x.len();
        if n == 0 {
            return Err(Error::EmptyTrainingSet);
        }
        if y.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                got: y.len(),
            });
        }
        let d = x[0].len();
        if d == 0 {
            return Err(Error::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }
        if let Some(row) = x.iter().find(|row| row.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                got: row.len(),
            });
        }

        let normalization = Normalization::from_data(x, y);
        let x_train = normalization.standardize(x);
        let y_centered = DVector::from_iterator(n, y.iter().map(|v| v - normalization.y_mean));

        let mut k = self.kernel.self_covariance(&x_train);
        for i in 0..n {
            k[(i, i)] += self.regularization;
        }
        let cholesky = Cholesky::new(k).ok_or(Error::NotPositiveDefinite {
            regularization: self.regularization,
        })?;
        let alpha = cholesky.solve(&y_centered);

        trace_debug!(n_train = n, n_dims = d, "surrogate fitted");

        self.fitted = Some(Fitted {
            normalization,
            x_train,
            cholesky,
            alpha,
        });
        Ok(())
    }

    /// Posterior mean and covariance at the query points.
    ///
    /// The variance of query `i` is `covariance[(i, i)]`. Round-off can push
    /// it slightly below zero; callers taking a square root must clamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] before the first successful fit and
    /// [`Error::DimensionMismatch`] when a query row has the wrong width.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<(DVector<f64>, DMatrix<f64>)> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let d = fitted.x_train.ncols();
        if let Some(row) = x.iter().find(|row| row.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                got: row.len(),
            });
        }

        let x_query = fitted.normalization.standardize(x);
        let k_trans = self.kernel.covariance(&x_query, &fitted.x_train);

        let mut mean = &k_trans * &fitted.alpha;
        mean.add_scalar_mut(fitted.normalization.y_mean);

        let v = fitted.cholesky.solve(&k_trans.transpose());
        let cov = self.kernel.self_covariance(&x_query) - &k_trans * v;

        Ok((mean, cov))
    }

    /// Posterior mean and (unclamped) variance at a single point.
    ///
    /// # Errors
    ///
    /// Same as [`predict`](Self::predict).
    pub fn predict_point(&self, x: &[f64]) -> Result<(f64, f64)> {
        let (mean, cov) = self.predict(&[x.to_vec()])?;
        Ok((mean[0], cov[(0, 0)]))
    }
}
