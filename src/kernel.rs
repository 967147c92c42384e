//! Covariance kernels.
//!
//! The surrogate only ever talks to the [`Kernel`] trait; any symmetric,
//! positive-semidefinite covariance function can be plugged in. Two stock
//! stationary kernels are provided: [`Matern`] and [`Rbf`].
//!
//! Point sets are passed as matrices with **one point per row**. The
//! surrogate hands kernels standardized inputs, so a unit length scale is
//! a reasonable default.
//!
//! # Examples
//!
//! ```
//! use bayes_opt::kernel::{Kernel, Matern, Smoothness};
//! use nalgebra::DMatrix;
//!
//! let kernel = Matern::new(Smoothness::FiveHalves).length_scale(0.5);
//! let points = DMatrix::from_row_slice(3, 1, &[0.0, 0.5, 1.0]);
//! let k = kernel.self_covariance(&points);
//!
//! assert_eq!(k.shape(), (3, 3));
//! assert!((k[(0, 0)] - 1.0).abs() < 1e-12);
//! ```

use nalgebra::DMatrix;

/// A covariance function over point sets.
///
/// Implementations must return a symmetric positive-semidefinite matrix
/// from [`self_covariance`](Kernel::self_covariance).
pub trait Kernel {
    /// Cross-covariance between the rows of `a` and the rows of `b`,
    /// shaped `a.nrows() x b.nrows()`.
    fn covariance(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> DMatrix<f64>;

    /// Covariance of the rows of `a` with themselves.
    fn self_covariance(&self, a: &DMatrix<f64>) -> DMatrix<f64> {
        self.covariance(a, a)
    }
}

impl<K: Kernel + ?Sized> Kernel for Box<K> {
    fn covariance(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> DMatrix<f64> {
        (**self).covariance(a, b)
    }

    fn self_covariance(&self, a: &DMatrix<f64>) -> DMatrix<f64> {
        (**self).self_covariance(a)
    }
}

/// Smoothness parameter ν of the Matérn family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Smoothness {
    /// ν = 1/2, the exponential kernel. Sample paths are rough.
    Half,
    /// ν = 3/2, once-differentiable sample paths.
    ThreeHalves,
    /// ν = 5/2, twice-differentiable sample paths.
    #[default]
    FiveHalves,
}

const SQRT_3: f64 = 1.732_050_807_568_877_2;
const SQRT_5: f64 = 2.236_067_977_499_79;

/// Matérn kernel with an isotropic length scale.
///
/// With `r = ‖a − b‖ / ℓ`:
/// - ν = 1/2: `σ² exp(−r)`
/// - ν = 3/2: `σ² (1 + √3 r) exp(−√3 r)`
/// - ν = 5/2: `σ² (1 + √5 r + 5/3 r²) exp(−√5 r)`
#[derive(Clone, Debug, PartialEq)]
pub struct Matern {
    smoothness: Smoothness,
    length_scale: f64,
    signal_variance: f64,
}

impl Matern {
    /// Matérn kernel with unit length scale and unit signal variance.
    #[must_use]
    pub fn new(smoothness: Smoothness) -> Self {
        Self {
            smoothness,
            length_scale: 1.0,
            signal_variance: 1.0,
        }
    }

    /// Sets the length scale ℓ. Must be positive.
    #[must_use]
    pub fn length_scale(mut self, length_scale: f64) -> Self {
        self.length_scale = length_scale;
        self
    }

    /// Sets the signal variance σ². Must be positive.
    #[must_use]
    pub fn signal_variance(mut self, signal_variance: f64) -> Self {
        self.signal_variance = signal_variance;
        self
    }

    fn eval(&self, sq_dist: f64) -> f64 {
        let r = sq_dist.sqrt() / self.length_scale;
        let shape = match self.smoothness {
            Smoothness::Half => (-r).exp(),
            Smoothness::ThreeHalves => {
                let s = SQRT_3 * r;
                (1.0 + s) * (-s).exp()
            }
            Smoothness::FiveHalves => {
                let s = SQRT_5 * r;
                (1.0 + s + 5.0 / 3.0 * r * r) * (-s).exp()
            }
        };
        self.signal_variance * shape
    }
}

impl Default for Matern {
    fn default() -> Self {
        Self::new(Smoothness::default())
    }
}

impl Kernel for Matern {
    fn covariance(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> DMatrix<f64> {
        pairwise(a, b, |d2| self.eval(d2))
    }
}

/// Squared-exponential (RBF) kernel: `σ² exp(−‖a − b‖² / (2ℓ²))`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rbf {
    length_scale: f64,
    signal_variance: f64,
}

impl Rbf {
    /// RBF kernel with the given length scale and unit signal variance.
    #[must_use]
    pub fn new(length_scale: f64) -> Self {
        Self {
            length_scale,
            signal_variance: 1.0,
        }
    }

    /// Sets the signal variance σ².
    #[must_use]
    pub fn signal_variance(mut self, signal_variance: f64) -> Self {
        self.signal_variance = signal_variance;
        self
    }
}

impl Default for Rbf {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Kernel for Rbf {
    fn covariance(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> DMatrix<f64> {
        let scale = 2.0 * self.length_scale * self.length_scale;
        pairwise(a, b, |d2| self.signal_variance * (-d2 / scale).exp())
    }
}

/// Apply a stationary kernel profile to every pair of rows.
fn pairwise(a: &DMatrix<f64>, b: &DMatrix<f64>, profile: impl Fn(f64) -> f64) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), b.nrows(), |i, j| {
        let sq_dist: f64 = a
            .row(i)
            .iter()
            .zip(b.row(j).iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum();
        profile(sq_dist)
    })
}
