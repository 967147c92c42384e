/// Errors returned by the optimizer, the surrogate model, and bounds handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a lower bound is greater than the upper bound, or either is not finite.
    #[error("invalid bounds for '{name}': low ({low}) must be finite and less than or equal to high ({high})")]
    InvalidBounds {
        /// The parameter name.
        name: String,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when constructing bounds without any parameter.
    #[error("bounds must contain at least one parameter")]
    EmptyBounds,

    /// Returned when the same parameter name appears twice in the bounds.
    #[error("duplicate parameter '{0}'")]
    DuplicateParameter(String),

    /// Returned when a name does not match any bounded parameter.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Returned when a point omits one of the bounded parameters.
    #[error("missing value for parameter '{0}'")]
    MissingParameter(String),

    /// Returned when explore values have different lengths across parameters.
    #[error(
        "every parameter must supply the same number of explore values: '{name}' has {got}, expected {expected}"
    )]
    ExploreLengthMismatch {
        /// The first parameter whose length differs.
        name: String,
        /// The length of the first parameter's explore values.
        expected: usize,
        /// The length found for `name`.
        got: usize,
    },

    /// Returned when a point or matrix has the wrong number of dimensions.
    #[error("dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch {
        /// The expected number of dimensions.
        expected: usize,
        /// The actual number of dimensions.
        got: usize,
    },

    /// Returned when fitting the surrogate on zero observations.
    #[error("surrogate requires at least one observation")]
    EmptyTrainingSet,

    /// Returned when predicting with a surrogate that has never been fitted.
    #[error("surrogate has not been fitted")]
    NotFitted,

    /// Returned when the regularized covariance matrix has no Cholesky factor.
    #[error(
        "covariance matrix is not positive definite after adding regularization {regularization}"
    )]
    NotPositiveDefinite {
        /// The ridge added to the diagonal before factorization.
        regularization: f64,
    },

    /// Returned when the UCB exploration weight is negative or not finite.
    #[error("kappa must be finite and non-negative, got {0}")]
    InvalidKappa(f64),

    /// Returned when the diagonal regularization is negative or not finite.
    #[error("regularization must be finite and non-negative, got {0}")]
    InvalidRegularization(f64),

    /// Returned when a result is requested before anything was observed.
    #[error("no observations recorded")]
    NoObservations,

    /// Returned when stepping an optimizer whose history was never seeded.
    #[error("optimizer has not been initialized")]
    NotInitialized,

    /// Returned when the objective function fails.
    #[error("objective failed: {0}")]
    Objective(String),
}

/// Convenience alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
