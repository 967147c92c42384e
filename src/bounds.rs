//! Named, ordered box bounds for the search space.
//!
//! A [`Bounds`] value fixes the dimension order used everywhere inside the
//! optimizer: row vectors in the evaluation history, the surrogate's
//! training matrix, and the candidates returned by the acquisition
//! maximizer all follow the order in which parameters were declared.
//!
//! # Examples
//!
//! ```
//! use bayes_opt::Bounds;
//!
//! let mut bounds = Bounds::new([("x", (-10.0, 10.0)), ("y", (0.0, 1.0))]).unwrap();
//! bounds.update([("y", (0.0, 5.0))]).unwrap();
//!
//! assert_eq!(bounds.names().collect::<Vec<_>>(), ["x", "y"]);
//! assert_eq!(bounds.get("y").unwrap().high, 5.0);
//! ```

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parameter assignment keyed by parameter name.
pub type Params = HashMap<String, f64>;

/// Closed interval `[low, high]` for one named parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamBound {
    /// Parameter name.
    pub name: String,
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
}

impl ParamBound {
    fn validated(name: String, low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(Error::InvalidBounds { name, low, high });
        }
        Ok(Self { name, low, high })
    }

    /// Width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Ordered search-space bounds. The dimension count never changes after
/// construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    params: Vec<ParamBound>,
}

impl Bounds {
    /// Build bounds from `(name, (low, high))` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBounds`] when no pair is given,
    /// [`Error::DuplicateParameter`] when a name repeats, and
    /// [`Error::InvalidBounds`] when `low > high` or a bound is not finite.
    pub fn new<I, S>(bounds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, (f64, f64))>,
        S: Into<String>,
    {
        let mut params: Vec<ParamBound> = Vec::new();
        for (name, (low, high)) in bounds {
            let name = name.into();
            if params.iter().any(|p| p.name == name) {
                return Err(Error::DuplicateParameter(name));
            }
            params.push(ParamBound::validated(name, low, high)?);
        }
        if params.is_empty() {
            return Err(Error::EmptyBounds);
        }
        Ok(Self { params })
    }

    /// Number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Always `false`: bounds hold at least one parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over the bounds in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamBound> {
        self.params.iter()
    }

    /// Iterate over the parameter names in dimension order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Look up the bound for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamBound> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Dimension index of `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// Replace the bounds of the named parameters, keeping every other
    /// parameter and the dimension order untouched.
    ///
    /// The update is all-or-nothing: if any entry is rejected the bounds
    /// are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] for a name that is not already
    /// bounded and [`Error::InvalidBounds`] for an invalid interval.
    pub fn update<I, S>(&mut self, partial: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, (f64, f64))>,
        S: Into<String>,
    {
        let mut updated = self.params.clone();
        for (name, (low, high)) in partial {
            let name = name.into();
            let idx = self
                .index_of(&name)
                .ok_or_else(|| Error::UnknownParameter(name.clone()))?;
            updated[idx] = ParamBound::validated(name, low, high)?;
        }
        self.params = updated;
        Ok(())
    }

    /// Whether `x` lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.len()
            && self
                .params
                .iter()
                .zip(x)
                .all(|(b, &v)| (b.low..=b.high).contains(&v))
    }

    /// Clamp `x` elementwise into the box.
    pub fn clip(&self, x: &mut [f64]) {
        for (v, b) in x.iter_mut().zip(&self.params) {
            *v = v.clamp(b.low, b.high);
        }
    }

    /// Label a point with parameter names.
    #[must_use]
    pub fn to_params(&self, x: &[f64]) -> Params {
        self.params
            .iter()
            .zip(x)
            .map(|(b, &v)| (b.name.clone(), v))
            .collect()
    }

    /// Turn a named assignment into a point in dimension order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] when a bounded parameter has no
    /// value and [`Error::UnknownParameter`] when `params` names a parameter
    /// that is not bounded.
    pub fn point_from_params(&self, params: &Params) -> Result<Vec<f64>> {
        if let Some(unknown) = params.keys().find(|k| self.get(k).is_none()) {
            return Err(Error::UnknownParameter(unknown.clone()));
        }
        self.params
            .iter()
            .map(|b| {
                params
                    .get(&b.name)
                    .copied()
                    .ok_or_else(|| Error::MissingParameter(b.name.clone()))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Bounds {
    type Item = &'a ParamBound;
    type IntoIter = core::slice::Iter<'a, ParamBound>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
