//! Validated flagging parameters.

use serde::Serialize;

use iqrm_config::{IqrmConfig, DEFAULT_GEOMETRIC_FACTOR, DEFAULT_RADIUS, DEFAULT_THRESHOLD};

use crate::error::{Error, Result};

/// Radius, threshold and lag growth for one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrmParams {
    /// Maximum lag magnitude, in array elements.
    pub radius: usize,
    /// Flagging threshold in Gaussian sigmas.
    pub threshold: f64,
    /// Growth factor between consecutive lag magnitudes.
    pub geometric_factor: f64,
}

impl Default for IqrmParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            threshold: DEFAULT_THRESHOLD,
            geometric_factor: DEFAULT_GEOMETRIC_FACTOR,
        }
    }
}

impl IqrmParams {
    /// Validated parameters with the default geometric factor.
    pub fn new(radius: usize, threshold: f64) -> Result<Self> {
        let params = Self {
            radius,
            threshold,
            geometric_factor: DEFAULT_GEOMETRIC_FACTOR,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters from numbers whose integrality is not guaranteed by the
    /// type system, e.g. values coming from bindings or loosely typed files.
    ///
    /// A radius that is not a finite positive integer is an invalid radius.
    pub fn from_raw(radius: f64, threshold: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 1.0 || radius.fract() != 0.0 || radius >= usize::MAX as f64 {
            return Err(Error::InvalidRadius { value: radius });
        }
        Self::new(radius as usize, threshold)
    }

    /// Same parameters with a different lag growth factor.
    pub fn with_geometric_factor(mut self, factor: f64) -> Result<Self> {
        self.geometric_factor = factor;
        self.validate()?;
        Ok(self)
    }

    /// Check radius, then threshold, then geometric factor.
    pub fn validate(&self) -> Result<()> {
        if self.radius == 0 {
            return Err(Error::InvalidRadius {
                value: self.radius as f64,
            });
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::InvalidThreshold {
                value: self.threshold,
            });
        }
        if !self.geometric_factor.is_finite() || self.geometric_factor < 1.0 {
            return Err(Error::InvalidGeometricFactor {
                value: self.geometric_factor,
            });
        }
        Ok(())
    }
}

impl TryFrom<&IqrmConfig> for IqrmParams {
    type Error = Error;

    fn try_from(config: &IqrmConfig) -> Result<Self> {
        IqrmParams::new(config.radius, config.threshold)?
            .with_geometric_factor(config.geometric_factor)
    }
}
