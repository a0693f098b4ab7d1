//! This file defines some functions that checks some pre-conditions
//! E.g., the range of parameters

use crate::error::ConfigError;


/// Check whether the beam width is valid or not.
#[inline(always)]
pub(crate) fn beam_width(width: usize) -> Result<(), ConfigError> {
    if width == 0 {
        return Err(ConfigError::BeamWidth(width));
    }
    Ok(())
}


/// Check the decay factor of the multiplicative weighting.
#[inline(always)]
pub(crate) fn gamma(gamma: f64) -> Result<(), ConfigError> {
    if !(gamma > 0f64 && gamma < 1f64) {
        return Err(ConfigError::Gamma(gamma));
    }
    Ok(())
}


/// Check the acceptance threshold.
#[inline(always)]
pub(crate) fn min_wracc(min_wracc: f64) -> Result<(), ConfigError> {
    if !min_wracc.is_finite() {
        return Err(ConfigError::MinWracc(min_wracc));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_width_success() {
        assert!(beam_width(1).is_ok());
        assert!(beam_width(100).is_ok());
    }

    #[test]
    fn test_beam_width_failure() {
        assert!(beam_width(0).is_err());
    }

    #[test]
    fn test_gamma_success() {
        assert!(gamma(0.5).is_ok());
        assert!(gamma(1e-6).is_ok());
    }

    #[test]
    fn test_gamma_failure_01() {
        assert!(gamma(0f64).is_err());
    }

    #[test]
    fn test_gamma_failure_02() {
        assert!(gamma(1f64).is_err());
    }

    #[test]
    fn test_gamma_failure_03() {
        assert!(gamma(f64::NAN).is_err());
    }

    #[test]
    fn test_min_wracc() {
        assert!(min_wracc(-0.1).is_ok());
        assert!(min_wracc(f64::INFINITY).is_err());
        assert!(min_wracc(f64::NAN).is_err());
    }
}
