use thiserror::Error;

use super::{DEFAULT_RADIUS, FULL_CIRCLE};

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RadialError {
    #[error("radius must be greater than 0, got {0}")]
    Radius(f64),
    #[error("inner radius percent must be within [0, 1), got {0}")]
    InnerRadiusPercent(f64),
    #[error("start offset must be within [0, 360) degrees, got {0}")]
    StartOffset(f64),
    #[error("total degrees drawn must be within (0, 360], got {0}")]
    TotalDegrees(f64),
}

/// Shape of the ring. Every setter validates its value and leaves the
/// configuration untouched when the value is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialConfig {
    radius: f64,
    inner_radius_percent: f64,
    start_offset_degrees: f64,
    total_degrees_drawn: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            inner_radius_percent: 0.0,
            start_offset_degrees: 0.0,
            total_degrees_drawn: FULL_CIRCLE,
        }
    }
}

impl RadialConfig {
    pub fn new(
        radius: f64,
        inner_radius_percent: f64,
        start_offset_degrees: f64,
        total_degrees_drawn: f64,
    ) -> Result<Self, RadialError> {
        Ok(Self {
            radius: validate_radius(radius)?,
            inner_radius_percent: validate_inner_radius_percent(inner_radius_percent)?,
            start_offset_degrees: validate_start_offset(start_offset_degrees)?,
            total_degrees_drawn: validate_total_degrees(total_degrees_drawn)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn inner_radius_percent(&self) -> f64 {
        self.inner_radius_percent
    }

    pub fn start_offset_degrees(&self) -> f64 {
        self.start_offset_degrees
    }

    pub fn total_degrees_drawn(&self) -> f64 {
        self.total_degrees_drawn
    }

    /// Radius of the hole at the center. Always strictly less than `radius`.
    pub fn inner_radius_length(&self) -> f64 {
        self.radius * self.inner_radius_percent
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), RadialError> {
        self.radius = validate_radius(radius)?;
        Ok(())
    }

    pub fn set_inner_radius_percent(&mut self, percent: f64) -> Result<(), RadialError> {
        self.inner_radius_percent = validate_inner_radius_percent(percent)?;
        Ok(())
    }

    pub fn set_start_offset_degrees(&mut self, degrees: f64) -> Result<(), RadialError> {
        self.start_offset_degrees = validate_start_offset(degrees)?;
        Ok(())
    }

    pub fn set_total_degrees_drawn(&mut self, degrees: f64) -> Result<(), RadialError> {
        self.total_degrees_drawn = validate_total_degrees(degrees)?;
        Ok(())
    }
}

fn validate_radius(radius: f64) -> Result<f64, RadialError> {
    (radius > 0.0 && radius.is_finite())
        .then_some(radius)
        .ok_or(RadialError::Radius(radius))
}

fn validate_inner_radius_percent(percent: f64) -> Result<f64, RadialError> {
    (0.0..1.0)
        .contains(&percent)
        .then_some(percent)
        .ok_or(RadialError::InnerRadiusPercent(percent))
}

fn validate_start_offset(degrees: f64) -> Result<f64, RadialError> {
    (0.0..FULL_CIRCLE)
        .contains(&degrees)
        .then_some(degrees)
        .ok_or(RadialError::StartOffset(degrees))
}

fn validate_total_degrees(degrees: f64) -> Result<f64, RadialError> {
    (degrees > 0.0 && degrees <= FULL_CIRCLE)
        .then_some(degrees)
        .ok_or(RadialError::TotalDegrees(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_values() {
        assert_eq!(
            RadialConfig::new(-1.0, 0.0, 0.0, 360.0),
            Err(RadialError::Radius(-1.0))
        );
        assert_eq!(
            RadialConfig::new(100.0, 1.0, 0.0, 360.0),
            Err(RadialError::InnerRadiusPercent(1.0))
        );
        assert_eq!(
            RadialConfig::new(100.0, 0.5, 360.0, 360.0),
            Err(RadialError::StartOffset(360.0))
        );
        assert_eq!(
            RadialConfig::new(100.0, 0.5, 0.0, 0.0),
            Err(RadialError::TotalDegrees(0.0))
        );
        assert!(RadialConfig::new(f64::NAN, 0.0, 0.0, 360.0).is_err());
        assert!(RadialConfig::new(100.0, 0.0, 0.0, 360.0).is_ok());
    }

    #[test]
    fn test_rejected_setter_keeps_previous_value() {
        let mut config = RadialConfig::new(80.0, 0.25, 90.0, 180.0).unwrap();

        assert!(config.set_radius(0.0).is_err());
        assert!(config.set_inner_radius_percent(-0.1).is_err());
        assert!(config.set_start_offset_degrees(-10.0).is_err());
        assert!(config.set_total_degrees_drawn(400.0).is_err());

        assert_eq!(config, RadialConfig::new(80.0, 0.25, 90.0, 180.0).unwrap());
    }

    #[test]
    fn test_inner_radius_length_stays_below_radius() {
        let config = RadialConfig::new(200.0, 0.999, 0.0, 360.0).unwrap();
        assert!(config.inner_radius_length() < config.radius());
        assert_eq!(
            RadialConfig::new(200.0, 0.5, 0.0, 360.0)
                .unwrap()
                .inner_radius_length(),
            100.0
        );
    }

    #[test]
    fn test_error_messages_name_the_value() {
        let err = RadialConfig::new(100.0, 0.0, 0.0, 361.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "total degrees drawn must be within (0, 360], got 361"
        );
    }
}
