// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use lwm2m_api_core::common::Lwm2mError;
use lwm2m_api_core::object_path::ObjectInstanceId;

pub const DEFAULT_MEASURED_DISTANCE_CM: u32 = 10;

/// Distance between the sensor and the surface of the substance, in centimeters.
pub trait DistanceSourceAPI {
    fn measured_distance(&mut self, instance_id: ObjectInstanceId, value: f64) -> Result<u32, Lwm2mError>;
}

/// Ignores the reported value.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance {
    pub distance_cm: u32,
}

impl Default for FixedDistance {
    fn default() -> Self {
        Self {
            distance_cm: DEFAULT_MEASURED_DISTANCE_CM,
        }
    }
}

impl DistanceSourceAPI for FixedDistance {
    fn measured_distance(&mut self, _instance_id: ObjectInstanceId, _value: f64) -> Result<u32, Lwm2mError> {
        Ok(self.distance_cm)
    }
}

/// Uses the value reported by the caller, rounded to the nearest centimeter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportedDistance;

impl DistanceSourceAPI for ReportedDistance {
    fn measured_distance(&mut self, instance_id: ObjectInstanceId, value: f64) -> Result<u32, Lwm2mError> {
        if !value.is_finite() || value < 0.0 {
            log::error!("Fill level sensor {} reported an invalid distance: {}", instance_id, value);
            return Err(Lwm2mError::InvalidConfiguration);
        }
        // `as` saturates above u32::MAX.
        Ok(value.round() as u32)
    }
}

pub fn from_settings(settings: &crate::FillLevelSettings) -> Box<dyn DistanceSourceAPI> {
    match settings.distance_source {
        crate::DistanceSourceKind::Fixed => Box::new(FixedDistance {
            distance_cm: settings.measured_distance_cm,
        }),
        crate::DistanceSourceKind::Reported => Box::new(ReportedDistance),
    }
}
