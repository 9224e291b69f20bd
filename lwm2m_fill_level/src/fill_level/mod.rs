// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-FileCopyrightText: © 2023 Siemens AG
// SPDX-License-Identifier: MIT
use lwm2m_api_core::common::Lwm2mError;
use lwm2m_api_core::ipso_filling_sensor::*;
use lwm2m_api_core::object_path::{ObjectInstanceId, ResourcePath};


/// Result of a fill level computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillReading {
    /// Height of the substance, in centimeters.
    pub level: u32,
    /// Between 0 and 100.
    pub percent: f64,
}

/// Derives the fill level of a container of `height` centimeters from the
/// distance between the sensor and the surface of the substance.
///
/// A container without a provisioned height cannot be evaluated.
pub fn compute_fill(height: u32, distance: u32) -> Result<FillReading, Lwm2mError> {
    if height == 0 {
        return Err(Lwm2mError::InvalidConfiguration);
    }

    // Don't allow a negative level (height of substance) to be reported.
    let level = height.saturating_sub(distance);
    let percent = f64::from(level as f32 / height as f32) * 100.0;

    Ok(FillReading { level, percent })
}

/// Updates filling level sensor instances through the object engine.
pub struct FillLevelSensor {
    engine: Box<dyn crate::engine::ObjectEngineAPI>,
    util: Box<dyn crate::object_util::ObjectUtilAPI>,
    distance: Box<dyn crate::distance::DistanceSourceAPI>,
}

impl FillLevelSensor {
    pub fn new(
        engine: Box<dyn crate::engine::ObjectEngineAPI>,
        util: Box<dyn crate::object_util::ObjectUtilAPI>,
        distance: Box<dyn crate::distance::DistanceSourceAPI>,
    ) -> Self {
        Self { engine, util, distance }
    }

    /// Sets the fill level of the instance bound to entry `index` of the gateway
    /// device table. The instance is created when needed; when the update fails the
    /// object manager is told so it can delete the instance.
    #[cfg(feature = "manage-obj-inst")]
    pub fn managed_set(&mut self, index: i32, offset: u16, value: f64) -> Result<(), Lwm2mError> {
        let object_id = IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID;

        let instance_id = match self.util.manage_obj_instance(object_id, index, offset) {
            Ok(instance_id) => instance_id,
            Err(err) => {
                log::error!("Unable to manage instance: {}", err);
                return Err(Lwm2mError::ResolveFailed(err.code()));
            }
        };

        let result = self.set(instance_id, value);
        if let Err(err) = result {
            self.util.manage_obj_deletion(err, object_id, index, instance_id);
        }
        result
    }

    /// Sets the fill level of an existing instance. `value` is the reported
    /// distance in centimeters, interpreted by the configured distance source.
    pub fn set(&mut self, instance_id: ObjectInstanceId, value: f64) -> Result<(), Lwm2mError> {
        let object_id = IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID;

        // Read the height so that the fill level can be calculated.
        let path = ResourcePath::new(object_id, instance_id, CONTAINER_HEIGHT_FILLING_SENSOR_RID).to_path_string()?;
        let height = match self.engine.get_u32(&path) {
            Ok(height) => height,
            Err(err) => {
                log::error!("Unable to read height of {}: {}", path, err);
                return Err(Lwm2mError::NotFound);
            }
        };
        if height == 0 {
            log::error!("Container height of fill level sensor {} is not provisioned", instance_id);
            return Err(Lwm2mError::InvalidConfiguration);
        }

        let distance = self.distance.measured_distance(instance_id, value)?;
        let reading = compute_fill(height, distance)?;

        log::debug!(
            "height: {} level: {} measured distance: {} percent: {}",
            height,
            reading.level,
            distance,
            reading.percent as u32
        );

        // Optional resource, the update stands without it.
        let path = ResourcePath::new(object_id, instance_id, ACTUAL_FILL_LEVEL_FILLING_SENSOR_RID).to_path_string()?;
        if let Err(err) = self.engine.set_u32(&path, reading.level) {
            log::warn!("Unable to write fill level {}: {}", path, err);
        }

        // Writing this resource causes full/empty to be re-evaluated.
        let path = ResourcePath::new(object_id, instance_id, ACTUAL_FILL_PERCENTAGE_FILLING_SENSOR_RID).to_path_string()?;
        self.engine
            .set_float(&path, reading.percent)
            .map_err(|err| Lwm2mError::WriteFailed(err.code()))
    }

    /// Creates an instance; the registered agent finishes its setup.
    pub fn create(&mut self, instance_id: ObjectInstanceId) -> Result<(), Lwm2mError> {
        self.util.create_obj_inst(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, instance_id)
    }
}
