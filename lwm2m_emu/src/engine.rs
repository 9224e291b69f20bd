// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use lwm2m_api_core::common::{Lwm2mError, EINVAL, ENOENT};
use lwm2m_api_core::ipso_filling_sensor::*;
use lwm2m_api_core::object_path::ResourcePath;
use lwm2m_api_core::resource_value::ResourceValue;
use lwm2m_fill_level::object_util::PostWrite;

/// In-memory resource table standing in for the LwM2M engine.
#[derive(Clone)]
pub struct EmuEngine {
    state: crate::SharedState,
}

impl EmuEngine {
    pub(crate) fn new(state: crate::SharedState) -> Self {
        Self { state }
    }

    pub fn read(&self, path: ResourcePath) -> Option<ResourceValue> {
        crate::lock(&self.state).ok()?.resources.get(&path).copied()
    }

    /// Writes a resource the way the server does: the value must match the kind of
    /// the resource, and the post-write handler registered for it runs afterwards.
    pub fn write(&mut self, path: ResourcePath, value: ResourceValue) -> Result<(), Lwm2mError> {
        let handler = {
            let mut state = crate::lock(&self.state)?;
            match state.resources.get_mut(&path) {
                Some(current) if current.kind() == value.kind() => *current = value,
                Some(current) => {
                    log::warn!("{} holds {:?}, cannot write {}", path, current.kind(), value);
                    return Err(Lwm2mError::Forwarded(-EINVAL));
                }
                None => return Err(Lwm2mError::Forwarded(-ENOENT)),
            }
            if path.object_id == IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID && path.resource_id == ACTUAL_FILL_PERCENTAGE_FILLING_SENSOR_RID {
                evaluate_thresholds(&mut state.resources, path);
            }
            state.post_write_handlers.get(&path).copied()
        };

        // The handler may call back into the object manager.
        if let Some(handler) = handler {
            let data = value.to_bytes();
            let mut util = crate::object_util::EmuObjectUtil::new(self.state.clone());
            handler.post_write(
                &mut util,
                PostWrite {
                    path,
                    resource_instance_id: 0,
                    data: &data,
                    last_block: true,
                    total_size: data.len(),
                },
            )?;
        }
        Ok(())
    }

    fn get(&self, path: &str) -> Result<ResourceValue, Lwm2mError> {
        let path: ResourcePath = path.parse()?;
        crate::lock(&self.state)?
            .resources
            .get(&path)
            .copied()
            .ok_or(Lwm2mError::Forwarded(-ENOENT))
    }
}

// Container full and empty follow the fill percentage.
fn evaluate_thresholds(resources: &mut std::collections::BTreeMap<ResourcePath, ResourceValue>, percent_path: ResourcePath) {
    let resource = |resource_id| ResourcePath::new(percent_path.object_id, percent_path.instance_id, resource_id);
    let float = |resources: &std::collections::BTreeMap<ResourcePath, ResourceValue>, resource_id| match resources.get(&resource(resource_id)) {
        Some(ResourceValue::Float(value)) => Some(*value),
        _ => None,
    };

    let Some(percent) = float(&*resources, ACTUAL_FILL_PERCENTAGE_FILLING_SENSOR_RID) else {
        return;
    };

    if let Some(high) = float(&*resources, HIGH_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID) {
        if let Some(full) = resources.get_mut(&resource(CONTAINER_FULL_FILLING_SENSOR_RID)) {
            *full = ResourceValue::Bool(high > 0.0 && percent >= high);
        }
    }
    if let Some(low) = float(&*resources, LOW_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID) {
        if let Some(empty) = resources.get_mut(&resource(CONTAINER_EMPTY_FILLING_SENSOR_RID)) {
            *empty = ResourceValue::Bool(percent <= low);
        }
    }
}

impl lwm2m_fill_level::engine::ObjectEngineAPI for EmuEngine {
    fn get_u32(&mut self, path: &str) -> Result<u32, Lwm2mError> {
        match self.get(path)? {
            ResourceValue::U32(value) => Ok(value),
            _ => Err(Lwm2mError::Forwarded(-EINVAL)),
        }
    }

    fn set_u32(&mut self, path: &str, value: u32) -> Result<(), Lwm2mError> {
        self.write(path.parse()?, ResourceValue::U32(value))
    }

    fn get_float(&mut self, path: &str) -> Result<f64, Lwm2mError> {
        match self.get(path)? {
            ResourceValue::Float(value) => Ok(value),
            _ => Err(Lwm2mError::Forwarded(-EINVAL)),
        }
    }

    fn set_float(&mut self, path: &str, value: f64) -> Result<(), Lwm2mError> {
        self.write(path.parse()?, ResourceValue::Float(value))
    }
}

#[cfg(test)]
mod test {
    use lwm2m_fill_level::engine::ObjectEngineAPI;
    use lwm2m_fill_level::object_util::ObjectUtilAPI;

    use super::*;

    fn sensor_instance(instance_id: u16) -> (EmuEngine, crate::object_util::EmuObjectUtil) {
        let (engine, mut util) = crate::emulator(Box::<crate::config_store::MemoryConfigStore>::default());
        util.create_obj_inst(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, instance_id).unwrap();
        (engine, util)
    }

    #[test]
    fn typed_access_by_path() {
        let (mut engine, _util) = sensor_instance(1);

        engine.set_u32("3435/1/6051", 150).unwrap();
        assert_eq!(engine.get_u32("3435/1/6051"), Ok(150));
        assert_eq!(engine.get_u32("/3435/1/6051"), Ok(150));

        engine.set_float("3435/1/6054", 75.5).unwrap();
        assert_eq!(engine.get_float("3435/1/6054"), Ok(75.5));
    }

    #[test]
    fn rejects_unknown_and_mistyped_resources() {
        let (mut engine, _util) = sensor_instance(1);

        assert_eq!(engine.get_u32("3435/2/6051"), Err(Lwm2mError::Forwarded(-ENOENT)));
        assert_eq!(engine.set_u32("3435/2/6051", 1), Err(Lwm2mError::Forwarded(-ENOENT)));
        assert_eq!(engine.get_float("3435/1/6051"), Err(Lwm2mError::Forwarded(-EINVAL)));
        assert_eq!(engine.set_float("3435/1/6051", 1.0), Err(Lwm2mError::Forwarded(-EINVAL)));
        assert!(engine.get_u32("3435/one/6051").is_err());
    }

    #[test]
    fn percent_write_evaluates_thresholds() {
        let (mut engine, _util) = sensor_instance(0);
        engine.set_float("3435/0/6054", 80.0).unwrap();
        engine.set_float("3435/0/6056", 20.0).unwrap();

        let full = ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, 0, CONTAINER_FULL_FILLING_SENSOR_RID);
        let empty = ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, 0, CONTAINER_EMPTY_FILLING_SENSOR_RID);

        engine.set_float("3435/0/6052", 85.0).unwrap();
        assert_eq!(engine.read(full), Some(ResourceValue::Bool(true)));
        assert_eq!(engine.read(empty), Some(ResourceValue::Bool(false)));

        engine.set_float("3435/0/6052", 50.0).unwrap();
        assert_eq!(engine.read(full), Some(ResourceValue::Bool(false)));
        assert_eq!(engine.read(empty), Some(ResourceValue::Bool(false)));

        engine.set_float("3435/0/6052", 5.0).unwrap();
        assert_eq!(engine.read(full), Some(ResourceValue::Bool(false)));
        assert_eq!(engine.read(empty), Some(ResourceValue::Bool(true)));
    }

    #[test]
    fn unset_high_threshold_never_reports_full() {
        let (mut engine, _util) = sensor_instance(0);
        engine.set_float("3435/0/6052", 100.0).unwrap();
        assert_eq!(
            engine.read(ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, 0, CONTAINER_FULL_FILLING_SENSOR_RID)),
            Some(ResourceValue::Bool(false))
        );
    }
}
