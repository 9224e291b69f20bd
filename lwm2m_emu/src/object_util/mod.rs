// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use lwm2m_api_core::common::{Lwm2mError, EEXIST, EINVAL, EIO, ENOENT};
use lwm2m_api_core::ipso_filling_sensor::*;
use lwm2m_api_core::object_path::{ObjectId, ObjectInstanceId, ResourceInstanceId, ResourcePath};
use lwm2m_api_core::resource_value::{ResourceKind, ResourceValue};
use lwm2m_fill_level::object_util::{ObjectCreateAgent, ObjectUtilAPI, PostWriteHandler};


/// Instances reserved for each entry of the gateway device table.
pub const INSTANCES_PER_INDEX: u16 = 8;

/// Index handed to agents for instances created outside the device table.
pub const UNMANAGED_INDEX: i32 = -1;

fn object_resources(object_id: ObjectId) -> &'static [(lwm2m_api_core::object_path::ResourceId, ResourceKind)] {
    match object_id {
        IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID => &FILLING_SENSOR_RESOURCES,
        _ => &[],
    }
}

/// First instance of the block reserved for a device table entry.
pub fn base_instance(index: i32) -> Option<ObjectInstanceId> {
    u16::try_from(index).ok()?.checked_mul(INSTANCES_PER_INDEX)
}

/// Object manager of the emulated device.
#[derive(Clone)]
pub struct EmuObjectUtil {
    state: crate::SharedState,
}

impl EmuObjectUtil {
    pub(crate) fn new(state: crate::SharedState) -> Self {
        Self { state }
    }

    pub fn instances(&self, object_id: ObjectId) -> Vec<ObjectInstanceId> {
        match crate::lock(&self.state) {
            Ok(state) => state
                .instances
                .iter()
                .filter(|(object, _)| *object == object_id)
                .map(|(_, instance)| *instance)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn has_post_write_cb(&self, path: ResourcePath) -> bool {
        crate::lock(&self.state)
            .map(|state| state.post_write_handlers.contains_key(&path))
            .unwrap_or(false)
    }

    /// Removes an instance together with its resources and callbacks.
    pub fn delete_obj_inst(&mut self, object_id: ObjectId, instance_id: ObjectInstanceId) -> Result<(), Lwm2mError> {
        let mut state = crate::lock(&self.state)?;
        if !state.instances.remove(&(object_id, instance_id)) {
            return Err(Lwm2mError::Forwarded(-ENOENT));
        }
        let of_instance = |path: &ResourcePath| path.object_id == object_id && path.instance_id == instance_id;
        state.resources.retain(|path, _| !of_instance(path));
        state.post_write_handlers.retain(|path, _| !of_instance(path));
        state
            .managed
            .retain(|(object, _, _), instance| !(*object == object_id && *instance == instance_id));
        log::info!("Deleted {}/{}", object_id, instance_id);
        Ok(())
    }

    fn create_instance(&mut self, object_id: ObjectId, index: i32, instance_id: ObjectInstanceId) -> Result<(), Lwm2mError> {
        let agent = {
            let mut state = crate::lock(&self.state)?;
            if !state.instances.insert((object_id, instance_id)) {
                return Err(Lwm2mError::Forwarded(-EEXIST));
            }
            for (resource_id, kind) in object_resources(object_id) {
                state
                    .resources
                    .insert(ResourcePath::new(object_id, instance_id, *resource_id), kind.default_value());
            }
            state.agents.get(&object_id).copied()
        };

        if let Some(agent) = agent {
            if let Err(err) = agent.create(self, index, instance_id) {
                log::error!("Agent of object {} failed to set up instance {}: {}", object_id, instance_id, err);
                self.delete_obj_inst(object_id, instance_id)?;
                return Err(err);
            }
        }
        Ok(())
    }

    fn resource_kind(&self, path: ResourcePath) -> Result<ResourceKind, Lwm2mError> {
        crate::lock(&self.state)?
            .resources
            .get(&path)
            .map(ResourceValue::kind)
            .ok_or(Lwm2mError::Forwarded(-ENOENT))
    }
}

impl ObjectUtilAPI for EmuObjectUtil {
    fn register_agent(&mut self, agent: &'static dyn ObjectCreateAgent) -> Result<(), Lwm2mError> {
        let object_id = agent.object_id();
        if crate::lock(&self.state)?.agents.insert(object_id, agent).is_some() {
            log::warn!("Replaced the agent of object {}", object_id);
        }
        Ok(())
    }

    fn manage_obj_instance(&mut self, object_id: ObjectId, index: i32, offset: u16) -> Result<ObjectInstanceId, Lwm2mError> {
        if let Some(instance_id) = crate::lock(&self.state)?.managed.get(&(object_id, index, offset)) {
            return Ok(*instance_id);
        }

        if offset >= INSTANCES_PER_INDEX {
            log::error!("Offset {} of device table entry {} out of range", offset, index);
            return Err(Lwm2mError::Forwarded(-EINVAL));
        }
        let instance_id = base_instance(index)
            .and_then(|base| base.checked_add(offset))
            .ok_or(Lwm2mError::Forwarded(-EINVAL))?;

        self.create_instance(object_id, index, instance_id)?;
        crate::lock(&self.state)?.managed.insert((object_id, index, offset), instance_id);
        log::debug!("Device table entry {}/{} managed as {}/{}", index, offset, object_id, instance_id);
        Ok(instance_id)
    }

    fn manage_obj_deletion(&mut self, error: Lwm2mError, object_id: ObjectId, index: i32, instance_id: ObjectInstanceId) {
        let managed = match crate::lock(&self.state) {
            Ok(state) => state
                .managed
                .iter()
                .any(|((object, idx, _), instance)| *object == object_id && *idx == index && *instance == instance_id),
            Err(_) => return,
        };
        if !managed {
            log::debug!("{}/{} is not managed by device table entry {}", object_id, instance_id, index);
            return;
        }

        log::warn!("Deleting {}/{} after failed update: {}", object_id, instance_id, error);
        if let Err(err) = self.delete_obj_inst(object_id, instance_id) {
            log::error!("Unable to delete {}/{}: {}", object_id, instance_id, err);
        }
    }

    fn create_obj_inst(&mut self, object_id: ObjectId, instance_id: ObjectInstanceId) -> Result<(), Lwm2mError> {
        self.create_instance(object_id, UNMANAGED_INDEX, instance_id)
    }

    fn reg_post_write_cb(&mut self, path: ResourcePath, handler: &'static dyn PostWriteHandler) -> Result<(), Lwm2mError> {
        let mut state = crate::lock(&self.state)?;
        if !state.resources.contains_key(&path) {
            return Err(Lwm2mError::Forwarded(-ENOENT));
        }
        state.post_write_handlers.insert(path, handler);
        Ok(())
    }

    fn del_res_inst(&mut self, path: ResourcePath, resource_instance_id: ResourceInstanceId) -> Result<(), Lwm2mError> {
        // Only single-instance resources are emulated.
        if resource_instance_id != 0 {
            return Err(Lwm2mError::Forwarded(-ENOENT));
        }
        let mut state = crate::lock(&self.state)?;
        state.post_write_handlers.remove(&path);
        match state.resources.remove(&path) {
            Some(_) => Ok(()),
            None => Err(Lwm2mError::Forwarded(-ENOENT)),
        }
    }

    fn load_config(&mut self, path: ResourcePath, size: usize) -> Result<(), Lwm2mError> {
        let kind = self.resource_kind(path)?;
        if kind.size() != size {
            log::error!("{} holds {} bytes, {} requested", path, kind.size(), size);
            return Err(Lwm2mError::Forwarded(-EINVAL));
        }

        let mut state = crate::lock(&self.state)?;
        let data = match state.store.load(path) {
            Ok(Some(data)) => data,
            Ok(None) => return Err(Lwm2mError::Forwarded(-ENOENT)),
            Err(err) => {
                log::error!("Unable to load {}: {}", path, err);
                return Err(Lwm2mError::Forwarded(-EIO));
            }
        };
        let value = ResourceValue::from_bytes(kind, &data)?;
        state.resources.insert(path, value);
        log::debug!("Restored {} = {}", path, value);
        Ok(())
    }

    fn save_config(&mut self, path: ResourcePath, data: &[u8]) -> Result<(), Lwm2mError> {
        crate::lock(&self.state)?.store.save(path, data).map_err(|err| {
            log::error!("Unable to save {}: {}", path, err);
            Lwm2mError::Forwarded(-EIO)
        })
    }
}
