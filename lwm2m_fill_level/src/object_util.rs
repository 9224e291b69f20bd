// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use lwm2m_api_core::common::Lwm2mError;
use lwm2m_api_core::object_path::{ObjectId, ObjectInstanceId, ResourceInstanceId, ResourcePath};

/// Object lifecycle layer sitting next to the engine: agent registration,
/// managed instances, resource-instance deletion and config persistence.
pub trait ObjectUtilAPI {
    /// Registers the agent called whenever an instance of `agent.object_id()` is created.
    fn register_agent(&mut self, agent: &'static dyn ObjectCreateAgent) -> Result<(), Lwm2mError>;

    /// Maps an entry of the gateway device table to an instance, creating it when needed.
    fn manage_obj_instance(&mut self, object_id: ObjectId, index: i32, offset: u16) -> Result<ObjectInstanceId, Lwm2mError>;

    /// Reports a failed update of a managed instance, the manager decides whether it goes away.
    fn manage_obj_deletion(&mut self, error: Lwm2mError, object_id: ObjectId, index: i32, instance_id: ObjectInstanceId);

    fn create_obj_inst(&mut self, object_id: ObjectId, instance_id: ObjectInstanceId) -> Result<(), Lwm2mError>;

    fn reg_post_write_cb(&mut self, path: ResourcePath, handler: &'static dyn PostWriteHandler) -> Result<(), Lwm2mError>;

    fn del_res_inst(&mut self, path: ResourcePath, resource_instance_id: ResourceInstanceId) -> Result<(), Lwm2mError>;

    /// Restores a persisted value of `size` bytes into the resource, if one exists.
    fn load_config(&mut self, path: ResourcePath, size: usize) -> Result<(), Lwm2mError>;

    fn save_config(&mut self, path: ResourcePath, data: &[u8]) -> Result<(), Lwm2mError>;
}

pub trait ObjectCreateAgent: Sync {
    fn object_id(&self) -> ObjectId;

    /// Called once the object instance exists.
    fn create(&'static self, util: &mut dyn ObjectUtilAPI, index: i32, instance_id: ObjectInstanceId) -> Result<(), Lwm2mError>;
}

/// A completed write of a resource, as reported by the engine.
#[derive(Debug, Clone, Copy)]
pub struct PostWrite<'a> {
    pub path: ResourcePath,
    pub resource_instance_id: ResourceInstanceId,
    pub data: &'a [u8],
    pub last_block: bool,
    pub total_size: usize,
}

pub trait PostWriteHandler: Sync {
    fn post_write(&self, util: &mut dyn ObjectUtilAPI, write: PostWrite<'_>) -> Result<(), Lwm2mError>;
}
