// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use lwm2m_api_core::common::Lwm2mError;
use lwm2m_api_core::ipso_filling_sensor::*;
use lwm2m_api_core::object_path::{ObjectId, ObjectInstanceId, ResourceId, ResourcePath};

use crate::object_util::{ObjectCreateAgent, ObjectUtilAPI, PostWrite, PostWriteHandler};


/// Container configuration restored on creation, with the size of the stored value.
pub const PERSISTED_RESOURCES: [(ResourceId, usize); 3] = [
    (CONTAINER_HEIGHT_FILLING_SENSOR_RID, core::mem::size_of::<u32>()),
    (HIGH_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID, core::mem::size_of::<f64>()),
    (LOW_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID, core::mem::size_of::<f64>()),
];

/// Optional resources that are never populated and must not be exposed to the server.
pub const UNUSED_RESOURCES: [ResourceId; 5] = [
    AVERAGE_FILL_SPEED_FILLING_SENSOR_RID,
    FORECAST_FULL_DATE_FILLING_SENSOR_RID,
    FORECAST_EMPTY_DATE_FILLING_SENSOR_RID,
    CONTAINER_OUT_OF_LOCATION_FILLING_SENSOR_RID,
    CONTAINER_OUT_OF_POSITION_FILLING_SENSOR_RID,
];

/// Creation agent and post-write handler of the filling level sensor object.
#[derive(Debug)]
pub struct FillLevelAgent {
    persist_config: bool,
}

pub static FILL_LEVEL_AGENT: FillLevelAgent = FillLevelAgent::new(cfg!(feature = "config-data"));

impl FillLevelAgent {
    pub const fn new(persist_config: bool) -> Self {
        Self { persist_config }
    }

    pub fn persists_config(&self) -> bool {
        self.persist_config
    }

    fn restore_config(&'static self, util: &mut dyn ObjectUtilAPI, instance_id: ObjectInstanceId) {
        for (resource_id, size) in PERSISTED_RESOURCES {
            let path = ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, instance_id, resource_id);
            if let Err(err) = util.load_config(path, size) {
                log::debug!("No configuration restored for {}: {}", path, err);
            }
        }

        // Mirrors later writes to the config store.
        for (resource_id, _) in PERSISTED_RESOURCES {
            let path = ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, instance_id, resource_id);
            if let Err(err) = util.reg_post_write_cb(path, self) {
                log::error!("Unable to register post-write callback for {}: {}", path, err);
            }
        }
    }
}

impl ObjectCreateAgent for FillLevelAgent {
    fn object_id(&self) -> ObjectId {
        IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID
    }

    fn create(&'static self, util: &mut dyn ObjectUtilAPI, _index: i32, instance_id: ObjectInstanceId) -> Result<(), Lwm2mError> {
        if self.persist_config {
            self.restore_config(util, instance_id);
        }

        // Unused resources would otherwise show up on the server.
        for resource_id in UNUSED_RESOURCES {
            let path = ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, instance_id, resource_id);
            if let Err(err) = util.del_res_inst(path, 0) {
                log::debug!("Unable to delete {}/0: {}", path, err);
            }
        }

        log::info!("Fill level sensor {} created", instance_id);
        Ok(())
    }
}

impl PostWriteHandler for FillLevelAgent {
    fn post_write(&self, util: &mut dyn ObjectUtilAPI, write: PostWrite<'_>) -> Result<(), Lwm2mError> {
        if self.persist_config {
            let path = ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, write.path.instance_id, write.path.resource_id);
            if let Err(err) = util.save_config(path, write.data) {
                log::error!("Unable to save configuration of {}: {}", path, err);
            }
        }
        Ok(())
    }
}

/// Registers the filling level sensor with the object manager. Call once at startup.
pub fn init(util: &mut dyn ObjectUtilAPI) -> Result<(), Lwm2mError> {
    util.register_agent(&FILL_LEVEL_AGENT)
}
