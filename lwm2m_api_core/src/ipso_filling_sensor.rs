// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

//! Identifiers of the IPSO Filling Level object (3435).

use crate::object_path::{ObjectId, ResourceId};
use crate::resource_value::ResourceKind;

pub const IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID: ObjectId = 3435;

pub const CONTAINER_HEIGHT_FILLING_SENSOR_RID: ResourceId = 6051;
pub const ACTUAL_FILL_PERCENTAGE_FILLING_SENSOR_RID: ResourceId = 6052;
pub const ACTUAL_FILL_LEVEL_FILLING_SENSOR_RID: ResourceId = 6053;
pub const HIGH_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID: ResourceId = 6054;
pub const CONTAINER_FULL_FILLING_SENSOR_RID: ResourceId = 6055;
pub const LOW_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID: ResourceId = 6056;
pub const CONTAINER_EMPTY_FILLING_SENSOR_RID: ResourceId = 6057;
pub const AVERAGE_FILL_SPEED_FILLING_SENSOR_RID: ResourceId = 6058;
pub const FORECAST_FULL_DATE_FILLING_SENSOR_RID: ResourceId = 6059;
pub const FORECAST_EMPTY_DATE_FILLING_SENSOR_RID: ResourceId = 6060;
pub const CONTAINER_OUT_OF_LOCATION_FILLING_SENSOR_RID: ResourceId = 6061;
pub const CONTAINER_OUT_OF_POSITION_FILLING_SENSOR_RID: ResourceId = 6062;

/// Resources of a freshly instantiated object and their value types.
pub const FILLING_SENSOR_RESOURCES: [(ResourceId, ResourceKind); 12] = [
    (CONTAINER_HEIGHT_FILLING_SENSOR_RID, ResourceKind::U32),
    (ACTUAL_FILL_PERCENTAGE_FILLING_SENSOR_RID, ResourceKind::Float),
    (ACTUAL_FILL_LEVEL_FILLING_SENSOR_RID, ResourceKind::U32),
    (HIGH_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID, ResourceKind::Float),
    (CONTAINER_FULL_FILLING_SENSOR_RID, ResourceKind::Bool),
    (LOW_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID, ResourceKind::Float),
    (CONTAINER_EMPTY_FILLING_SENSOR_RID, ResourceKind::Bool),
    (AVERAGE_FILL_SPEED_FILLING_SENSOR_RID, ResourceKind::Float),
    (FORECAST_FULL_DATE_FILLING_SENSOR_RID, ResourceKind::Time),
    (FORECAST_EMPTY_DATE_FILLING_SENSOR_RID, ResourceKind::Time),
    (CONTAINER_OUT_OF_LOCATION_FILLING_SENSOR_RID, ResourceKind::Bool),
    (CONTAINER_OUT_OF_POSITION_FILLING_SENSOR_RID, ResourceKind::Bool),
];
