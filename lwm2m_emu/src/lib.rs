// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-FileCopyrightText: © 2023 Siemens AG
// SPDX-License-Identifier: MIT
use lwm2m_api_core::common::{Lwm2mError, EIO};
use lwm2m_api_core::ipso_filling_sensor::*;
use lwm2m_api_core::object_path::{ObjectId, ObjectInstanceId, ResourcePath};
use lwm2m_api_core::resource_value::ResourceValue;
use lwm2m_fill_level::object_util::ObjectUtilAPI;

pub mod config_store;
pub mod engine;
pub mod object_util;

#[cfg(test)]
pub mod test;

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SensorSettings {
    /// Entry of the gateway device table the sensor is bound to.
    pub index: i32,
    pub offset: u16,
    pub height_cm: u32,
    pub high_threshold: f64,
    pub low_threshold: f64,
    /// Reported to `set`, only used with the `reported` distance source.
    pub distance_cm: f64,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct EmuSettings {
    /// Directory of the persisted resource values.
    pub config_dir: String,
    pub fill_level: lwm2m_fill_level::FillLevelSettings,
    pub sensors: Vec<SensorSettings>,
}

pub fn emu_default_conf() -> String {
    String::from(
        r##"config_dir = "./fill_level_config/"

[fill_level]
distance_source = "fixed"
measured_distance_cm = 10

[[sensors]]
index = 0
offset = 0
height_cm = 120
high_threshold = 90.0
low_threshold = 10.0
distance_cm = 30.0

[[sensors]]
index = 1
offset = 0
height_cm = 8
high_threshold = 80.0
low_threshold = 20.0
distance_cm = 8.0
"##,
    )
}

/// Writes `content` to `path`, unless the file already exists.
pub fn create_template(path: &str, content: &str) -> anyhow::Result<()> {
    if path.is_empty() {
        anyhow::bail!("empty template file name");
    }
    match std::path::Path::new(&path).exists() {
        true => anyhow::bail!("cannot overwrite configuration file: {}", path),
        false => {
            std::fs::write(path, content)?;
            Ok(())
        }
    }
}

pub(crate) struct EmuState {
    resources: std::collections::BTreeMap<ResourcePath, ResourceValue>,
    instances: std::collections::BTreeSet<(ObjectId, ObjectInstanceId)>,
    agents: std::collections::BTreeMap<ObjectId, &'static dyn lwm2m_fill_level::object_util::ObjectCreateAgent>,
    post_write_handlers: std::collections::BTreeMap<ResourcePath, &'static dyn lwm2m_fill_level::object_util::PostWriteHandler>,
    // (object, device table index, offset) -> instance
    managed: std::collections::BTreeMap<(ObjectId, i32, u16), ObjectInstanceId>,
    store: Box<dyn config_store::ConfigStore>,
}

pub(crate) type SharedState = std::sync::Arc<std::sync::Mutex<EmuState>>;

pub(crate) fn lock(state: &SharedState) -> Result<std::sync::MutexGuard<'_, EmuState>, Lwm2mError> {
    state.lock().map_err(|_| {
        log::error!("Emulator state poisoned");
        Lwm2mError::Forwarded(-EIO)
    })
}

/// Creates an empty emulated device: the engine and the object manager share its state.
pub fn emulator(store: Box<dyn config_store::ConfigStore>) -> (engine::EmuEngine, object_util::EmuObjectUtil) {
    let state = std::sync::Arc::new(std::sync::Mutex::new(EmuState {
        resources: std::collections::BTreeMap::new(),
        instances: std::collections::BTreeSet::new(),
        agents: std::collections::BTreeMap::new(),
        post_write_handlers: std::collections::BTreeMap::new(),
        managed: std::collections::BTreeMap::new(),
        store,
    }));
    (engine::EmuEngine::new(state.clone()), object_util::EmuObjectUtil::new(state))
}

/// Outcome of one emulated sensor update.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReport {
    pub instance_id: ObjectInstanceId,
    pub level: Option<u32>,
    pub percent: Option<f64>,
    pub full: Option<bool>,
    pub empty: Option<bool>,
    pub result_code: i32,
}

/// Registers the adapter, provisions the configured sensors and updates each of them once.
pub fn emu_main(settings: EmuSettings) -> anyhow::Result<Vec<SensorReport>> {
    let store = config_store::FileConfigStore::new(&settings.config_dir)?;
    run_sensors(&settings, Box::new(store))
}

pub fn run_sensors(settings: &EmuSettings, store: Box<dyn config_store::ConfigStore>) -> anyhow::Result<Vec<SensorReport>> {
    let (mut engine, mut util) = emulator(store);
    lwm2m_fill_level::init(&mut util).map_err(|err| anyhow::anyhow!("cannot register the fill level sensor: {}", err))?;

    let mut sensor = lwm2m_fill_level::FillLevelSensor::new(
        Box::new(engine.clone()),
        Box::new(util.clone()),
        lwm2m_fill_level::distance::from_settings(&settings.fill_level),
    );

    let mut reports = Vec::new();
    for sensor_settings in &settings.sensors {
        let instance_id = util
            .manage_obj_instance(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, sensor_settings.index, sensor_settings.offset)
            .map_err(|err| anyhow::anyhow!("cannot create sensor {}/{}: {}", sensor_settings.index, sensor_settings.offset, err))?;
        provision(&mut engine, instance_id, sensor_settings)?;

        #[cfg(feature = "manage-obj-inst")]
        let result = sensor.managed_set(sensor_settings.index, sensor_settings.offset, sensor_settings.distance_cm);
        #[cfg(not(feature = "manage-obj-inst"))]
        let result = sensor.set(instance_id, sensor_settings.distance_cm);

        let report = report(&engine, instance_id, lwm2m_api_core::common::result_code(&result));
        match result {
            Ok(_) => log::info!(
                "Fill level sensor {}: level {:?} cm, {:?} %, full {:?}, empty {:?}",
                instance_id,
                report.level,
                report.percent,
                report.full,
                report.empty
            ),
            Err(err) => log::warn!("Fill level sensor {} not updated: {}", instance_id, err),
        }
        reports.push(report);
    }
    Ok(reports)
}

// Acts as the server writing the container configuration.
fn provision(engine: &mut engine::EmuEngine, instance_id: ObjectInstanceId, settings: &SensorSettings) -> anyhow::Result<()> {
    let writes = [
        (CONTAINER_HEIGHT_FILLING_SENSOR_RID, ResourceValue::U32(settings.height_cm)),
        (HIGH_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID, ResourceValue::Float(settings.high_threshold)),
        (LOW_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID, ResourceValue::Float(settings.low_threshold)),
    ];
    for (resource_id, value) in writes {
        let path = ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, instance_id, resource_id);
        engine.write(path, value).map_err(|err| anyhow::anyhow!("cannot provision {}: {}", path, err))?;
    }
    Ok(())
}

fn report(engine: &engine::EmuEngine, instance_id: ObjectInstanceId, result_code: i32) -> SensorReport {
    let read = |resource_id| engine.read(ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, instance_id, resource_id));
    SensorReport {
        instance_id,
        level: match read(ACTUAL_FILL_LEVEL_FILLING_SENSOR_RID) {
            Some(ResourceValue::U32(level)) => Some(level),
            _ => None,
        },
        percent: match read(ACTUAL_FILL_PERCENTAGE_FILLING_SENSOR_RID) {
            Some(ResourceValue::Float(percent)) => Some(percent),
            _ => None,
        },
        full: match read(CONTAINER_FULL_FILLING_SENSOR_RID) {
            Some(ResourceValue::Bool(full)) => Some(full),
            _ => None,
        },
        empty: match read(CONTAINER_EMPTY_FILLING_SENSOR_RID) {
            Some(ResourceValue::Bool(empty)) => Some(empty),
            _ => None,
        },
        result_code,
    }
}
