// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use super::*;
use crate::config_store::MemoryConfigStore;

fn scratch_dir(name: &str) -> String {
    let dir = std::env::temp_dir().join(format!("lwm2m_emu_{}_{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    dir.to_string_lossy().to_string()
}

fn default_settings() -> EmuSettings {
    toml::from_str(&emu_default_conf()).unwrap()
}

fn sensor(index: i32, height_cm: u32, distance_cm: f64) -> SensorSettings {
    SensorSettings {
        index,
        offset: 0,
        height_cm,
        high_threshold: 90.0,
        low_threshold: 10.0,
        distance_cm,
    }
}

#[test]
fn default_conf_is_valid() {
    let settings = default_settings();
    assert_eq!(settings.fill_level.distance_source, lwm2m_fill_level::DistanceSourceKind::Fixed);
    assert_eq!(settings.fill_level.measured_distance_cm, 10);
    assert_eq!(settings.sensors.len(), 2);
}

#[test]
fn default_sensors_are_updated() {
    let reports = run_sensors(&default_settings(), Box::<MemoryConfigStore>::default()).unwrap();
    assert_eq!(reports.len(), 2);

    // 120 cm container, sensor 10 cm above the surface.
    let first = &reports[0];
    assert_eq!(first.instance_id, 0);
    assert_eq!(first.result_code, 0);
    assert_eq!(first.level, Some(110));
    assert!((first.percent.unwrap() - 110.0 / 120.0 * 100.0).abs() < 1e-4);
    assert_eq!(first.full, Some(true));
    assert_eq!(first.empty, Some(false));

    // Shallower than the measured distance.
    let second = &reports[1];
    assert_eq!(second.instance_id, object_util::INSTANCES_PER_INDEX);
    assert_eq!(second.result_code, 0);
    assert_eq!(second.level, Some(0));
    assert_eq!(second.percent, Some(0.0));
    assert_eq!(second.full, Some(false));
    assert_eq!(second.empty, Some(true));
}

#[test]
fn reported_distance_is_used() {
    let settings = EmuSettings {
        config_dir: String::new(),
        fill_level: lwm2m_fill_level::FillLevelSettings {
            distance_source: lwm2m_fill_level::DistanceSourceKind::Reported,
            measured_distance_cm: 0,
        },
        sensors: vec![sensor(0, 120, 30.0)],
    };

    let reports = run_sensors(&settings, Box::<MemoryConfigStore>::default()).unwrap();

    assert_eq!(reports[0].level, Some(90));
    assert!((reports[0].percent.unwrap() - 75.0).abs() < 1e-4);
    assert_eq!(reports[0].full, Some(false));
    assert_eq!(reports[0].empty, Some(false));
}

#[cfg(feature = "manage-obj-inst")]
#[test]
fn failed_update_deletes_managed_instance() {
    let settings = EmuSettings {
        config_dir: String::new(),
        fill_level: lwm2m_fill_level::FillLevelSettings::default(),
        sensors: vec![sensor(0, 0, 0.0), sensor(1, 50, 0.0)],
    };

    let reports = run_sensors(&settings, Box::<MemoryConfigStore>::default()).unwrap();

    assert_eq!(reports[0].result_code, -lwm2m_api_core::common::EINVAL);
    assert_eq!(reports[0].level, None);
    assert_eq!(reports[0].percent, None);
    assert_eq!(reports[1].result_code, 0);
    assert_eq!(reports[1].level, Some(40));
}

#[cfg(feature = "config-data")]
#[test]
fn configuration_survives_restart() {
    let dir = scratch_dir("configuration_survives_restart");
    let mut settings = default_settings();
    settings.config_dir = dir.clone();

    emu_main(settings).unwrap();

    // A fresh device restores the container configuration on creation.
    let (engine, mut util) = emulator(Box::new(config_store::FileConfigStore::new(&dir).unwrap()));
    lwm2m_fill_level::init(&mut util).unwrap();
    util.create_obj_inst(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, 0).unwrap();

    let read = |resource_id| engine.read(ResourcePath::new(IPSO_OBJECT_FILLING_LEVEL_SENSOR_ID, 0, resource_id));
    assert_eq!(read(CONTAINER_HEIGHT_FILLING_SENSOR_RID), Some(ResourceValue::U32(120)));
    assert_eq!(read(HIGH_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID), Some(ResourceValue::Float(90.0)));
    assert_eq!(read(LOW_THRESHOLD_PERCENTAGE_FILLING_SENSOR_RID), Some(ResourceValue::Float(10.0)));
    // Computed values are not persisted.
    assert_eq!(read(ACTUAL_FILL_LEVEL_FILLING_SENSOR_RID), Some(ResourceValue::U32(0)));

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn template_is_not_overwritten() {
    let dir = scratch_dir("template_is_not_overwritten");
    std::fs::create_dir_all(&dir).unwrap();
    let file = std::path::Path::new(&dir).join("fill_level.toml");
    let file = file.to_string_lossy().to_string();

    create_template(&file, &emu_default_conf()).unwrap();
    let written: EmuSettings = toml::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(written.sensors.len(), 2);

    assert!(create_template(&file, "").is_err());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), emu_default_conf());
    assert!(create_template("", "").is_err());

    std::fs::remove_dir_all(dir).unwrap();
}
