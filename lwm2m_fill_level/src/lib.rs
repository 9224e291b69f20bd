// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
pub mod agent;
pub mod distance;
pub mod engine;
pub mod fill_level;
pub mod object_util;

pub use agent::init;
pub use fill_level::{compute_fill, FillLevelSensor, FillReading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSourceKind {
    /// Always report `measured_distance_cm`.
    Fixed,
    /// Use the value handed to `set`, in centimeters.
    Reported,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct FillLevelSettings {
    pub distance_source: DistanceSourceKind,
    pub measured_distance_cm: u32,
}

impl Default for FillLevelSettings {
    fn default() -> Self {
        Self {
            distance_source: DistanceSourceKind::Fixed,
            measured_distance_cm: distance::DEFAULT_MEASURED_DISTANCE_CM,
        }
    }
}

pub fn fill_level_default_conf() -> String {
    String::from(
        r##"distance_source = "fixed"
measured_distance_cm = 10
"##,
    )
}

#[cfg(test)]
mod test {
    #[test]
    fn default_conf_matches_default_settings() {
        let settings: super::FillLevelSettings = toml::from_str(&super::fill_level_default_conf()).unwrap();
        let default = super::FillLevelSettings::default();
        assert_eq!(settings.distance_source, default.distance_source);
        assert_eq!(settings.measured_distance_cm, default.measured_distance_cm);
    }

    #[test]
    fn reported_distance_source_is_parsed() {
        let settings: super::FillLevelSettings = toml::from_str("distance_source = \"reported\"\nmeasured_distance_cm = 0\n").unwrap();
        assert_eq!(settings.distance_source, super::DistanceSourceKind::Reported);
    }
}
