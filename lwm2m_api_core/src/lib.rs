// SPDX-FileCopyrightText: © 2023 TUM
// SPDX-License-Identifier: MIT
#![no_std]

pub mod common;
pub mod config_record;
pub mod ipso_filling_sensor;
pub mod object_path;
pub mod resource_value;
