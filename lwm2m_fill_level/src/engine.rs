// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

/// Path-based resource access of the LwM2M engine.
///
/// Paths have the form `"<object>/<instance>/<resource>"`, see
/// `lwm2m_api_core::object_path::ResourcePath::to_path_string`.
pub trait ObjectEngineAPI {
    fn get_u32(&mut self, path: &str) -> Result<u32, lwm2m_api_core::common::Lwm2mError>;
    fn set_u32(&mut self, path: &str, value: u32) -> Result<(), lwm2m_api_core::common::Lwm2mError>;
    fn get_float(&mut self, path: &str) -> Result<f64, lwm2m_api_core::common::Lwm2mError>;
    fn set_float(&mut self, path: &str, value: f64) -> Result<(), lwm2m_api_core::common::Lwm2mError>;
}
