// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    U32,
    Float,
    Bool,
    Time,
}

impl ResourceKind {
    /// Size of the value as it is handed to post-write callbacks and the config store.
    pub const fn size(&self) -> usize {
        match self {
            ResourceKind::U32 => core::mem::size_of::<u32>(),
            ResourceKind::Float => core::mem::size_of::<f64>(),
            ResourceKind::Bool => 1,
            ResourceKind::Time => core::mem::size_of::<i64>(),
        }
    }

    pub const fn default_value(&self) -> ResourceValue {
        match self {
            ResourceKind::U32 => ResourceValue::U32(0),
            ResourceKind::Float => ResourceValue::Float(0.0),
            ResourceKind::Bool => ResourceValue::Bool(false),
            ResourceKind::Time => ResourceValue::Time(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceValue {
    U32(u32),
    Float(f64),
    Bool(bool),
    Time(i64),
}

pub type ResourceBytes = heapless::Vec<u8, 8>;

impl ResourceValue {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceValue::U32(_) => ResourceKind::U32,
            ResourceValue::Float(_) => ResourceKind::Float,
            ResourceValue::Bool(_) => ResourceKind::Bool,
            ResourceValue::Time(_) => ResourceKind::Time,
        }
    }

    /// Little-endian representation, the layout persisted by the config store.
    pub fn to_bytes(&self) -> ResourceBytes {
        let mut bytes = ResourceBytes::new();
        // Capacity covers the widest kind.
        let _ = match self {
            ResourceValue::U32(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            ResourceValue::Float(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            ResourceValue::Bool(v) => bytes.extend_from_slice(&[*v as u8]),
            ResourceValue::Time(v) => bytes.extend_from_slice(&v.to_le_bytes()),
        };
        bytes
    }

    pub fn from_bytes(kind: ResourceKind, data: &[u8]) -> Result<Self, crate::common::Lwm2mError> {
        if data.len() != kind.size() {
            return Err(crate::common::Lwm2mError::InvalidConfiguration);
        }
        Ok(match kind {
            ResourceKind::U32 => ResourceValue::U32(u32::from_le_bytes(data.try_into().map_err(|_| crate::common::Lwm2mError::InvalidConfiguration)?)),
            ResourceKind::Float => ResourceValue::Float(f64::from_le_bytes(data.try_into().map_err(|_| crate::common::Lwm2mError::InvalidConfiguration)?)),
            ResourceKind::Bool => ResourceValue::Bool(data[0] != 0),
            ResourceKind::Time => ResourceValue::Time(i64::from_le_bytes(data.try_into().map_err(|_| crate::common::Lwm2mError::InvalidConfiguration)?)),
        })
    }
}

impl core::fmt::Display for ResourceValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResourceValue::U32(v) => write!(f, "{}", v),
            ResourceValue::Float(v) => write!(f, "{}", v),
            ResourceValue::Bool(v) => write!(f, "{}", v),
            ResourceValue::Time(v) => write!(f, "{}", v),
        }
    }
}
