// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use core::fmt::Write;

pub type ObjectId = u16;
pub type ObjectInstanceId = u16;
pub type ResourceId = u16;
pub type ResourceInstanceId = u16;

/// Large enough for "65535/65535/65535/65535".
pub const LWM2M_MAX_PATH_STR_LEN: usize = 24;

pub type PathString = heapless::String<LWM2M_MAX_PATH_STR_LEN>;

/// Address of a single resource: `<object>/<instance>/<resource>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourcePath {
    pub object_id: ObjectId,
    pub instance_id: ObjectInstanceId,
    pub resource_id: ResourceId,
}

impl ResourcePath {
    pub const fn new(object_id: ObjectId, instance_id: ObjectInstanceId, resource_id: ResourceId) -> Self {
        Self {
            object_id,
            instance_id,
            resource_id,
        }
    }

    /// Formats the path into a buffer of `N` bytes.
    pub fn format<const N: usize>(&self) -> Result<heapless::String<N>, crate::common::Lwm2mError> {
        let mut path = heapless::String::<N>::new();
        write!(path, "{}/{}/{}", self.object_id, self.instance_id, self.resource_id).map_err(|_| crate::common::Lwm2mError::PathFormat)?;
        Ok(path)
    }

    pub fn to_path_string(&self) -> Result<PathString, crate::common::Lwm2mError> {
        self.format::<LWM2M_MAX_PATH_STR_LEN>()
    }
}

impl core::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}/{}", self.object_id, self.instance_id, self.resource_id)
    }
}

impl core::str::FromStr for ResourcePath {
    type Err = crate::common::Lwm2mError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim_start_matches('/').split('/');
        let mut next = || -> Result<u16, Self::Err> {
            parts
                .next()
                .and_then(|p| p.parse::<u16>().ok())
                .ok_or(crate::common::Lwm2mError::NotFound)
        };
        let path = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(crate::common::Lwm2mError::NotFound);
        }
        Ok(path)
    }
}

impl<C> minicbor::Encode<C> for ResourcePath {
    fn encode<W: minicbor::encode::Write>(&self, e: &mut minicbor::Encoder<W>, _ctx: &mut C) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.array(3)?.u16(self.object_id)?.u16(self.instance_id)?.u16(self.resource_id)?;
        Ok(())
    }
}

impl<C> minicbor::Decode<'_, C> for ResourcePath {
    fn decode(d: &mut minicbor::Decoder<'_>, _ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        if d.array()? != Some(3) {
            return Err(minicbor::decode::Error::message("resource path must have three elements"));
        }
        Ok(Self::new(d.u16()?, d.u16()?, d.u16()?))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_engine_path() {
        let path = ResourcePath::new(3435, 7, 6051);
        assert_eq!(path.to_path_string().unwrap().as_str(), "3435/7/6051");

        let widest = ResourcePath::new(u16::MAX, u16::MAX, u16::MAX);
        assert_eq!(widest.to_path_string().unwrap().as_str(), "65535/65535/65535");
    }

    #[test]
    fn short_buffer_is_a_format_error() {
        let path = ResourcePath::new(3435, 7, 6051);
        assert_eq!(path.format::<8>(), Err(crate::common::Lwm2mError::PathFormat));
    }

    #[test]
    fn parses_engine_path() {
        assert_eq!("3435/0/6052".parse::<ResourcePath>(), Ok(ResourcePath::new(3435, 0, 6052)));
        assert_eq!("/3435/1/6053".parse::<ResourcePath>(), Ok(ResourcePath::new(3435, 1, 6053)));
        assert!("3435/0".parse::<ResourcePath>().is_err());
        assert!("3435/0/6052/0".parse::<ResourcePath>().is_err());
        assert!("3435/x/6052".parse::<ResourcePath>().is_err());
    }

    #[test]
    fn cbor_encoding_is_stable() {
        let mut buffer = [0_u8; 32];
        let path = ResourcePath::new(3435, 2, 6054);

        minicbor::encode(path, &mut buffer[..]).unwrap();
        let decoded: ResourcePath = minicbor::decode(&buffer[..]).unwrap();

        assert_eq!(decoded, path);
    }
}
