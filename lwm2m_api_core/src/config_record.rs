// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

/// A persisted resource value: the path it belongs to and the raw bytes written by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRecord<'a> {
    pub path: crate::object_path::ResourcePath,
    pub data: &'a [u8],
}

impl<C> minicbor::Encode<C> for ConfigRecord<'_> {
    fn encode<W: minicbor::encode::Write>(&self, e: &mut minicbor::Encoder<W>, ctx: &mut C) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.array(2)?;
        minicbor::Encode::encode(&self.path, e, ctx)?;
        e.bytes(self.data)?;
        Ok(())
    }
}

impl<'b, C> minicbor::Decode<'b, C> for ConfigRecord<'b> {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        if d.array()? != Some(2) {
            return Err(minicbor::decode::Error::message("config record must have two elements"));
        }
        let path: crate::object_path::ResourcePath = minicbor::Decode::decode(d, ctx)?;
        let data = d.bytes()?;
        Ok(Self { path, data })
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn record_keeps_path_and_bytes() {
        let mut buffer = [0_u8; 64];
        let data = 150_u32.to_le_bytes();
        let record = super::ConfigRecord {
            path: crate::object_path::ResourcePath::new(3435, 0, 6051),
            data: &data,
        };

        minicbor::encode(record, &mut buffer[..]).unwrap();
        let decoded: super::ConfigRecord = minicbor::decode(&buffer[..]).unwrap();

        assert_eq!(decoded.path, record.path);
        assert_eq!(decoded.data, &data[..]);
    }
}
