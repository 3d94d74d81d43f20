//! Mosaic definition properties.
//!
//! On the wire the three boolean properties pack into one flags byte next
//! to the divisibility. Duration is optional and travels as a trailing
//! `(id, value)` entry; a mosaic without one never expires.

use serde_json::{json, Value};

use crate::codec::cursor::{write_u64, write_u8};
use crate::codec::{dto, FixedWidth, Reader};
use crate::error::{Error, Result};

const FLAG_SUPPLY_MUTABLE: u8 = 0x01;
const FLAG_TRANSFERABLE: u8 = 0x02;
const FLAG_LEVY_MUTABLE: u8 = 0x04;
const KNOWN_FLAGS: u8 = FLAG_SUPPLY_MUTABLE | FLAG_TRANSFERABLE | FLAG_LEVY_MUTABLE;

const PROPERTY_FLAGS: u8 = 0;
const PROPERTY_DIVISIBILITY: u8 = 1;
const PROPERTY_DURATION: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub levy_mutable: bool,
    pub divisibility: u8,
    pub duration: Option<u64>,
}

impl MosaicProperties {
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.supply_mutable {
            flags |= FLAG_SUPPLY_MUTABLE;
        }
        if self.transferable {
            flags |= FLAG_TRANSFERABLE;
        }
        if self.levy_mutable {
            flags |= FLAG_LEVY_MUTABLE;
        }
        flags
    }

    /// Unpacks `flags`; any bit outside the three known flags is rejected.
    fn with_flags(flags: u8, divisibility: u8, duration: Option<u64>) -> Result<Self> {
        if flags & !KNOWN_FLAGS != 0 {
            return Err(Error::Lookup {
                kind: "mosaic flags",
                value: format!("0x{flags:02X}"),
            });
        }
        Ok(Self {
            supply_mutable: flags & FLAG_SUPPLY_MUTABLE != 0,
            transferable: flags & FLAG_TRANSFERABLE != 0,
            levy_mutable: flags & FLAG_LEVY_MUTABLE != 0,
            divisibility,
            duration,
        })
    }

    /// `count:u8, flags:u8, divisibility:u8, (id:u8, value:u64)*`.
    pub fn catbuffer_size(&self) -> usize {
        3 + self.duration.map_or(0, |_| 9)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        write_u8(out, u8::from(self.duration.is_some()));
        write_u8(out, self.flags());
        write_u8(out, self.divisibility);
        if let Some(duration) = self.duration {
            write_u8(out, PROPERTY_DURATION);
            write_u64(out, duration);
        }
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u8()?;
        let flags = reader.read_u8()?;
        let divisibility = reader.read_u8()?;
        let mut duration = None;
        for _ in 0..count {
            match reader.read_u8()? {
                PROPERTY_DURATION => set_once(&mut duration, reader.read_u64()?)?,
                other => {
                    return Err(Error::Lookup {
                        kind: "mosaic property",
                        value: other.to_string(),
                    })
                }
            }
        }
        Self::with_flags(flags, divisibility, duration)
    }

    /// `[{id, value}]` with every value as a u64 pair.
    pub fn to_dto(&self) -> Value {
        let mut properties = vec![
            json!({"id": PROPERTY_FLAGS, "value": u64::from(self.flags()).to_dto()}),
            json!({"id": PROPERTY_DIVISIBILITY, "value": u64::from(self.divisibility).to_dto()}),
        ];
        if let Some(duration) = self.duration {
            properties.push(json!({"id": PROPERTY_DURATION, "value": duration.to_dto()}));
        }
        Value::Array(properties)
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let entries = data
            .as_array()
            .ok_or_else(|| Error::MalformedPayload("mosaic properties must be an array".into()))?;
        let (mut flags, mut divisibility, mut duration) = (0u8, 0u8, None);
        for entry in entries {
            let obj = dto::as_object(entry, "mosaic property")?;
            let value: u64 = dto::uint(obj, "value")?;
            match dto::uint::<u8>(obj, "id")? {
                PROPERTY_FLAGS => flags = u8::from_wide(value.into())?,
                PROPERTY_DIVISIBILITY => divisibility = u8::from_wide(value.into())?,
                PROPERTY_DURATION => set_once(&mut duration, value)?,
                other => {
                    return Err(Error::Lookup {
                        kind: "mosaic property",
                        value: other.to_string(),
                    })
                }
            }
        }
        Self::with_flags(flags, divisibility, duration)
    }
}

fn set_once(slot: &mut Option<u64>, value: u64) -> Result<()> {
    if slot.replace(value).is_some() {
        return Err(Error::MalformedPayload("mosaic property `duration` appears twice".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MosaicProperties {
        MosaicProperties {
            supply_mutable: true,
            transferable: false,
            levy_mutable: true,
            divisibility: 3,
            duration: Some(1000),
        }
    }

    #[test]
    fn flags_pack_into_one_byte() {
        assert_eq!(sample().flags(), 0x05);
        assert_eq!(MosaicProperties::default().flags(), 0);
    }

    #[test]
    fn catbuffer_layout() {
        let mut out = Vec::new();
        sample().write(&mut out);
        assert_eq!(out.len(), sample().catbuffer_size());
        assert_eq!(&out[..4], &[1, 0x05, 3, PROPERTY_DURATION]);

        let mut reader = Reader::new(&out);
        assert_eq!(MosaicProperties::read(&mut reader).unwrap(), sample());
        assert!(reader.is_empty());
    }

    #[test]
    fn no_duration_means_no_entries() {
        let eternal = MosaicProperties {
            duration: None,
            ..sample()
        };
        assert_eq!(eternal.catbuffer_size(), 3);
        assert_eq!(MosaicProperties::from_dto(&eternal.to_dto()).unwrap(), eternal);
    }

    #[test]
    fn unknown_property_id_is_lookup_error() {
        let err = MosaicProperties::read(&mut Reader::new(&[1, 0, 0, 9, 0, 0, 0, 0, 0, 0, 0, 0]))
            .unwrap_err();
        assert!(matches!(err, Error::Lookup { .. }));
    }

    #[test]
    fn repeated_duration_is_rejected() {
        let mut bytes = vec![2, FLAG_TRANSFERABLE, 0];
        for value in [5u64, 9] {
            bytes.push(PROPERTY_DURATION);
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let err = MosaicProperties::read(&mut Reader::new(&bytes)).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));

        let entries = serde_json::json!([
            {"id": PROPERTY_DURATION, "value": [5, 0]},
            {"id": PROPERTY_DURATION, "value": [9, 0]},
        ]);
        assert!(matches!(
            MosaicProperties::from_dto(&entries),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn unknown_flag_bits_are_rejected() {
        let err = MosaicProperties::read(&mut Reader::new(&[0, 0x0F, 3])).unwrap_err();
        assert!(matches!(err, Error::Lookup { kind: "mosaic flags", .. }));

        let entries = serde_json::json!([{"id": PROPERTY_FLAGS, "value": [8, 0]}]);
        assert!(MosaicProperties::from_dto(&entries).is_err());

        let mut reader = Reader::new(&[0, 0x07, 3]);
        let all = MosaicProperties::read(&mut reader).unwrap();
        let mut out = Vec::new();
        all.write(&mut out);
        assert_eq!(out, vec![0, 0x07, 3]);
    }
}
