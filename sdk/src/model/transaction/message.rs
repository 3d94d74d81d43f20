//! Transfer messages.

use serde_json::{json, Value};

use crate::codec::cursor::write_u8;
use crate::codec::dto;
use crate::codec::Reader;
use crate::error::Result;

byte_enum! {
    pub enum MessageType ("message type") {
        Plain = 0,
        Secure = 1,
    }
}

/// A typed message payload. The payload bytes are opaque here; secure
/// messages arrive already encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    pub message_type: MessageType,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn plain(text: &str) -> Self {
        Self {
            message_type: MessageType::Plain,
            payload: text.as_bytes().to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self {
            message_type: MessageType::Plain,
            payload: Vec::new(),
        }
    }

    /// Type byte plus payload.
    pub fn catbuffer_size(&self) -> usize {
        1 + self.payload.len()
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        write_u8(out, self.message_type.value());
        out.extend_from_slice(&self.payload);
    }

    /// Read a message whose total size (type byte included) is `size`.
    pub(crate) fn read(reader: &mut Reader<'_>, size: usize) -> Result<Self> {
        if size == 0 {
            return Ok(Self::empty());
        }
        let message_type = MessageType::from_value(reader.read_u8()?)?;
        let payload = reader.take(size - 1)?.to_vec();
        Ok(Self {
            message_type,
            payload,
        })
    }

    /// `{type, payload}` with the payload as hex.
    pub fn to_dto(&self) -> Value {
        json!({
            "type": self.message_type.to_dto(),
            "payload": hex::encode_upper(&self.payload),
        })
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "message")?;
        Ok(Self {
            message_type: MessageType::from_dto(dto::field(obj, "type")?)?,
            payload: dto::hex_bytes(obj, "payload")?,
        })
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_message_layout() {
        let message = Message::plain("hi");
        let mut out = Vec::new();
        message.write(&mut out);
        assert_eq!(out, vec![0, b'h', b'i']);
        assert_eq!(message.catbuffer_size(), 3);
        let read = Message::read(&mut Reader::new(&out), 3).unwrap();
        assert_eq!(read, message);
    }

    #[test]
    fn zero_size_is_empty_plain() {
        let read = Message::read(&mut Reader::new(&[]), 0).unwrap();
        assert_eq!(read, Message::empty());
    }

    #[test]
    fn dto_payload_is_hex() {
        let dto = Message::plain("hi").to_dto();
        assert_eq!(dto, json!({"type": 0, "payload": "6869"}));
        assert_eq!(Message::from_dto(&dto).unwrap(), Message::plain("hi"));
    }
}
