//! Transfer: send mosaics and/or a message to an address.
//!
//! ```text
//! recipient:25  message_size:u16  mosaics_count:u8
//! message(type:u8, payload)  mosaics[id:u64, amount:u64]*
//! ```

use serde_json::Value;

use super::body::{TransactionBody, TransactionPayload};
use super::{Deadline, Message, Transaction};
use crate::codec::cursor::{count, write_u16, write_u8};
use crate::codec::{dto, Dto, Reader};
use crate::error::Result;
use crate::model::account::Address;
use crate::model::blockchain::NetworkType;
use crate::model::mosaic::Mosaic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTransaction {
    pub recipient: Address,
    pub mosaics: Vec<Mosaic>,
    pub message: Message,
}

impl TransferTransaction {
    pub fn create(
        deadline: Deadline,
        recipient: Address,
        mosaics: Vec<Mosaic>,
        message: Message,
        network_type: NetworkType,
    ) -> Transaction {
        let body = TransactionBody::Transfer(Self {
            recipient,
            mosaics,
            message,
        });
        Transaction::new(network_type, deadline, body)
    }
}

impl TransactionPayload for TransferTransaction {
    fn payload_size(&self) -> usize {
        Address::CATBUFFER_SIZE
            + 2
            + 1
            + self.message.catbuffer_size()
            + self.mosaics.len() * Mosaic::CATBUFFER_SIZE
    }

    fn encode_payload(&self, _network_type: NetworkType) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.payload_size());
        out.extend_from_slice(self.recipient.encoded());
        write_u16(&mut out, count(self.message.catbuffer_size(), "message size")?);
        write_u8(&mut out, count(self.mosaics.len(), "mosaic count")?);
        self.message.write(&mut out);
        for mosaic in &self.mosaics {
            mosaic.write(&mut out);
        }
        Ok(out)
    }

    fn decode_payload(bytes: &[u8], _network_type: NetworkType) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let recipient = Address::read(&mut reader)?;
        let message_size = reader.read_u16()?;
        let mosaics_count = reader.read_u8()?;
        let message = Message::read(&mut reader, usize::from(message_size))?;
        let mosaics = (0..mosaics_count)
            .map(|_| Mosaic::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;
        Ok((
            Self {
                recipient,
                mosaics,
                message,
            },
            reader.remaining(),
        ))
    }

    fn to_dto_specific(&self, _network_type: NetworkType) -> Dto {
        let mut obj = Dto::new();
        obj.insert("recipient".into(), Value::from(self.recipient.to_hex()));
        obj.insert("message".into(), self.message.to_dto());
        obj.insert(
            "mosaics".into(),
            Value::Array(self.mosaics.iter().map(Mosaic::to_dto).collect()),
        );
        obj
    }

    fn from_dto_specific(data: &Dto, _network_type: NetworkType) -> Result<Self> {
        let message = match data.get("message") {
            Some(message) => Message::from_dto(message)?,
            None => Message::empty(),
        };
        Ok(Self {
            recipient: Address::from_hex(dto::string(data, "recipient")?)?,
            mosaics: dto::array(data, "mosaics")?
                .iter()
                .map(Mosaic::from_dto)
                .collect::<Result<_>>()?,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::mosaic::MosaicId;

    fn sample() -> TransferTransaction {
        TransferTransaction {
            recipient: Address::create_from_raw_address("SBGS2IGUED476REYI5ZZGISVSEHAF6YIQZV6YJFQ")
                .unwrap(),
            mosaics: vec![
                Mosaic::new(MosaicId::new(0x0DC6_7FBE_1CAD_29E3), 10),
                Mosaic::new(MosaicId::new(2), 20),
            ],
            message: Message::plain("hello"),
        }
    }

    #[test]
    fn payload_layout() {
        let transfer = sample();
        let bytes = transfer.encode_payload(NetworkType::MijinTest).unwrap();
        assert_eq!(bytes.len(), transfer.payload_size());
        assert_eq!(bytes.len(), 25 + 2 + 1 + 6 + 32);
        assert_eq!(&bytes[25..28], &[6, 0, 2]);
        assert_eq!(&bytes[28..34], b"\x00hello");
    }

    #[test]
    fn decode_leaves_trailing_bytes() {
        let transfer = sample();
        let mut bytes = transfer.encode_payload(NetworkType::MijinTest).unwrap();
        bytes.extend_from_slice(&[0xEE, 0xFF]);
        let (decoded, rest) = TransferTransaction::decode_payload(&bytes, NetworkType::MijinTest).unwrap();
        assert_eq!(decoded, transfer);
        assert_eq!(rest, &[0xEE, 0xFF]);
    }

    #[test]
    fn truncated_mosaics_fail() {
        let bytes = sample().encode_payload(NetworkType::MijinTest).unwrap();
        let err = TransferTransaction::decode_payload(&bytes[..bytes.len() - 4], NetworkType::MijinTest)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn dto_keys() {
        let dto = sample().to_dto_specific(NetworkType::MijinTest);
        assert!(dto.contains_key("recipient"));
        assert_eq!(dto["mosaics"].as_array().unwrap().len(), 2);
        let decoded = TransferTransaction::from_dto_specific(&dto, NetworkType::MijinTest).unwrap();
        assert_eq!(decoded, sample());
    }
}
