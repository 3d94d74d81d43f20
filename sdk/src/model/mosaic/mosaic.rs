use serde_json::{json, Value};

use super::MosaicId;
use crate::codec::{dto, FixedWidth, Reader};
use crate::codec::cursor::write_u64;
use crate::error::Result;

/// An amount of a given mosaic, in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mosaic {
    pub id: MosaicId,
    pub amount: u64,
}

impl Mosaic {
    pub const CATBUFFER_SIZE: usize = 16;

    pub fn new(id: MosaicId, amount: u64) -> Self {
        Self { id, amount }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        write_u64(out, self.id.id());
        write_u64(out, self.amount);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            id: MosaicId::new(reader.read_u64()?),
            amount: reader.read_u64()?,
        })
    }

    pub fn to_catbuffer(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::CATBUFFER_SIZE);
        self.write(&mut out);
        out
    }

    pub fn from_catbuffer(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let mut reader = Reader::new(bytes);
        let mosaic = Self::read(&mut reader)?;
        Ok((mosaic, reader.remaining()))
    }

    pub fn to_dto(&self) -> Value {
        json!({
            "id": self.id.to_dto(),
            "amount": self.amount.to_dto(),
        })
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "mosaic")?;
        Ok(Self {
            id: MosaicId::from_dto(dto::field(obj, "id")?)?,
            amount: dto::uint(obj, "amount")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_id_then_amount() {
        let mosaic = Mosaic::new(MosaicId::new(1), 2);
        let bytes = mosaic.to_catbuffer();
        assert_eq!(bytes.len(), Mosaic::CATBUFFER_SIZE);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[8], 2);
        assert_eq!(Mosaic::from_catbuffer(&bytes).unwrap().0, mosaic);
    }

    #[test]
    fn dto_uses_u64_pairs() {
        let mosaic = Mosaic::new(MosaicId::new(0x0DC6_7FBE_1CAD_29E3), 1_000_000);
        let dto = mosaic.to_dto();
        assert_eq!(dto["amount"], json!([1_000_000, 0]));
        assert_eq!(Mosaic::from_dto(&dto).unwrap(), mosaic);
    }
}
