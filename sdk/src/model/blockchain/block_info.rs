//! Block metadata as delivered by `/block/{height}` and the `block`
//! listener channel.

use serde_json::{json, Value};

use super::NetworkType;
use crate::codec::dto::{self, Dto};
use crate::codec::FixedWidth;
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::Result;

/// A block header plus the node's metadata about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    pub hash: String,
    pub generation_hash: String,
    pub total_fee: u64,
    pub num_transactions: u32,
    pub signature: Signature,
    pub signer: PublicKey,
    pub network_type: NetworkType,
    pub version: u8,
    pub block_type: u16,
    pub height: u64,
    pub timestamp: u64,
    pub difficulty: u64,
    pub fee_multiplier: u32,
    pub previous_block_hash: String,
    pub block_transactions_hash: String,
    pub block_receipts_hash: String,
    pub state_hash: String,
    pub beneficiary: PublicKey,
}

impl BlockInfo {
    /// Decode a `{meta, block}` object.
    pub fn from_dto(data: &Value) -> Result<Self> {
        let data = dto::as_object(data, "block info")?;
        let meta = dto::object(data, "meta")?;
        let block = dto::object(data, "block")?;
        let version: u16 = dto::uint(block, "version")?;

        Ok(Self {
            hash: hash(meta, "hash")?,
            generation_hash: hash(meta, "generationHash")?,
            total_fee: dto::uint(meta, "totalFee")?,
            num_transactions: dto::uint(meta, "numTransactions")?,
            signature: dto::signature(block, "signature")?,
            signer: dto::public_key(block, "signer")?,
            network_type: NetworkType::from_value(version.high())?,
            version: version.low(),
            block_type: dto::uint(block, "type")?,
            height: dto::uint(block, "height")?,
            timestamp: dto::uint(block, "timestamp")?,
            difficulty: dto::uint(block, "difficulty")?,
            fee_multiplier: dto::uint(block, "feeMultiplier")?,
            previous_block_hash: hash(block, "previousBlockHash")?,
            block_transactions_hash: hash(block, "blockTransactionsHash")?,
            block_receipts_hash: hash(block, "blockReceiptsHash")?,
            state_hash: hash(block, "stateHash")?,
            beneficiary: dto::public_key(block, "beneficiary")?,
        })
    }

    pub fn to_dto(&self) -> Value {
        let version = u16::from(self.network_type.value()) << 8 | u16::from(self.version);
        json!({
            "meta": {
                "hash": self.hash,
                "generationHash": self.generation_hash,
                "totalFee": self.total_fee.to_dto(),
                "numTransactions": self.num_transactions,
            },
            "block": {
                "signature": self.signature.to_hex(),
                "signer": self.signer.to_hex(),
                "version": version,
                "type": self.block_type,
                "height": self.height.to_dto(),
                "timestamp": self.timestamp.to_dto(),
                "difficulty": self.difficulty.to_dto(),
                "feeMultiplier": self.fee_multiplier,
                "previousBlockHash": self.previous_block_hash,
                "blockTransactionsHash": self.block_transactions_hash,
                "blockReceiptsHash": self.block_receipts_hash,
                "stateHash": self.state_hash,
                "beneficiary": self.beneficiary.to_hex(),
            }
        })
    }
}

/// 32-byte hashes stay as uppercase hex text.
fn hash(obj: &Dto, key: &str) -> Result<String> {
    Ok(hex::encode_upper(dto::hex_array::<32>(obj, key)?))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn block_dto() -> Value {
        let h = "AB".repeat(32);
        json!({
            "meta": {
                "hash": h,
                "generationHash": h,
                "totalFee": [0, 0],
                "numTransactions": 25
            },
            "block": {
                "signature": "CD".repeat(64),
                "signer": "0EB448D07C7CCB312989AC27AA052738FF589E2F83973F909B506B450DC5C4E2",
                "version": 36867,
                "type": 32835,
                "height": [1, 0],
                "timestamp": [0, 0],
                "difficulty": [276447232, 23283],
                "feeMultiplier": 0,
                "previousBlockHash": "00".repeat(32),
                "blockTransactionsHash": h,
                "blockReceiptsHash": h,
                "stateHash": h,
                "beneficiary": "0EB448D07C7CCB312989AC27AA052738FF589E2F83973F909B506B450DC5C4E2"
            }
        })
    }

    #[test]
    fn decodes_listener_block() {
        let info = BlockInfo::from_dto(&block_dto()).unwrap();
        assert_eq!(info.network_type, NetworkType::MijinTest);
        assert_eq!(info.version, 3);
        assert_eq!(info.height, 1);
        assert_eq!(info.num_transactions, 25);
        assert_eq!(info.difficulty, 100_000_000_000_000);
        assert_eq!(BlockInfo::from_dto(&info.to_dto()).unwrap(), info);
    }

    #[test]
    fn missing_block_is_malformed() {
        let err = BlockInfo::from_dto(&json!({"meta": {}})).unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedPayload(_)));
    }
}
