//! Classification of incoming listener frames.
//!
//! A frame is a JSON object whose shape identifies its kind. Keys are
//! checked in this order and the first present one wins:
//!
//! | key           | message                                   |
//! |---------------|-------------------------------------------|
//! | `transaction` | full transaction (not supported)          |
//! | `block`       | [`BlockInfo`]                             |
//! | `status`      | [`TransactionStatusError`]                |
//! | `meta`        | `(channelName, hash)` notice              |
//! | `parentHash`  | [`CosignatureSignedTransaction`]          |

use serde_json::Value;

use crate::codec::dto;
use crate::error::{Error, Result};
use crate::model::blockchain::BlockInfo;
use crate::model::transaction::{CosignatureSignedTransaction, TransactionStatusError};

/// One classified frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerMessage {
    Block(BlockInfo),
    Status(TransactionStatusError),
    /// A transaction hash added to or removed from a channel.
    Notice { channel_name: String, hash: String },
    Cosignature(CosignatureSignedTransaction),
}

impl ListenerMessage {
    pub fn channel_name(&self) -> &str {
        match self {
            Self::Block(_) => "block",
            Self::Status(_) => "status",
            Self::Notice { channel_name, .. } => channel_name,
            Self::Cosignature(_) => "cosignature",
        }
    }
}

/// Parse and classify one text frame.
pub fn classify_text(text: &str) -> Result<ListenerMessage> {
    let data: Value = serde_json::from_str(text)?;
    classify(&data)
}

pub fn classify(data: &Value) -> Result<ListenerMessage> {
    let obj = dto::as_object(data, "listener message")?;
    if let Some(transaction) = obj.get("transaction") {
        let kind = transaction
            .get("type")
            .and_then(Value::as_u64)
            .map_or_else(|| "unknown".to_string(), |code| format!("0x{code:04X}"));
        return Err(Error::UnsupportedOperation(format!(
            "listener transaction messages are not decoded (type {kind})"
        )));
    }
    if obj.contains_key("block") {
        return Ok(ListenerMessage::Block(BlockInfo::from_dto(data)?));
    }
    if obj.contains_key("status") {
        return Ok(ListenerMessage::Status(TransactionStatusError::from_dto(data)?));
    }
    if let Some(meta) = obj.get("meta") {
        let meta = dto::as_object(meta, "listener meta")?;
        return Ok(ListenerMessage::Notice {
            channel_name: dto::string(meta, "channelName")?.to_string(),
            hash: dto::string(meta, "hash")?.to_string(),
        });
    }
    if obj.contains_key("parentHash") {
        return Ok(ListenerMessage::Cosignature(CosignatureSignedTransaction::from_dto(data)?));
    }

    let mut keys: Vec<String> = obj.keys().cloned().collect();
    keys.sort();
    tracing::debug!(?keys, "unrecognized listener message");
    Err(Error::UnrecognizedMessage { keys })
}
