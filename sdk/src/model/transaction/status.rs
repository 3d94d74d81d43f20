use serde_json::{json, Value};

use super::Deadline;
use crate::codec::dto;
use crate::error::Result;

/// A rejection notice pushed on the `status/{address}` channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatusError {
    pub hash: String,
    /// Node status code, e.g. `Failure_Core_Insufficient_Balance`.
    pub status: String,
    pub deadline: Deadline,
}

impl TransactionStatusError {
    pub fn to_dto(&self) -> Value {
        json!({
            "hash": self.hash,
            "status": self.status,
            "deadline": self.deadline.to_dto(),
        })
    }

    pub fn from_dto(data: &Value) -> Result<Self> {
        let obj = dto::as_object(data, "transaction status")?;
        Ok(Self {
            hash: dto::string(obj, "hash")?.to_string(),
            status: dto::string(obj, "status")?.to_string(),
            deadline: Deadline::from_dto(dto::field(obj, "deadline")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_round_trip() {
        let data = json!({
            "hash": "AB".repeat(32),
            "status": "Failure_Core_Past_Deadline",
            "deadline": [1, 0]
        });
        let status = TransactionStatusError::from_dto(&data).unwrap();
        assert_eq!(status.deadline, Deadline::new(1));
        assert_eq!(status.to_dto(), data);
    }
}
