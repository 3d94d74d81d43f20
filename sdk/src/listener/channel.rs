//! Websocket channels a listener can subscribe to.

use std::fmt;

use crate::model::account::Address;

/// A subscription target. All but [`ListenerChannel::Block`] are scoped to
/// one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerChannel {
    /// Every new block.
    Block,
    /// Transactions confirmed for the address.
    ConfirmedAdded(Address),
    /// Transactions announced but not yet confirmed.
    UnconfirmedAdded(Address),
    /// Unconfirmed transactions that were confirmed or rejected.
    UnconfirmedRemoved(Address),
    /// Bonded aggregates waiting for cosignatures.
    PartialAdded(Address),
    /// Bonded aggregates that completed or expired.
    PartialRemoved(Address),
    /// Rejections of transactions signed by the address.
    Status(Address),
    /// Cosignatures added to aggregates initiated by the address.
    Cosignature(Address),
}

impl ListenerChannel {
    /// Channel name without the address suffix.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::ConfirmedAdded(_) => "confirmedAdded",
            Self::UnconfirmedAdded(_) => "unconfirmedAdded",
            Self::UnconfirmedRemoved(_) => "unconfirmedRemoved",
            Self::PartialAdded(_) => "partialAdded",
            Self::PartialRemoved(_) => "partialRemoved",
            Self::Status(_) => "status",
            Self::Cosignature(_) => "cosignature",
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::Block => None,
            Self::ConfirmedAdded(a)
            | Self::UnconfirmedAdded(a)
            | Self::UnconfirmedRemoved(a)
            | Self::PartialAdded(a)
            | Self::PartialRemoved(a)
            | Self::Status(a)
            | Self::Cosignature(a) => Some(a),
        }
    }

    /// The path sent in a subscribe request, e.g. `status/SBGS2I...`.
    pub fn path(&self) -> String {
        match self.address() {
            Some(address) => format!("{}/{}", self.name(), address.plain()),
            None => self.name().to_string(),
        }
    }
}

impl fmt::Display for ListenerChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
