//! Chain-level types.

pub mod block_info;
pub mod network_type;

pub use block_info::BlockInfo;
pub use network_type::NetworkType;
