//! Mosaics: the token model.

pub mod mosaic;
pub mod mosaic_id;
pub mod properties;

pub use mosaic::Mosaic;
pub use mosaic_id::{MosaicId, MosaicNonce};
pub use properties::MosaicProperties;

byte_enum! {
    /// Direction of a supply change.
    pub enum MosaicSupplyType ("mosaic supply type") {
        Decrease = 0,
        Increase = 1,
    }
}

byte_enum! {
    /// How a mosaic levy is computed.
    pub enum MosaicLevyType ("mosaic levy type") {
        /// A fixed amount per transfer.
        Absolute = 1,
        /// A fraction of the transferred amount.
        Calculated = 2,
    }
}
