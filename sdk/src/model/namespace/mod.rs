//! Namespaces: hierarchical names that can alias addresses and mosaics.

pub mod namespace_id;

pub use namespace_id::NamespaceId;

byte_enum! {
    /// Whether an alias transaction creates or removes the link.
    pub enum AliasActionType ("alias action") {
        Link = 0,
        Unlink = 1,
    }
}

byte_enum! {
    pub enum NamespaceType ("namespace type") {
        Root = 0,
        Sub = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn alias_action_values() {
        assert_eq!(AliasActionType::Unlink.value(), 1);
        assert_eq!(AliasActionType::from_dto(&json!(0)).unwrap(), AliasActionType::Link);
        assert!(matches!(AliasActionType::from_value(2), Err(Error::Lookup { .. })));
    }

    #[test]
    fn namespace_type_values() {
        assert_eq!(NamespaceType::from_value(1).unwrap(), NamespaceType::Sub);
        assert_eq!(NamespaceType::Root.to_dto(), json!(0));
    }
}
