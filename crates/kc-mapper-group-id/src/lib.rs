//! # kc-mapper-group-id
//!
//! OIDC protocol mapper that copies the IDs of the groups a user belongs to
//! into a token claim.
//!
//! The claim is always a JSON array of group IDs in the order the user's
//! group memberships are enumerated. Which tokens receive it is controlled by
//! the usual inclusion toggles of the mapper instance.
//!
//! ```rust,ignore
//! use kc_protocol_oidc::ProtocolMapperRegistry;
//!
//! let mut registry = ProtocolMapperRegistry::new();
//! kc_mapper_group_id::register(&mut registry);
//!
//! let config = kc_mapper_group_id::GroupIdMapper::create(
//!     "group ids", "group_ids", false, None, true, true, false,
//! );
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod mapper;

use std::sync::Arc;

use kc_protocol_oidc::ProtocolMapperRegistry;

pub use mapper::{GroupIdMapper, PROVIDER_ID};

/// Registers the group ID mapper with a mapper registry.
pub fn register(registry: &mut ProtocolMapperRegistry) {
    registry.register(Arc::new(GroupIdMapper));
}

#[cfg(test)]
mod tests {
    use kc_protocol_oidc::ProtocolMapper;

    use super::*;

    #[test]
    fn register_adds_mapper() {
        let mut registry = ProtocolMapperRegistry::new();
        register(&mut registry);

        assert_eq!(registry.mapper_ids(), vec![PROVIDER_ID]);
        let descriptor = registry.get(PROVIDER_ID).unwrap().descriptor();
        assert_eq!(descriptor.display_name, "User Group IDs");
    }
}
