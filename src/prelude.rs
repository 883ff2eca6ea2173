//! Amber Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartLine, CartStore, IdentityKey, LineId, PricedLine},
    catalog::{AddOn, Catalog, MenuItem, MenuItemKey, Variation},
    fixtures::{Fixture, FixtureError},
    members::{
        Member, MemberContext, MemberSession, MemberStatus, MemberUserType, PriceTier,
        ranking::{TopMember, top_members},
    },
    pricing::PricingError,
    receipt::{Receipt, ReceiptError},
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
};
