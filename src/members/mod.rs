//! Members
//!
//! The signed-in member is owned outside the cart. Prices are resolved against
//! whatever [`MemberContext`] reports at the moment they are read.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

pub mod ranking;

/// Member account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberUserType {
    /// A regular customer buying for themselves.
    EndUser,

    /// A reseller buying at wholesale prices.
    Reseller,
}

/// Account status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Account in good standing.
    #[default]
    Active,

    /// Account disabled by an administrator.
    Inactive,

    /// Account awaiting approval.
    Pending,
}

/// A storefront member account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member identifier
    pub id: String,

    /// Login name
    pub username: String,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Account classification
    pub user_type: MemberUserType,

    /// Account status
    #[serde(default)]
    pub status: MemberStatus,

    /// Loyalty level
    #[serde(default)]
    pub level: u32,
}

impl Member {
    /// Creates an active member.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        user_type: MemberUserType,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: None,
            user_type,
            status: MemberStatus::Active,
            level: 0,
        }
    }

    /// Creates an active end-user member.
    #[must_use]
    pub fn end_user(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(id, username, MemberUserType::EndUser)
    }

    /// Creates an active reseller member.
    #[must_use]
    pub fn reseller(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::new(id, username, MemberUserType::Reseller)
    }
}

/// Read access to the current member.
pub trait MemberContext {
    /// The signed-in member, if any.
    fn current_member(&self) -> Option<Member>;

    /// Whether the current member should be priced as a reseller.
    fn is_reseller(&self) -> bool {
        self.current_member()
            .is_some_and(|member| member.user_type == MemberUserType::Reseller)
    }
}

impl MemberContext for Option<Member> {
    fn current_member(&self) -> Option<Member> {
        self.clone()
    }
}

/// Shared handle to the signed-in member.
///
/// Clones observe the same state, so a login or logout through any handle is
/// seen by every cart holding another.
#[derive(Debug, Clone, Default)]
pub struct MemberSession {
    current: Rc<RefCell<Option<Member>>>,
}

impl MemberSession {
    /// Creates a session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a session with the given member signed in.
    #[must_use]
    pub fn signed_in(member: Member) -> Self {
        Self {
            current: Rc::new(RefCell::new(Some(member))),
        }
    }

    /// Signs a member in, replacing any current member.
    pub fn login(&self, member: Member) {
        self.current.replace(Some(member));
    }

    /// Signs the current member out.
    pub fn logout(&self) {
        self.current.replace(None);
    }
}

impl MemberContext for MemberSession {
    fn current_member(&self) -> Option<Member> {
        self.current.borrow().clone()
    }
}

/// The price tier a member context is entitled to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriceTier {
    /// Anonymous shoppers and members without a discounted tier.
    #[default]
    Base,

    /// Signed-in end users.
    Member,

    /// Signed-in resellers.
    Reseller,
}

impl PriceTier {
    /// Classifies a member context.
    ///
    /// The reseller check wins over the end-user check, and an absent member is
    /// always [`PriceTier::Base`] regardless of what the reseller predicate says.
    pub fn for_context<C: MemberContext + ?Sized>(context: &C) -> Self {
        let Some(member) = context.current_member() else {
            return Self::Base;
        };

        if context.is_reseller() {
            Self::Reseller
        } else if member.user_type == MemberUserType::EndUser {
            Self::Member
        } else {
            Self::Base
        }
    }
}
