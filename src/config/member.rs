//! Member Config

use crate::members::{Member, MemberSession};

/// Member the cart is priced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum MemberArg {
    /// Nobody signed in.
    Anonymous,

    /// A signed-in end user.
    EndUser,

    /// A signed-in reseller.
    Reseller,
}

impl MemberArg {
    /// Opens a session for this member.
    pub fn session(self) -> MemberSession {
        match self {
            Self::Anonymous => MemberSession::anonymous(),
            Self::EndUser => MemberSession::signed_in(Member::end_user("local", "local")),
            Self::Reseller => MemberSession::signed_in(Member::reseller("local", "local")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::members::{MemberContext, PriceTier};

    use super::*;

    #[test]
    fn member_args_map_to_tiers() {
        let anonymous = MemberArg::Anonymous.session();
        let end_user = MemberArg::EndUser.session();

        assert_eq!(PriceTier::for_context(&anonymous), PriceTier::Base);
        assert_eq!(PriceTier::for_context(&end_user), PriceTier::Member);
        assert!(MemberArg::Reseller.session().is_reseller());
    }
}
