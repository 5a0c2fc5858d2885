use super::member::MemberId;
use super::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Net position per member. Positive: the group owes them. Negative: they owe the group.
pub type Balances = BTreeMap<MemberId, Money>;

/// One point-to-point payment in a settlement plan. `amount` is always positive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub net_balance: Money,
}
