pub mod audit;
pub mod expense;
pub mod group;
pub mod member;
pub mod money;
pub mod settlement;
pub mod user;

pub use expense::{ExpenseRecord, GroupExpense};
pub use group::{Group, GroupMember, Role};
pub use member::{MemberId, Roster};
pub use money::{Money, MoneyError};
pub use settlement::{Balances, MemberBalance, Transfer};
pub use user::User;
