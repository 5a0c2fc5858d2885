// Action names recorded in the application log
pub const USER_REGISTERED: &str = "USER_REGISTERED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_RENAMED: &str = "GROUP_RENAMED";
pub const GROUP_DELETED: &str = "GROUP_DELETED";
pub const MEMBER_INVITED: &str = "MEMBER_INVITED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const GROUP_DETAILS_QUERIED: &str = "GROUP_DETAILS_QUERIED";

// Input limits
pub const MAX_GROUP_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_EMAIL_LENGTH: usize = 254;
/// Largest single expense accepted, in major units.
pub const MAX_EXPENSE_AMOUNT: f64 = 1_000_000.0;
