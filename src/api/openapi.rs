use utoipa::OpenApi;

use crate::{
    api::models::{
        AddExpenseRequest, CreateGroupRequest, DeleteGroupRequest, ErrorResponse, InviteMemberRequest,
        RegisterUserRequest, RenameGroupRequest,
    },
    core::{
        models::{
            ExpenseRecord, Group, GroupExpense, GroupMember, MemberBalance, MemberId, Money, Role, Transfer, User,
            audit::AppLog,
        },
        services::GroupDetails,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register_user,
        super::handlers::create_group,
        super::handlers::list_groups,
        super::handlers::get_group_details,
        super::handlers::rename_group,
        super::handlers::delete_group,
        super::handlers::invite_member,
        super::handlers::add_expense,
        super::handlers::get_app_logs,
        super::handlers::get_group_logs
    ),
    components(schemas(
        RegisterUserRequest,
        CreateGroupRequest,
        RenameGroupRequest,
        DeleteGroupRequest,
        InviteMemberRequest,
        AddExpenseRequest,
        ErrorResponse,
        User,
        MemberId,
        Money,
        Role,
        Group,
        GroupMember,
        GroupExpense,
        ExpenseRecord,
        MemberBalance,
        Transfer,
        GroupDetails,
        AppLog
    )),
    info(
        title = "SettleUp API",
        description = "Shared group expenses, net balances and minimal settle-up transfers. Amounts are integer minor units (cents).",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
