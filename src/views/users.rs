use crate::model::Role;
use crate::state::ViewState;

use super::Table;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsersModel {
    pub users: Table,
    /// False only when the server told us we are not an Admin; the server
    /// stays the authority either way.
    pub can_manage: bool,
}

pub fn build_users(state: &ViewState) -> UsersModel {
    let mut users = Table::new(&["ID", "Username", "Role", "Must change password"]);
    for u in &state.users {
        users.rows.push(vec![
            u.id.to_string(),
            u.username.clone(),
            u.role.to_string(),
            if u.must_change_password { "yes" } else { "no" }.to_string(),
        ]);
    }
    UsersModel {
        users,
        can_manage: matches!(state.role, None | Some(Role::Admin)),
    }
}
