use relay_admin::model::{NewUser, Role, UserUpdate};
use relay_admin::views::Table;

use super::prompt::{read_secret, secret_or_prompt};
use super::*;

pub(super) fn handle_user_command(api: &mut ApiClient, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List { json } => {
            let users = api.list_users().map_err(verbatim)?;
            if json {
                return print_json(&users);
            }
            let mut table = Table::new(&["ID", "Username", "Role", "Must change password"]);
            for u in &users {
                table.rows.push(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.role.to_string(),
                    if u.must_change_password { "yes" } else { "no" }.to_string(),
                ]);
            }
            print_table(&table, "No accounts");
        }
        UserCommands::Add {
            username,
            role,
            password,
        } => {
            let role = role.parse::<Role>().map_err(anyhow::Error::msg)?;
            let password = secret_or_prompt(password, "Password")?;
            let resp = api
                .create_user(&NewUser {
                    username: username.trim().to_string(),
                    password,
                    role,
                })
                .map_err(verbatim)?;
            print_response(&resp)?;
        }
        UserCommands::Update {
            id,
            role,
            must_change_password,
            password,
            prompt_password,
        } => {
            let role = role.parse::<Role>().map_err(anyhow::Error::msg)?;
            let password = if prompt_password {
                Some(read_secret("New password")?)
            } else {
                password
            };
            let resp = api
                .update_user(id, &UserUpdate::new(role, must_change_password, password))
                .map_err(verbatim)?;
            print_response(&resp)?;
        }
    }
    Ok(())
}
