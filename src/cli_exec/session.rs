use super::prompt::secret_or_prompt;
use super::*;

use relay_admin::model::PasswordChange;

pub(super) fn handle_login_command(
    api: &mut ApiClient,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = secret_or_prompt(password, "Password")?;
    let resp = api
        .login(username.trim(), &password)
        .map_err(|err| anyhow::anyhow!("login failed: {}", err.detail_or("login failed")))?;
    api.session_mut()
        .set_login(&resp.token, resp.role, resp.must_change_password)
        .context("store session token")?;

    match resp.role {
        Some(role) => println!("Logged in as {} ({})", username.trim(), role),
        None => println!("Logged in as {}", username.trim()),
    }
    if resp.must_change_password {
        println!("Password change required: run `relay-admin passwd`");
    }
    Ok(())
}

pub(super) fn handle_logout_command(api: &mut ApiClient) -> Result<()> {
    api.session_mut().clear().context("clear session token")?;
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_passwd_command(
    api: &mut ApiClient,
    old_password: Option<String>,
    new_password: Option<String>,
) -> Result<()> {
    let old_password = secret_or_prompt(old_password, "Current password")?;
    let new_password = secret_or_prompt(new_password, "New password")?;
    let resp = api
        .change_password(&PasswordChange {
            old_password,
            new_password,
        })
        .context("change password")?;
    api.session_mut()
        .mark_password_changed()
        .context("store session")?;
    print_response(&resp)?;
    println!("Password changed");
    Ok(())
}
