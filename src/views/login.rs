use crate::state::ViewState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginModel {
    pub server: String,
    pub error: Option<String>,
    pub hint: &'static str,
}

pub fn build_login(state: &ViewState, server: &str) -> LoginModel {
    LoginModel {
        server: server.to_string(),
        error: state.login_error.clone(),
        hint: "Enter to log in, q to quit",
    }
}
