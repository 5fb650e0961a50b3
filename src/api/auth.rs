use crate::model::{LoginRequest, LoginResponse, PasswordChange};

use super::*;

impl ApiClient {
    /// Exchanges credentials for a token. Does not touch the session store.
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(|err| ApiError::Encode(err.to_string()))?;
        let value = self
            .call_anonymous(Method::Post, "/api/login", Some(body))?
            .into_result()?;
        let out: LoginResponse = decode_as(value);
        if out.token.is_empty() {
            return Err(ApiError::Rejected {
                status: 200,
                detail: Some("login response carried no token".to_string()),
                body: String::new(),
            });
        }
        Ok(out)
    }

    pub fn change_password(&mut self, change: &PasswordChange) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/api/change-password", change)
    }
}
