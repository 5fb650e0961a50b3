use crate::model::{NewUser, UserAccount, UserUpdate};

use super::*;

impl ApiClient {
    pub fn list_users(&mut self) -> Result<Vec<UserAccount>, ApiError> {
        let value = self.get_value("/api/users")?;
        let Value::Array(items) = value else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter_map(|v| serde_json::from_value::<UserAccount>(v).ok())
            .collect())
    }

    pub fn create_user(&mut self, user: &NewUser) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/api/users", user)
    }

    pub fn update_user(&mut self, id: i64, update: &UserUpdate) -> Result<Value, ApiError> {
        self.write_json(Method::Patch, &format!("/api/users/{}", id), update)
    }
}
