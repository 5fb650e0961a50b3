use crate::model::{MailEvent, MailSearch};

use super::*;

impl ApiClient {
    /// Runs an audit search. A body that is not an array yields no rows;
    /// malformed rows are skipped.
    pub fn search_mail(&mut self, filters: &MailSearch) -> Result<Vec<MailEvent>, ApiError> {
        let mut req = ApiRequest::new(Method::Get, "/api/mail/search");
        req.query = filters
            .query_pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let value = self.send_authed(req)?.into_result()?;
        let Value::Array(items) = value else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter_map(|v| serde_json::from_value::<MailEvent>(v).ok())
            .collect())
    }

    /// Location of the CSV export for the browser/opener. Not fetched here.
    pub fn export_csv_url(&self, hours: &str) -> String {
        let hours = match hours.trim() {
            "" => crate::model::DEFAULT_SEARCH_HOURS,
            h => h,
        };
        let base = format!("{}/api/mail/export.csv", self.base_url());
        match reqwest::Url::parse_with_params(&base, &[("hours", hours)]) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}?hours={}", base, hours),
        }
    }
}
