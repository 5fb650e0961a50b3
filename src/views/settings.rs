use crate::cluster_form::{ClusterSettingsForm, FormField};
use crate::model::SecretUpdate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsRow {
    pub field: FormField,
    pub label: &'static str,
    pub value: String,
    /// Shown dimmed: the value is kept but has no effect in this mode.
    pub inert: bool,
    pub secret: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsModel {
    pub rows: Vec<SettingsRow>,
    pub suggested_vip: String,
    pub tls_status: &'static str,
    pub ssh_status: &'static str,
    pub dirty: bool,
}

pub fn build_settings(form: &ClusterSettingsForm) -> SettingsModel {
    let rows = FormField::ALL
        .into_iter()
        .map(|field| {
            let value = match form.secret(field) {
                Some(update) => secret_summary(update, form.secret_stored(field)),
                None => form.text(field).unwrap_or_default().to_string(),
            };
            SettingsRow {
                field,
                label: field.label(),
                value,
                inert: field.is_master_link() && !form.master_link_active(),
                secret: field.is_secret(),
            }
        })
        .collect();

    SettingsModel {
        rows,
        suggested_vip: form.suggested_vip(),
        tls_status: presence(form.has_tls),
        ssh_status: presence(form.has_ssh_key),
        dirty: form.is_dirty(),
    }
}

fn presence(stored: bool) -> &'static str {
    if stored { "installed" } else { "not installed" }
}

fn secret_summary(update: &SecretUpdate, stored: bool) -> String {
    match update {
        SecretUpdate::Keep if stored => "stored (unchanged)".to_string(),
        SecretUpdate::Keep => "not set".to_string(),
        SecretUpdate::Clear => "will be cleared".to_string(),
        SecretUpdate::Replace(v) => format!("will be replaced ({} bytes)", v.len()),
    }
}
