use crate::cluster_form::FormError;

use super::*;

impl App {
    pub(super) fn run_settings_command(&mut self, cmd: &str, args: &[String]) {
        match cmd {
            "set" => {
                let Some((field, value)) = args.split_first() else {
                    self.push_error("usage: set <field> <value...>".to_string());
                    return;
                };
                match field.parse::<FormField>() {
                    Ok(field) => {
                        let res = self.core.set_form_field(field, &value.join(" "));
                        self.form_feedback(field, res);
                    }
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            "unset" => {
                let [field] = args else {
                    self.push_error("usage: unset <secret field>".to_string());
                    return;
                };
                match field.parse::<FormField>() {
                    Ok(field) => {
                        let res = self.core.clear_form_secret(field);
                        self.form_feedback(field, res);
                    }
                    Err(err) => self.push_error(err.to_string()),
                }
            }
            "mode" => match args.first() {
                Some(mode) => {
                    let res = self.core.set_form_field(FormField::ClusterMode, mode);
                    self.form_feedback(FormField::ClusterMode, res);
                }
                None => self.core.cycle_cluster_mode(),
            },
            "vip" => match self.core.suggest_vip() {
                Some(vip) => self.push_output(vec![format!("vip_address set to {}", vip)]),
                None => self.push_error("settings are still loading".to_string()),
            },
            "save" => self.core.save_cluster(),
            "peer" => self.core.test_peer(),
            "close" => self.core.close_settings(),
            other => self.push_error(format!("not available in settings: {}", other)),
        }
    }

    /// Enter on a row: the mode cycles, anything else opens an editor.
    pub(super) fn edit_selected_field(&mut self) {
        let field = self.selected_field();
        if field == FormField::ClusterMode {
            self.core.cycle_cluster_mode();
            return;
        }
        let Some(form) = self.core.form() else {
            return;
        };

        let mut lines = vec![format!("{} ({})", field.label(), field.key())];
        let current = if field.is_secret() {
            lines.push("Paste the value or enter @/path/to/file.".to_string());
            lines.push("Leave empty to keep what is stored; use 'unset' to remove it.".to_string());
            String::new()
        } else {
            form.text(field).unwrap_or_default().to_string()
        };
        if field.is_master_link() && !form.master_link_active() {
            lines.push("Only used when this node runs as slave.".to_string());
        }

        let mut modal = Modal::text_input(
            "Edit setting",
            &format!("{}: ", field.key()),
            TextInputAction::EditField(field),
            false,
            lines,
        );
        modal.input.set(current);
        self.open_modal(modal);
    }

    fn form_feedback(&mut self, field: FormField, res: Result<(), FormError>) {
        match res {
            Ok(()) => self.push_output(vec![format!("{} updated (not saved yet)", field.key())]),
            Err(err) => self.push_error(err.to_string()),
        }
    }
}
