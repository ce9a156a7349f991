use std::collections::HashMap;
use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            username: None,
            password: None,
        }
    }
}

/// Defaults, overridden by `console.toml`, overridden by environment.
/// CLI flags win over everything and are merged by the caller.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings);

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
        if let Some(v) = file_cfg.get("username") {
            settings.username = Some(v.clone());
        }
        if let Some(v) = file_cfg.get("password") {
            settings.password = Some(v.clone());
        }
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("EMS_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("EMS_USERNAME") {
        settings.username = Some(v);
    }
    if let Ok(v) = std::env::var("EMS_PASSWORD") {
        settings.password = Some(v);
    }
}
