use std::{fmt::Display, fs, path::Path, path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use tracing::warn;

use crate::result_list::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};

pub const SETTINGS_FILE: &str = "storefront.toml";
pub const WISHLIST_FILE: &str = "wishlist.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub page_size: usize,
    pub page_window: usize,
    pub fetch_limit: u32,
    pub session_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "https://dummyjson.com".into(),
            request_timeout_secs: 10,
            page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_PAGE_WINDOW,
            fetch_limit: 100,
            session_path: PathBuf::from("./data/session.json"),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn wishlist_path(&self) -> PathBuf {
        self.session_path.with_file_name(WISHLIST_FILE)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    request_timeout_secs: Option<u64>,
    page_size: Option<usize>,
    page_window: Option<usize>,
    fetch_limit: Option<u32>,
    session_path: Option<PathBuf>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => warn!(path = %path.display(), %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("STOREFRONT_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = env("APP__API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = parse_env(&env, "APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = parse_env::<usize>(&env, "APP__PAGE_SIZE") {
        set_page_size(&mut settings, v);
    }
    if let Some(v) = parse_env(&env, "APP__PAGE_WINDOW") {
        settings.page_window = v;
    }
    if let Some(v) = parse_env(&env, "APP__FETCH_LIMIT") {
        settings.fetch_limit = v;
    }
    if let Some(v) = env("APP__SESSION_PATH") {
        settings.session_path = PathBuf::from(v);
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base {
        settings.api_base = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.page_size {
        set_page_size(settings, v);
    }
    if let Some(v) = file_cfg.page_window {
        settings.page_window = v;
    }
    if let Some(v) = file_cfg.fetch_limit {
        settings.fetch_limit = v;
    }
    if let Some(v) = file_cfg.session_path {
        settings.session_path = v;
    }
}

fn set_page_size(settings: &mut Settings, page_size: usize) {
    if page_size == 0 {
        warn!("page_size must be positive; keeping {}", settings.page_size);
    } else {
        settings.page_size = page_size;
    }
}

fn parse_env<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env(key)?;
    raw.trim()
        .parse()
        .map_err(|err| warn!(key, value = %raw, %err, "ignoring invalid setting"))
        .ok()
}
