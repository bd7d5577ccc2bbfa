use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use nutrisite_core::config::{LoadOptions, SiteConfig};
use toml::Value;

pub fn run() -> String {
    let config = match SiteConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let fields: [(&str, String, Option<&str>); 11] = [
        (
            "carousel.slide_count",
            config.carousel.slide_count.to_string(),
            Some("NUTRISITE_CAROUSEL_SLIDE_COUNT"),
        ),
        (
            "carousel.desktop_delay_ms",
            config.carousel.desktop_delay_ms.to_string(),
            Some("NUTRISITE_CAROUSEL_DESKTOP_DELAY_MS"),
        ),
        (
            "carousel.mobile_delay_ms",
            config.carousel.mobile_delay_ms.to_string(),
            Some("NUTRISITE_CAROUSEL_MOBILE_DELAY_MS"),
        ),
        (
            "carousel.swipe_threshold_px",
            config.carousel.swipe_threshold_px.to_string(),
            Some("NUTRISITE_CAROUSEL_SWIPE_THRESHOLD_PX"),
        ),
        (
            "carousel.resize_debounce_ms",
            config.carousel.resize_debounce_ms.to_string(),
            Some("NUTRISITE_CAROUSEL_RESIZE_DEBOUNCE_MS"),
        ),
        (
            "viewport.mobile_breakpoint_px",
            config.viewport.mobile_breakpoint_px.to_string(),
            Some("NUTRISITE_VIEWPORT_MOBILE_BREAKPOINT_PX"),
        ),
        (
            "assistant.focus_delay_ms",
            config.assistant.focus_delay_ms.to_string(),
            Some("NUTRISITE_ASSISTANT_FOCUS_DELAY_MS"),
        ),
        (
            "assistant.reply_delay_min_ms",
            config.assistant.reply_delay_min_ms.to_string(),
            Some("NUTRISITE_ASSISTANT_REPLY_DELAY_MIN_MS"),
        ),
        (
            "assistant.reply_delay_max_ms",
            config.assistant.reply_delay_max_ms.to_string(),
            Some("NUTRISITE_ASSISTANT_REPLY_DELAY_MAX_MS"),
        ),
        ("logging.level", config.logging.level.clone(), Some("NUTRISITE_LOGGING_LEVEL")),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            Some("NUTRISITE_LOGGING_FORMAT"),
        ),
    ];

    for (key, value, env_key) in fields {
        lines.push(render_line(
            key,
            &value,
            field_source(key, env_key, config_file_doc.as_ref(), config_file_path.as_deref()),
        ));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("nutrisite.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/nutrisite.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
