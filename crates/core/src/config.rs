use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub viewport: ViewportConfig,
    pub assistant: AssistantConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct CarouselConfig {
    pub slide_count: usize,
    pub desktop_delay_ms: u64,
    pub mobile_delay_ms: u64,
    pub swipe_threshold_px: f32,
    pub resize_debounce_ms: u64,
}

#[derive(Clone, Debug)]
pub struct ViewportConfig {
    pub mobile_breakpoint_px: u32,
}

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub focus_delay_ms: u64,
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub slide_count: Option<usize>,
    pub mobile_breakpoint_px: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig {
                slide_count: 3,
                desktop_delay_ms: 4_000,
                mobile_delay_ms: 5_000,
                swipe_threshold_px: 50.0,
                resize_debounce_ms: 250,
            },
            viewport: ViewportConfig { mobile_breakpoint_px: 768 },
            assistant: AssistantConfig {
                focus_delay_ms: 300,
                reply_delay_min_ms: 500,
                reply_delay_max_ms: 1_500,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl SiteConfig {
    /// Load the effective config: defaults, then file patch, then
    /// `NUTRISITE_*` env overrides, then programmatic overrides, then
    /// validation.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("nutrisite.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(carousel) = patch.carousel {
            if let Some(slide_count) = carousel.slide_count {
                self.carousel.slide_count = slide_count;
            }
            if let Some(desktop_delay_ms) = carousel.desktop_delay_ms {
                self.carousel.desktop_delay_ms = desktop_delay_ms;
            }
            if let Some(mobile_delay_ms) = carousel.mobile_delay_ms {
                self.carousel.mobile_delay_ms = mobile_delay_ms;
            }
            if let Some(swipe_threshold_px) = carousel.swipe_threshold_px {
                self.carousel.swipe_threshold_px = swipe_threshold_px;
            }
            if let Some(resize_debounce_ms) = carousel.resize_debounce_ms {
                self.carousel.resize_debounce_ms = resize_debounce_ms;
            }
        }

        if let Some(viewport) = patch.viewport {
            if let Some(mobile_breakpoint_px) = viewport.mobile_breakpoint_px {
                self.viewport.mobile_breakpoint_px = mobile_breakpoint_px;
            }
        }

        if let Some(assistant) = patch.assistant {
            if let Some(focus_delay_ms) = assistant.focus_delay_ms {
                self.assistant.focus_delay_ms = focus_delay_ms;
            }
            if let Some(reply_delay_min_ms) = assistant.reply_delay_min_ms {
                self.assistant.reply_delay_min_ms = reply_delay_min_ms;
            }
            if let Some(reply_delay_max_ms) = assistant.reply_delay_max_ms {
                self.assistant.reply_delay_max_ms = reply_delay_max_ms;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("NUTRISITE_CAROUSEL_SLIDE_COUNT") {
            self.carousel.slide_count =
                parse_u64("NUTRISITE_CAROUSEL_SLIDE_COUNT", &value)? as usize;
        }
        if let Some(value) = read_env("NUTRISITE_CAROUSEL_DESKTOP_DELAY_MS") {
            self.carousel.desktop_delay_ms = parse_u64("NUTRISITE_CAROUSEL_DESKTOP_DELAY_MS", &value)?;
        }
        if let Some(value) = read_env("NUTRISITE_CAROUSEL_MOBILE_DELAY_MS") {
            self.carousel.mobile_delay_ms = parse_u64("NUTRISITE_CAROUSEL_MOBILE_DELAY_MS", &value)?;
        }
        if let Some(value) = read_env("NUTRISITE_CAROUSEL_SWIPE_THRESHOLD_PX") {
            self.carousel.swipe_threshold_px =
                parse_f32("NUTRISITE_CAROUSEL_SWIPE_THRESHOLD_PX", &value)?;
        }
        if let Some(value) = read_env("NUTRISITE_CAROUSEL_RESIZE_DEBOUNCE_MS") {
            self.carousel.resize_debounce_ms =
                parse_u64("NUTRISITE_CAROUSEL_RESIZE_DEBOUNCE_MS", &value)?;
        }

        if let Some(value) = read_env("NUTRISITE_VIEWPORT_MOBILE_BREAKPOINT_PX") {
            self.viewport.mobile_breakpoint_px =
                parse_u32("NUTRISITE_VIEWPORT_MOBILE_BREAKPOINT_PX", &value)?;
        }

        if let Some(value) = read_env("NUTRISITE_ASSISTANT_FOCUS_DELAY_MS") {
            self.assistant.focus_delay_ms = parse_u64("NUTRISITE_ASSISTANT_FOCUS_DELAY_MS", &value)?;
        }
        if let Some(value) = read_env("NUTRISITE_ASSISTANT_REPLY_DELAY_MIN_MS") {
            self.assistant.reply_delay_min_ms =
                parse_u64("NUTRISITE_ASSISTANT_REPLY_DELAY_MIN_MS", &value)?;
        }
        if let Some(value) = read_env("NUTRISITE_ASSISTANT_REPLY_DELAY_MAX_MS") {
            self.assistant.reply_delay_max_ms =
                parse_u64("NUTRISITE_ASSISTANT_REPLY_DELAY_MAX_MS", &value)?;
        }

        let log_level =
            read_env("NUTRISITE_LOGGING_LEVEL").or_else(|| read_env("NUTRISITE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("NUTRISITE_LOGGING_FORMAT").or_else(|| read_env("NUTRISITE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(slide_count) = overrides.slide_count {
            self.carousel.slide_count = slide_count;
        }
        if let Some(mobile_breakpoint_px) = overrides.mobile_breakpoint_px {
            self.viewport.mobile_breakpoint_px = mobile_breakpoint_px;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_carousel(&self.carousel)?;
        validate_viewport(&self.viewport)?;
        validate_assistant(&self.assistant)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("nutrisite.toml"), PathBuf::from("config/nutrisite.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_carousel(carousel: &CarouselConfig) -> Result<(), ConfigError> {
    if carousel.slide_count < 2 {
        return Err(ConfigError::Validation(
            "carousel.slide_count must be at least 2".to_string(),
        ));
    }

    if carousel.desktop_delay_ms < 1_000 || carousel.mobile_delay_ms < 1_000 {
        return Err(ConfigError::Validation(
            "carousel delays must be at least 1000ms to remain readable".to_string(),
        ));
    }

    if carousel.mobile_delay_ms < carousel.desktop_delay_ms {
        return Err(ConfigError::Validation(
            "carousel.mobile_delay_ms must be >= carousel.desktop_delay_ms".to_string(),
        ));
    }

    if !carousel.swipe_threshold_px.is_finite() || carousel.swipe_threshold_px <= 0.0 {
        return Err(ConfigError::Validation(
            "carousel.swipe_threshold_px must be a positive finite number".to_string(),
        ));
    }

    if carousel.resize_debounce_ms > 2_000 {
        return Err(ConfigError::Validation(
            "carousel.resize_debounce_ms must be at most 2000ms".to_string(),
        ));
    }

    Ok(())
}

fn validate_viewport(viewport: &ViewportConfig) -> Result<(), ConfigError> {
    if !(320..=1_920).contains(&viewport.mobile_breakpoint_px) {
        return Err(ConfigError::Validation(
            "viewport.mobile_breakpoint_px must be in range 320..=1920".to_string(),
        ));
    }

    Ok(())
}

fn validate_assistant(assistant: &AssistantConfig) -> Result<(), ConfigError> {
    if assistant.focus_delay_ms > 5_000 {
        return Err(ConfigError::Validation(
            "assistant.focus_delay_ms must be at most 5000ms".to_string(),
        ));
    }

    if assistant.reply_delay_min_ms >= assistant.reply_delay_max_ms {
        return Err(ConfigError::Validation(
            "assistant.reply_delay_min_ms must be below reply_delay_max_ms".to_string(),
        ));
    }

    if assistant.reply_delay_max_ms > 10_000 {
        return Err(ConfigError::Validation(
            "assistant.reply_delay_max_ms must be at most 10000ms".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse::<f32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    carousel: Option<CarouselPatch>,
    viewport: Option<ViewportPatch>,
    assistant: Option<AssistantPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CarouselPatch {
    slide_count: Option<usize>,
    desktop_delay_ms: Option<u64>,
    mobile_delay_ms: Option<u64>,
    swipe_threshold_px: Option<f32>,
    resize_debounce_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ViewportPatch {
    mobile_breakpoint_px: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct AssistantPatch {
    focus_delay_ms: Option<u64>,
    reply_delay_min_ms: Option<u64>,
    reply_delay_max_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::{ConfigError, ConfigOverrides, LoadOptions, LogFormat, SiteConfig};

    #[test]
    fn defaults_match_the_site_constants_and_validate() {
        let config = SiteConfig::default();
        config.validate().expect("defaults must validate");

        assert_eq!(config.carousel.slide_count, 3);
        assert_eq!(config.carousel.desktop_delay_ms, 4_000);
        assert_eq!(config.carousel.mobile_delay_ms, 5_000);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.carousel.resize_debounce_ms, 250);
        assert_eq!(config.viewport.mobile_breakpoint_px, 768);
        assert_eq!(config.assistant.focus_delay_ms, 300);
        assert_eq!(config.assistant.reply_delay_min_ms, 500);
        assert_eq!(config.assistant.reply_delay_max_ms, 1_500);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_patch_overrides_selected_fields_only() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[carousel]\nslide_count = 4\nmobile_delay_ms = 6000\n\n[logging]\nformat = \"json\""
        )
        .expect("write config");

        let config = SiteConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        })
        .expect("load patched config");

        assert_eq!(config.carousel.slide_count, 4);
        assert_eq!(config.carousel.mobile_delay_ms, 6_000);
        // Untouched fields keep their defaults.
        assert_eq!(config.carousel.desktop_delay_ms, 4_000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/nutrisite.toml");
        let error = SiteConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        })
        .expect_err("must fail on missing required file");

        assert!(matches!(error, ConfigError::MissingConfigFile(path) if path == missing));
    }

    #[test]
    fn programmatic_overrides_win_over_file_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[carousel]\nslide_count = 4").expect("write config");

        let config = SiteConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides { slide_count: Some(5), ..ConfigOverrides::default() },
        })
        .expect("load");

        assert_eq!(config.carousel.slide_count, 5);
    }

    #[test]
    fn validation_rejects_inverted_reply_delays() {
        let mut config = SiteConfig::default();
        config.assistant.reply_delay_min_ms = 2_000;
        config.assistant.reply_delay_max_ms = 1_000;

        let error = config.validate().expect_err("inverted delays must fail");
        assert!(matches!(error, ConfigError::Validation(message)
            if message.contains("reply_delay_min_ms")));
    }

    #[test]
    fn validation_rejects_single_slide_carousel() {
        let mut config = SiteConfig::default();
        config.carousel.slide_count = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_mobile_delay_shorter_than_desktop() {
        let mut config = SiteConfig::default();
        config.carousel.mobile_delay_ms = 3_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn interpolation_reports_unterminated_expression() {
        let error = super::interpolate_env_vars("delay = ${UNCLOSED")
            .expect_err("unterminated interpolation");
        assert!(matches!(error, ConfigError::UnterminatedInterpolation));
    }
}
