//! Preference vault – reads/writes `~/.vigil/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vigil_types::{Theme, VigilError};

/// Persisted user preferences stored in `~/.vigil/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Colour scheme; toggled with `/theme`.
    #[serde(default)]
    pub theme: Theme,

    /// Scene started by a bare `/run`.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Frames per `/run`; `0` runs until Ctrl-C.
    #[serde(default = "default_frames")]
    pub frames: u64,

    #[serde(default = "default_frame_rate")]
    pub frame_rate_hz: u32,

    /// Fixed RNG seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_preset() -> String {
    "robot-left".to_string()
}
fn default_frames() -> u64 {
    600
}
fn default_frame_rate() -> u32 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            preset: default_preset(),
            frames: default_frames(),
            frame_rate_hz: default_frame_rate(),
            seed: None,
        }
    }
}

impl Config {
    /// Time between frames; a zero rate is treated as 1 Hz.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate_hz.max(1)
    }

    /// Frame limit for a run, `None` meaning unbounded.
    pub fn frame_limit(&self) -> Option<u64> {
        (self.frames > 0).then_some(self.frames)
    }
}

/// Return the path to `~/.vigil/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".vigil").join("config.toml")
}

/// Load the config, or defaults when no file exists.  Env overrides apply
/// either way.
pub fn load() -> Result<Config, VigilError> {
    let mut cfg = load_from(&config_path())?.unwrap_or_default();
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Load the config from a specific path.  `None` if the file does not exist.
pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, VigilError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        VigilError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    toml::from_str(&raw)
        .map(Some)
        .map_err(|e| VigilError::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Apply `VIGIL_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `VIGIL_THEME` | `theme` |
/// | `VIGIL_PRESET` | `preset` |
/// | `VIGIL_FRAMES` | `frames` |
/// | `VIGIL_FRAME_RATE` | `frame_rate_hz` |
///
/// Unparseable values are ignored.
pub fn apply_env_overrides(cfg: &mut Config) {
    apply_overrides(cfg, |key| std::env::var(key).ok());
}

/// [`apply_env_overrides`] with the variables read through `lookup`.
pub(crate) fn apply_overrides<F>(cfg: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("VIGIL_THEME")
        && let Ok(theme) = v.parse::<Theme>()
    {
        cfg.theme = theme;
    }
    if let Some(v) = lookup("VIGIL_PRESET") {
        cfg.preset = v;
    }
    if let Some(v) = lookup("VIGIL_FRAMES")
        && let Ok(frames) = v.parse::<u64>()
    {
        cfg.frames = frames;
    }
    if let Some(v) = lookup("VIGIL_FRAME_RATE")
        && let Ok(hz) = v.parse::<u32>()
    {
        cfg.frame_rate_hz = hz;
    }
}

/// Save the config to disk, creating `~/.vigil/` if necessary.
pub fn save(cfg: &Config) -> Result<(), VigilError> {
    save_to(cfg, &config_path())
}

pub(crate) fn save_to(cfg: &Config, path: &Path) -> Result<(), VigilError> {
    let io_err = |what: &str, e: std::io::Error| VigilError::Config(format!("{what}: {e}"));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err("failed to create config directory", e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700))
                .map_err(|e| io_err("failed to restrict config directory", e))?;
        }
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| VigilError::Serialization(e.to_string()))?;

    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .and_then(|mut f| f.write_all(raw.as_bytes()))
            .map_err(|e| io_err(&format!("failed to write {}", path.display()), e))?;
    }
    #[cfg(not(unix))]
    fs::write(path, raw).map_err(|e| io_err(&format!("failed to write {}", path.display()), e))?;
    Ok(())
}
