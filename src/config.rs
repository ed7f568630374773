use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Mount point of the volume to report on.
    pub mount_point: String,
    /// Echo each dispatched trigger to stderr. Off by default; the provider
    /// is silent unless asked.
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Client binary of the host bar; receives each message as one argument.
    pub bar_command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// What to do when a poll-cycle volume query fails.
    #[serde(default)]
    pub on_error: SampleErrorPolicy,
}

/// Per-cycle sampler failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SampleErrorPolicy {
    /// Keep the previous snapshot and carry on.
    #[default]
    Stale,
    /// Treat the failed query as fatal.
    Exit,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            general:  GeneralConfig::default(),
            notify:   NotifyConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { mount_point: "/".into(), verbose: false }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { bar_command: "sketchybar".into() }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { on_error: SampleErrorPolicy::Stale }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diskev").join("diskev.toml"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# diskev configuration\n# Generated on first run; edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.general.mount_point, "/");
        assert!(!cfg.general.verbose);
        assert_eq!(cfg.notify.bar_command, "sketchybar");
        assert_eq!(cfg.sampling.on_error, SampleErrorPolicy::Stale);
    }

    #[test]
    fn parses_error_policy() {
        let cfg: Config = toml::from_str("[sampling]\non_error = \"exit\"\n").unwrap();
        assert_eq!(cfg.sampling.on_error, SampleErrorPolicy::Exit);
    }

    #[test]
    fn default_file_round_trips() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let cfg: Config = toml::from_str(&text).unwrap();
        assert_eq!(cfg.general.mount_point, "/");
        assert_eq!(cfg.sampling.on_error, SampleErrorPolicy::Stale);
    }
}
