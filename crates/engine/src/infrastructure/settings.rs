//! Raid settings loading.
//!
//! Settings come from an optional JSON file (every field has a default) and
//! are then overridden by `RAIDLEDGER_*` environment variables:
//! - RAIDLEDGER_SCAV_EXTRACT_GAIN: fence standing for a scav extraction (>= 0)
//! - RAIDLEDGER_KEEP_FIR_SECURE_CONTAINER: keep found-in-raid in the secure container on death
//! - RAIDLEDGER_INSURANCE_RETURN_OVERRIDE_SECONDS: fixed insurance return delay (>= 0)
//! - RAIDLEDGER_SCAV_BASE_COOLDOWN_SECONDS: base scav cooldown (>= 0)
//! - RAIDLEDGER_SAVE_HEALTH: persist post-raid health

use std::path::Path;
use std::str::FromStr;

use raidledger_domain::RaidSettings;

/// Environment variable naming the settings file.
pub const SETTINGS_PATH_VAR: &str = "RAIDLEDGER_SETTINGS";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {message}")]
    Read { path: String, message: String },
    #[error("Invalid settings file {path}: {message}")]
    Parse { path: String, message: String },
}

/// Loads settings from `path` (defaults when `None`) and applies environment
/// overrides.
pub async fn load_raid_settings(path: Option<&Path>) -> Result<RaidSettings, SettingsError> {
    let mut settings = match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| SettingsError::Read {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            let settings: RaidSettings =
                serde_json::from_str(&raw).map_err(|e| SettingsError::Parse {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            tracing::info!(path = %path.display(), "Loaded raid settings file");
            settings
        }
        None => {
            tracing::info!("No raid settings file configured, using defaults");
            RaidSettings::default()
        }
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

/// Applies `RAIDLEDGER_*` overrides read through `lookup`.
pub fn apply_env_overrides(settings: &mut RaidSettings, lookup: impl Fn(&str) -> Option<String>) {
    settings.in_raid.scav_extract_gain = env_or(
        &lookup,
        "RAIDLEDGER_SCAV_EXTRACT_GAIN",
        settings.in_raid.scav_extract_gain,
        |gain| *gain >= 0.0,
    );
    settings.in_raid.keep_fir_secure_container_on_death = env_or(
        &lookup,
        "RAIDLEDGER_KEEP_FIR_SECURE_CONTAINER",
        settings.in_raid.keep_fir_secure_container_on_death,
        |_| true,
    );
    settings.insurance.return_time_override_seconds = env_or(
        &lookup,
        "RAIDLEDGER_INSURANCE_RETURN_OVERRIDE_SECONDS",
        settings.insurance.return_time_override_seconds,
        |seconds| *seconds >= 0,
    );
    settings.player_scav.base_cooldown_seconds = env_or(
        &lookup,
        "RAIDLEDGER_SCAV_BASE_COOLDOWN_SECONDS",
        settings.player_scav.base_cooldown_seconds,
        |seconds| *seconds >= 0.0,
    );
    settings.health.save_health = env_or(
        &lookup,
        "RAIDLEDGER_SAVE_HEALTH",
        settings.health.save_health,
        |_| true,
    );
}

/// Returns the parsed variable when set and valid, `current` otherwise.
fn env_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    current: T,
    valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = lookup(name) else {
        return current;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => {
            tracing::info!(variable = name, value = ?value, "Applied environment override");
            value
        }
        Ok(value) => {
            tracing::warn!(variable = name, value = ?value, "Environment override out of range, ignoring");
            current
        }
        Err(_) => {
            tracing::warn!(variable = name, raw = %raw, "Environment override is not valid, ignoring");
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn valid_overrides_apply() {
        let mut settings = RaidSettings::default();
        apply_env_overrides(
            &mut settings,
            lookup(&[
                ("RAIDLEDGER_SCAV_EXTRACT_GAIN", "0.05"),
                ("RAIDLEDGER_INSURANCE_RETURN_OVERRIDE_SECONDS", "60"),
                ("RAIDLEDGER_SAVE_HEALTH", "false"),
            ]),
        );
        assert_eq!(settings.in_raid.scav_extract_gain, 0.05);
        assert_eq!(settings.insurance.return_time_override_seconds, 60);
        assert!(!settings.health.save_health);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut settings = RaidSettings::default();
        apply_env_overrides(
            &mut settings,
            lookup(&[
                ("RAIDLEDGER_SCAV_EXTRACT_GAIN", "-1"),
                ("RAIDLEDGER_SCAV_BASE_COOLDOWN_SECONDS", "soon"),
            ]),
        );
        assert_eq!(settings.in_raid.scav_extract_gain, 0.01);
        assert_eq!(settings.player_scav.base_cooldown_seconds, 1500.0);
    }

    #[tokio::test]
    async fn settings_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"in_raid": {{"laboratory_location": "labs"}}}}"#).unwrap();
        let settings = load_raid_settings(Some(file.path())).await.unwrap();
        assert_eq!(settings.in_raid.laboratory_location, "labs");
    }

    #[tokio::test]
    async fn malformed_settings_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = load_raid_settings(Some(file.path())).await;
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }
}
