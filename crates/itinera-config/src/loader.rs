// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/itinera/itinera.toml`, then `~/.config/itinera/itinera.toml`,
//! then `./itinera.toml`, then `ITINERA_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ItineraConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/itinera/itinera.toml";
pub(crate) const LOCAL_CONFIG: &str = "itinera.toml";

/// Config sections that environment variables may target.
const ENV_SECTIONS: [&str; 4] = ["server", "openai", "storage", "client"];

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("itinera").join("itinera.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/itinera/itinera.toml`
/// 3. `~/.config/itinera/itinera.toml`
/// 4. `./itinera.toml`
/// 5. `ITINERA_*` environment variables
pub fn load_config() -> Result<ItineraConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ItineraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ItineraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ItineraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ItineraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ItineraConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Maps `ITINERA_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Keys arrive uppercase and are lowercased first. Only the first underscore
/// after a known section name becomes a dot, so
/// `ITINERA_STORAGE_DATABASE_PATH` maps to `storage.database_path`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("ITINERA_").map(|key| map_env_key(key.as_str()).into())
}

pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
