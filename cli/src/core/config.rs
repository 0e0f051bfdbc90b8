//! # LaundryBot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the LaundryBot configuration. It
//! combines defaults, user settings and project-specific overrides.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.laundrybot.toml` in current directory or ancestors
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [assistant]
//! contact = "0811-0000-1111"
//! whatsapp_number = "628110000111"
//! catalog_path = "~/laundry/catalog.toml"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 9090
//! enable_cors = false
//! ```
//!
//! The configuration is loaded once per command execution and passed to the
//! catalog loader and the server. A `--catalog` path given on the command line
//! replaces `catalog_path` before paths are expanded and the result validated.
//!
use crate::core::error::{LaundryError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub server: ServerDefaults,
}

/// Settings for the chat assistant itself.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Support phone number shown in help and prompt responses. Overrides the catalog's.
    pub contact: Option<String>,
    /// WhatsApp number (digits only, international format) for the support deep link.
    pub whatsapp_number: Option<String>,
    /// Path to a replacement catalog TOML file (can use ~). Will be expanded.
    pub catalog_path: Option<String>,
}

/// Defaults for `laundrybot serve`. Command-line flags take precedence.
///
/// Unset fields fall back to the built-in values through the accessors.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerDefaults {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub enable_cors: Option<bool>,
}

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

impl ServerDefaults {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_SERVER_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn enable_cors(&self) -> bool {
        self.enable_cors.unwrap_or(true)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".laundrybot.toml";

pub fn load_config(catalog_override: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    finalize_config(merged_config, catalog_override)
}

/// Applies the command-line catalog override, then expands and validates.
fn finalize_config(mut config: Config, catalog_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = catalog_override {
        debug!("Catalog path overridden on command line: {}", path.display());
        config.assistant.catalog_path = Some(path.to_string_lossy().into_owned());
    }
    expand_config_paths(&mut config).context("Failed to expand paths in configuration")?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "LaundryBot", "laundrybot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.laundrybot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.laundrybot.toml`.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => return None,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    Config {
        assistant: AssistantConfig {
            contact: project_cfg.assistant.contact.or(user.assistant.contact),
            whatsapp_number: project_cfg
                .assistant
                .whatsapp_number
                .or(user.assistant.whatsapp_number),
            catalog_path: project_cfg
                .assistant
                .catalog_path
                .or(user.assistant.catalog_path),
        },
        server: ServerDefaults {
            host: project_cfg.server.host.or(user.server.host),
            port: project_cfg.server.port.or(user.server.port),
            enable_cors: project_cfg.server.enable_cors.or(user.server.enable_cors),
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(path) = config.assistant.catalog_path.as_mut() {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded catalog path: {}", path);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if let Some(contact) = &config.assistant.contact {
        if contact.trim().is_empty() {
            return Err(anyhow!(LaundryError::Config(
                "Assistant contact number cannot be empty.".to_string()
            )));
        }
    }
    if let Some(number) = &config.assistant.whatsapp_number {
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(anyhow!(LaundryError::Config(format!(
                "Invalid WhatsApp number '{}'. Use digits only, e.g. 6281234567890.",
                number
            ))));
        }
    }
    if let Some(catalog_path) = &config.assistant.catalog_path {
        let path = PathBuf::from(catalog_path);
        if !path.exists() {
            return Err(anyhow!(LaundryError::Config(format!(
                "Configured catalog file '{}' does not exist.",
                path.display()
            ))));
        } else if !path.is_file() {
            return Err(anyhow!(LaundryError::Config(format!(
                "Configured catalog path '{}' exists but is not a file.",
                path.display()
            ))));
        }
    }
    if config.server.host().parse::<IpAddr>().is_err() {
        return Err(anyhow!(LaundryError::Config(format!(
            "Invalid server host '{}'. Expected an IP address.",
            config.server.host()
        ))));
    }
    info!("Configuration validation successful.");
    Ok(())
}
