//! Runtime configuration from environment variables.
//!
//! | Variable               | Default      |
//! |------------------------|--------------|
//! | `VTT_DATA_DIR`         | `./vtt-data` |
//! | `VTT_INVENTORY_ROWS`   | `6`          |
//! | `VTT_INVENTORY_COLS`   | `10`         |
//! | `VTT_NOTIFICATION_CAP` | `100`        |
//! | `VTT_SEED_CREATURES`   | `true`       |
//! | `VTT_CHARACTER_NAME`   | `Adventurer` |

use std::path::{Path, PathBuf};
use std::str::FromStr;

use vtt_domain::InventoryCapacity;

pub const DEFAULT_DATA_DIR: &str = "./vtt-data";
pub const DEFAULT_NOTIFICATION_CAP: usize = 100;
pub const DEFAULT_CHARACTER_NAME: &str = "Adventurer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Capacity used when no inventory has been stored yet
    pub inventory_capacity: InventoryCapacity,
    pub notification_cap: usize,
    pub seed_creatures: bool,
    pub character_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            inventory_capacity: InventoryCapacity::default(),
            notification_cap: DEFAULT_NOTIFICATION_CAP,
            seed_creatures: true,
            character_name: DEFAULT_CHARACTER_NAME.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Unparseable values fall back to the
    /// default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_dir = get("VTT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let rows = parse_or(
            "VTT_INVENTORY_ROWS",
            get("VTT_INVENTORY_ROWS"),
            defaults.inventory_capacity.rows,
        );
        let cols = parse_or(
            "VTT_INVENTORY_COLS",
            get("VTT_INVENTORY_COLS"),
            defaults.inventory_capacity.cols,
        );
        let notification_cap = parse_or(
            "VTT_NOTIFICATION_CAP",
            get("VTT_NOTIFICATION_CAP"),
            defaults.notification_cap,
        );
        let seed_creatures = match get("VTT_SEED_CREATURES") {
            None => defaults.seed_creatures,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    key = "VTT_SEED_CREATURES",
                    value = %raw,
                    "Invalid flag, using default"
                );
                defaults.seed_creatures
            }),
        };
        let character_name = get("VTT_CHARACTER_NAME").unwrap_or(defaults.character_name);

        Self {
            data_dir,
            inventory_capacity: InventoryCapacity::new(rows, cols),
            notification_cap,
            seed_creatures,
            character_name,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => {
            tracing::warn!(key, value = %raw, default = %default, "Invalid number, using default");
            default
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load `.env.local` then `.env` from the workspace root, if present.
///
/// Variables already set in the process environment win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read env file");
            }
        }
    }
}
