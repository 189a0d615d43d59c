use crate::core::calculator::aggregate::{
    AggregateOptions, DEFAULT_FLAT_DEDUCTION_MINUTES, DEFAULT_FLAT_THRESHOLD_MINUTES,
    DayBoundary, LunchPolicy, StatusFilter,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// `lunch_policy` as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunchPolicyKind {
    #[default]
    Explicit,
    Flat,
}

impl LunchPolicyKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "explicit" => Some(LunchPolicyKind::Explicit),
            "flat" => Some(LunchPolicyKind::Flat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub lunch_policy: LunchPolicyKind,
    #[serde(default = "default_flat_threshold")]
    pub flat_lunch_threshold_minutes: i64,
    #[serde(default = "default_flat_deduction")]
    pub flat_lunch_deduction_minutes: i64,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub day_boundary: DayBoundary,
    #[serde(default)]
    pub require_location_and_photo: bool,
}

fn default_flat_threshold() -> i64 {
    DEFAULT_FLAT_THRESHOLD_MINUTES
}
fn default_flat_deduction() -> i64 {
    DEFAULT_FLAT_DEDUCTION_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            current_user: None,
            lunch_policy: LunchPolicyKind::default(),
            flat_lunch_threshold_minutes: default_flat_threshold(),
            flat_lunch_deduction_minutes: default_flat_deduction(),
            status_filter: StatusFilter::default(),
            day_boundary: DayBoundary::default(),
            require_location_and_photo: false,
        }
    }
}

impl Config {
    /// Configuration directory: `$PONTOLOG_HOME`, else `~/.pontolog`.
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var("PONTOLOG_HOME") {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pontolog")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("pontolog.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("pontolog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Write a fresh config file (unless `is_test`) pointing at `custom_db`
    /// or the default database path, and return it.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(config)
    }

    pub fn lunch_policy(&self) -> LunchPolicy {
        self.lunch_policy_for(self.lunch_policy)
    }

    pub fn lunch_policy_for(&self, kind: LunchPolicyKind) -> LunchPolicy {
        match kind {
            LunchPolicyKind::Explicit => LunchPolicy::ExplicitEvents,
            LunchPolicyKind::Flat => LunchPolicy::FlatDeduction {
                threshold_minutes: self.flat_lunch_threshold_minutes,
                deduction_minutes: self.flat_lunch_deduction_minutes,
            },
        }
    }

    /// The employee commands act as (`--user` wins over the file).
    pub fn acting_user(&self) -> AppResult<&str> {
        self.current_user
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(AppError::MissingUser)
    }

    /// Aggregation options as configured.
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            status_filter: self.status_filter,
            lunch_policy: self.lunch_policy(),
            day_boundary: self.day_boundary,
        }
    }
}
