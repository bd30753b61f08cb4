use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Cost functions the engine accepts.
pub const COST_FUNCTIONS: [&str; 7] = [
    "mutualinfo",
    "corratio",
    "normcorr",
    "normmi",
    "leastsq",
    "labeldiff",
    "bbr",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub flirt: FlirtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlirtConfig {
    /// Histogram bins for the cost function.
    pub bins: u32,
    /// Degrees of freedom; 6 is a rigid-body registration.
    pub dof: u32,
    pub cost_function: String,
    /// Symmetric search range applied to all three rotation axes.
    pub search_range_deg: i32,
    pub interp: String,
}

impl Default for FlirtConfig {
    fn default() -> Self {
        Self {
            bins: 256,
            dof: 6,
            cost_function: "leastsq".to_string(),
            search_range_deg: 90,
            interp: "trilinear".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;

        if content.trim_start().starts_with('{') {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.flirt.bins == 0 {
            errors.push("bins must be positive".to_string());
        }

        if !COST_FUNCTIONS.contains(&self.flirt.cost_function.as_str()) {
            errors.push(format!(
                "'{}' is not a valid cost function, use one of {:?}",
                self.flirt.cost_function, COST_FUNCTIONS
            ));
        }

        if self.flirt.search_range_deg <= 0 || self.flirt.search_range_deg > 180 {
            errors.push("search range must be between 1 and 180 degrees".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn load_config_or_default(config_path: Option<&str>) -> Config {
    match config_path {
        Some(path) => match Config::load_from_file(path) {
            Ok(config) => {
                if let Err(errors) = config.validate() {
                    eprintln!("Configuration validation errors:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    eprintln!("Using default configuration instead.");
                    Config::default()
                } else {
                    config
                }
            }
            Err(e) => {
                eprintln!("Failed to load config from '{}': {}", path, e);
                eprintln!("Using default configuration.");
                Config::default()
            }
        },
        None => Config::default(),
    }
}
