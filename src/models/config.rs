use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub user: UserSettings,
    #[serde(default)]
    pub plan: PlanSettings,
    #[serde(default)]
    pub generator: GeneratorSettings,
    /// Short names for exercises, e.g. `bp` -> `Barbell Bench Press`.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "default_user_id")]
    pub id: String,
}

fn default_user_id() -> String {
    "me".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            id: default_user_id(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanSettings {
    #[serde(default = "default_training_days")]
    pub default_training_days: u8,
}

fn default_training_days() -> u8 {
    4
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            default_training_days: default_training_days(),
        }
    }
}

/// External plan generator. Without a command, plans come from templates.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratorSettings {
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;
            file.write_all(contents.as_bytes())?;

            // The mode above only applies on create
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        Ok(())
    }

    /// Resolve an exercise alias, or return the input unchanged.
    pub fn resolve_alias(&self, input: &str) -> String {
        self.aliases
            .get(&input.to_lowercase())
            .cloned()
            .unwrap_or_else(|| input.to_string())
    }

    pub fn default_aliases() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("bp".into(), "Barbell Bench Press".into());
        m.insert("bench".into(), "Barbell Bench Press".into());
        m.insert("sq".into(), "Barbell Squats".into());
        m.insert("dl".into(), "Deadlifts".into());
        m.insert("rdl".into(), "Romanian Deadlifts".into());
        m.insert("ohp".into(), "Overhead Press".into());
        m.insert("row".into(), "Barbell Rows".into());
        m.insert("lp".into(), "Leg Press".into());
        m
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("FITPLAN_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fitplan")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}
