use std::path::{Path, PathBuf};

use clap::Parser;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::form::FormState;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal client for a clinical-trial matching API")]
pub(crate) struct Args {
    /// Path to the local configuration TOML file.
    #[arg(short, long, value_name = "CONFIG_PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Matching API endpoint URL; overrides the config file.
    #[arg(long, value_name = "URL")]
    pub(crate) url: Option<String>,

    /// Patient age in years.
    #[arg(long)]
    pub(crate) age: Option<u32>,

    /// Patient gender.
    #[arg(long)]
    pub(crate) gender: Option<String>,

    /// Body mass index.
    #[arg(long)]
    pub(crate) bmi: Option<f64>,

    /// Glycated hemoglobin percentage.
    #[arg(long)]
    pub(crate) hba1c: Option<f64>,

    /// Mark the patient as pregnant.
    #[arg(long)]
    pub(crate) pregnant: bool,

    /// Free-text clinical context.
    #[arg(long, value_name = "TEXT")]
    pub(crate) clinical: Option<String>,

    /// Run a single submission from the flags above and exit instead of
    /// starting the interactive session.
    #[arg(long)]
    pub(crate) submit: bool,
}

impl Args {
    /// Whether the invocation asks for a one-shot submission rather than
    /// the interactive session.
    pub(crate) fn one_shot(&self) -> bool {
        self.submit
            || self.age.is_some()
            || self.gender.is_some()
            || self.bmi.is_some()
            || self.hba1c.is_some()
            || self.pregnant
            || self.clinical.is_some()
    }

    /// Seeds the form from the flags, falling back to the configured
    /// endpoint when `--url` is not given.
    pub(crate) fn form_state(&self, settings: &Settings) -> FormState {
        FormState {
            api_url: self
                .url
                .clone()
                .unwrap_or_else(|| settings.api.url.clone()),
            age: self.age.map(|v| v.to_string()).unwrap_or_default(),
            gender: self.gender.clone().unwrap_or_default(),
            bmi: self.bmi.map(|v| v.to_string()).unwrap_or_default(),
            hba1c: self.hba1c.map(|v| v.to_string()).unwrap_or_default(),
            pregnant: self.pregnant,
            clinical: self.clinical.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Api {
    pub(crate) url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub(crate) api: Api,
}

impl Settings {
    /// Load settings from the given TOML file when present, with sane
    /// defaults otherwise.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = ConfigBuilder::<DefaultState>::default().set_default("api.url", "")?;
        let builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder,
        };
        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
