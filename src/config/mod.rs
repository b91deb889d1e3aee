pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, PhonebookName};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_existing_file, validate_path, validate_required_field, Validate,
};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

/// Values given directly (e.g. on the command line); they win over the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub phonebook_name: Option<String>,
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub escape_xml: bool,
}

/// Fully resolved settings for a single conversion run.
#[derive(Debug, Clone)]
pub struct PhonebookConfig {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub phonebook_name: PhonebookName,
    pub escape_xml: bool,
}

impl PhonebookConfig {
    pub fn new(
        input_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        phonebook_name: PhonebookName,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
            phonebook_name,
            escape_xml: false,
        }
    }

    pub fn with_escape_xml(mut self, escape_xml: bool) -> Self {
        self.escape_xml = escape_xml;
        self
    }

    /// Merges overrides over an optional file config. All three of name,
    /// input and output must be known afterwards.
    pub fn resolve(overrides: ConfigOverrides, file: Option<&TomlConfig>) -> Result<Self> {
        let phonebook_name = match overrides.phonebook_name {
            Some(name) => Some(PhonebookName::new(name)?),
            None => file.and_then(|f| f.phonebook_name().cloned()),
        };
        let input_file = overrides
            .input_file
            .or_else(|| file.and_then(|f| f.input_file().map(Path::to_path_buf)));
        let output_file = overrides
            .output_file
            .or_else(|| file.and_then(|f| f.output_file().map(Path::to_path_buf)));
        let escape_xml = overrides.escape_xml || file.is_some_and(TomlConfig::escape_xml);

        let phonebook_name = validate_required_field("phonebook_name", &phonebook_name)?.clone();
        let input_file = validate_required_field("input_file", &input_file)?.clone();
        let output_file = validate_required_field("output_file", &output_file)?.clone();

        Ok(Self {
            input_file,
            output_file,
            phonebook_name,
            escape_xml,
        })
    }
}

impl ConfigProvider for PhonebookConfig {
    fn input_file(&self) -> &Path {
        &self.input_file
    }

    fn output_file(&self) -> &Path {
        &self.output_file
    }

    fn phonebook_name(&self) -> &PhonebookName {
        &self.phonebook_name
    }

    fn escape_xml(&self) -> bool {
        self.escape_xml
    }
}

impl Validate for PhonebookConfig {
    fn validate(&self) -> Result<()> {
        validate_existing_file("input_file", &self.input_file)?;
        validate_path("output_file", &self.output_file)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fritz-phonebook", version)]
#[command(about = "Convert a CSV file of contacts into a FRITZ!Box phonebook XML file")]
pub struct CliConfig {
    /// The name for the resulting phonebook. It is also shown on handheld devices.
    #[arg(long, alias = "phonebook_name")]
    pub phonebook_name: Option<String>,

    /// CSV input file (realName, home-number, mobile-number columns)
    #[arg(long, alias = "input_file")]
    pub input_file: Option<PathBuf>,

    /// Phonebook XML output file, overwritten if it exists
    #[arg(long, alias = "output_file")]
    pub output_file: Option<PathBuf>,

    /// TOML file providing any of the values above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Escape &, <, >, " and ' in names and numbers
    #[arg(long)]
    pub escape_xml: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<PhonebookConfig> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        let overrides = ConfigOverrides {
            phonebook_name: self.phonebook_name.clone(),
            input_file: self.input_file.clone(),
            output_file: self.output_file.clone(),
            escape_xml: self.escape_xml,
        };

        PhonebookConfig::resolve(overrides, file.as_ref())
    }
}
