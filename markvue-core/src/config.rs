//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Folder under the input root holding custom layout templates.
pub const LAYOUTS_FOLDER: &str = "layouts";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("input folder {0} does not exist")]
    MissingInputFolder(PathBuf),
}

/// Output flavor of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Vue single-file components plus route/post index modules.
    #[default]
    Vue,

    /// Plain rendered HTML files, no index artifacts.
    Html,
}

impl OutputType {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputType::Vue => "vue",
            OutputType::Html => "html",
        }
    }
}

/// Main configuration struct matching the markvue.yml schema.
///
/// A loaded `Config` is immutable and is passed explicitly into every
/// component entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Folder scanned for markdown documents.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Folder receiving generated files.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub output_type: OutputType,

    /// Class applied to documents that don't override `style`.
    #[serde(default)]
    pub default_style: Option<String>,

    /// Also generate the TypeScript declaration companions.
    #[serde(default)]
    pub typescript: bool,

    /// Emit per-document meta-info script blocks.
    #[serde(default = "default_true")]
    pub output_meta: bool,

    /// Project folder the module alias maps to.
    #[serde(default = "default_root_folder")]
    pub root_folder: PathBuf,

    /// Import alias used for route imports under `root_folder`.
    #[serde(default = "default_module_alias")]
    pub module_alias: String,

    /// Emit webpack-style lazy imports in the route table.
    #[serde(default)]
    pub lazy_routes: bool,

    /// Also write a prerender route list module.
    #[serde(default)]
    pub prerender: bool,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_input() -> PathBuf {
    PathBuf::from("src/md")
}

fn default_output() -> PathBuf {
    PathBuf::from("src/markvue")
}

fn default_true() -> bool {
    true
}

fn default_root_folder() -> PathBuf {
    PathBuf::from("src")
}

fn default_module_alias() -> String {
    String::from("@")
}

impl Config {
    /// Load configuration from a YAML file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        let input = config.input_dir();
        if !input.is_dir() {
            return Err(ConfigError::MissingInputFolder(input));
        }

        Ok(config)
    }

    /// Build a config programmatically (defaults everywhere else).
    pub fn with_dirs(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            output_type: OutputType::default(),
            default_style: None,
            typescript: false,
            output_meta: true,
            root_folder: default_root_folder(),
            module_alias: default_module_alias(),
            lazy_routes: false,
            prerender: false,
            ignore_patterns: Vec::new(),
            config_path: None,
        }
    }

    /// Get the input directory, resolved relative to the config file.
    pub fn input_dir(&self) -> PathBuf {
        self.resolve_path(&self.input)
    }

    /// Get the output directory, resolved relative to the config file.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.output)
    }

    /// Folder searched for custom layout templates.
    pub fn layouts_dir(&self) -> PathBuf {
        self.input_dir().join(LAYOUTS_FOLDER)
    }

    /// Resolve a path relative to the config file location.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::with_dirs("content", "generated");

        assert_eq!(config.output_type, OutputType::Vue);
        assert!(config.output_meta);
        assert!(!config.typescript);
        assert_eq!(config.module_alias, "@");
        assert_eq!(config.root_folder, PathBuf::from("src"));
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        let config_path = dir.path().join("markvue.yml");
        fs::write(
            &config_path,
            "input: content\noutput: generated\ntypescript: true\n",
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.input_dir(), dir.path().join("content"));
        assert_eq!(config.output_dir(), dir.path().join("generated"));
        assert_eq!(config.layouts_dir(), dir.path().join("content/layouts"));
        assert!(config.typescript);
    }

    #[test]
    fn test_missing_input_folder_is_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("markvue.yml");
        fs::write(&config_path, "input: does-not-exist\noutput: generated\n").unwrap();

        let err = Config::from_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInputFolder(_)));
    }

    #[test]
    fn test_output_type_parsing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        let config_path = dir.path().join("markvue.yml");
        fs::write(
            &config_path,
            "input: content\noutput: generated\noutput_type: html\n",
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.output_type, OutputType::Html);
        assert_eq!(config.output_type.extension(), "html");
    }
}
