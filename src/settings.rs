//! File locations for a generator run
//!
//! Every location can be set through the environment (see [`crate::cli::Cli`]);
//! library callers build [`Settings`] directly.

use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "/app/arch_config.yaml";
pub const DEFAULT_SCHEMA_FILE: &str = "arch_config_schema.yaml";
pub const DEFAULT_RENDERED_CONFIG_FILE: &str = "/app/arch_config_rendered.yaml";
pub const DEFAULT_ENVOY_CONFIG_FILE: &str = "/etc/envoy/envoy.yaml";
pub const DEFAULT_TEMPLATE_FILE: &str = "envoy.template.yaml";
pub const DEFAULT_TEMPLATE_ROOT: &str = "./";

/// Inputs and outputs of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Configuration document to validate
    pub config_file: PathBuf,
    /// JSON Schema (YAML or JSON) the document must satisfy
    pub schema_file: PathBuf,
    /// Where the canonical document is written
    pub rendered_config_file: PathBuf,
    /// Where the gateway configuration is written
    pub envoy_config_file: PathBuf,
    /// Template file name, relative to `template_root`
    pub template_file: String,
    pub template_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            schema_file: PathBuf::from(DEFAULT_SCHEMA_FILE),
            rendered_config_file: PathBuf::from(DEFAULT_RENDERED_CONFIG_FILE),
            envoy_config_file: PathBuf::from(DEFAULT_ENVOY_CONFIG_FILE),
            template_file: DEFAULT_TEMPLATE_FILE.to_string(),
            template_root: PathBuf::from(DEFAULT_TEMPLATE_ROOT),
        }
    }
}

impl Settings {
    /// Settings with every file placed under `dir`
    ///
    /// Input and output names match the defaults.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            config_file: dir.join("arch_config.yaml"),
            schema_file: dir.join(DEFAULT_SCHEMA_FILE),
            rendered_config_file: dir.join("arch_config_rendered.yaml"),
            envoy_config_file: dir.join("envoy.yaml"),
            template_file: DEFAULT_TEMPLATE_FILE.to_string(),
            template_root: dir.to_path_buf(),
        }
    }

    /// Full path of the template
    pub fn template_path(&self) -> PathBuf {
        self.template_root.join(&self.template_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_container_layout() {
        let settings = Settings::default();
        assert_eq!(settings.config_file, PathBuf::from("/app/arch_config.yaml"));
        assert_eq!(settings.envoy_config_file, PathBuf::from("/etc/envoy/envoy.yaml"));
        assert_eq!(settings.template_path(), PathBuf::from("./envoy.template.yaml"));
    }

    #[test]
    fn test_in_dir_places_everything_under_dir() {
        let settings = Settings::in_dir("/tmp/run");
        assert_eq!(settings.schema_file, PathBuf::from("/tmp/run/arch_config_schema.yaml"));
        assert_eq!(
            settings.template_path(),
            PathBuf::from("/tmp/run/envoy.template.yaml")
        );
    }
}
