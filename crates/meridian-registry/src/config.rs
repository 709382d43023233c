//! Service configuration.

use std::env::VarError;

use meridian_space::Dimensions;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default service name reported in metadata.
pub const DEFAULT_SERVICE_NAME: &str = "position";

const COUNT_VAR: &str = "MERIDIAN_DIMENSION_COUNT";
const DEPTH_VAR: &str = "MERIDIAN_DIMENSION_DEPTH";
const NAME_VAR: &str = "MERIDIAN_SERVICE_NAME";

/// `Ok(None)` only when the variable is absent.
fn var<F>(lookup: &F, key: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            Err(Error::Config(format!("{key} is not valid UTF-8: {raw:?}")))
        }
    }
}

/// Configuration for a position service.
///
/// Dimension settings default to zero, meaning unset; a service cannot be
/// built until both are given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Number of coordinate axes per position
    pub dimension_count: usize,

    /// Exclusive upper bound on each coordinate
    pub dimension_depth: u32,

    /// Name reported in service metadata
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dimension_count: 0,
            dimension_depth: 0,
            name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create config from environment variables.
    ///
    /// Reads `MERIDIAN_DIMENSION_COUNT`, `MERIDIAN_DIMENSION_DEPTH` and
    /// `MERIDIAN_SERVICE_NAME`. Absent variables keep their defaults;
    /// present but unparsable or non-UTF-8 ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key))
    }

    /// Create config from any variable lookup with `std::env::var` semantics.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let mut config = Self::default();

        if let Some(count) = var(&lookup, COUNT_VAR)? {
            config.dimension_count = count
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid {COUNT_VAR}: {count:?}")))?;
        }
        if let Some(depth) = var(&lookup, DEPTH_VAR)? {
            config.dimension_depth = depth
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid {DEPTH_VAR}: {depth:?}")))?;
        }
        if let Some(name) = var(&lookup, NAME_VAR)? {
            config.name = name;
        }

        Ok(config)
    }

    /// Parse config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set both dimension settings.
    #[must_use]
    pub fn with_dimensions(mut self, count: usize, depth: u32) -> Self {
        self.dimension_count = count;
        self.dimension_depth = depth;
        self
    }

    /// Set the service name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validate settings and derive the space shape.
    pub fn dimensions(&self) -> Result<Dimensions> {
        if self.name.is_empty() {
            return Err(Error::Config("service name must not be empty".into()));
        }
        Ok(Dimensions::new(self.dimension_count, self.dimension_depth)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        let config = ServiceConfig::default();
        assert_eq!(config.name, "position");
        assert!(matches!(config.dimensions(), Err(Error::Config(_))));
    }

    #[test]
    fn builder_sets_dimensions() {
        let config = ServiceConfig::default().with_dimensions(3, 4);
        let dims = config.dimensions().unwrap();
        assert_eq!(dims.count(), 3);
        assert_eq!(dims.depth(), 4);
    }

    #[test]
    fn zero_depth_rejected() {
        let config = ServiceConfig::default().with_dimensions(3, 0);
        let err = config.dimensions().unwrap_err();
        assert!(err.to_string().contains("dimension depth"));
    }

    #[test]
    fn empty_name_rejected() {
        let config = ServiceConfig::default().with_dimensions(3, 4).with_name("");
        assert!(matches!(config.dimensions(), Err(Error::Config(_))));
    }

    fn lookup<'a>(
        vars: &'a [(&'a str, &'a str)],
    ) -> impl Fn(&str) -> std::result::Result<String, VarError> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn from_vars_reads_all_settings() {
        let config = ServiceConfig::from_vars(lookup(&[
            ("MERIDIAN_DIMENSION_COUNT", "3"),
            ("MERIDIAN_DIMENSION_DEPTH", " 4 "),
            ("MERIDIAN_SERVICE_NAME", "coords"),
        ]))
        .unwrap();
        assert_eq!(config, ServiceConfig::default().with_dimensions(3, 4).with_name("coords"));
    }

    #[test]
    fn from_vars_absent_keeps_defaults() {
        let config = ServiceConfig::from_vars(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn from_vars_rejects_unparsable() {
        let err = ServiceConfig::from_vars(lookup(&[("MERIDIAN_DIMENSION_DEPTH", "four")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("MERIDIAN_DIMENSION_DEPTH")));
    }

    #[test]
    fn from_vars_rejects_non_unicode() {
        let err = ServiceConfig::from_vars(|key| {
            if key == "MERIDIAN_DIMENSION_COUNT" {
                Err(VarError::NotUnicode(std::ffi::OsString::from("3")))
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("UTF-8")));
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn from_env_reads_process_environment() {
        std::env::set_var("MERIDIAN_DIMENSION_COUNT", "5");
        std::env::set_var("MERIDIAN_DIMENSION_DEPTH", "7");
        std::env::remove_var("MERIDIAN_SERVICE_NAME");
        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config, ServiceConfig::default().with_dimensions(5, 7));

        std::env::set_var("MERIDIAN_DIMENSION_COUNT", "-1");
        assert!(matches!(ServiceConfig::from_env(), Err(Error::Config(_))));

        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStringExt;
            let raw = std::ffi::OsString::from_vec(b"\xff3".to_vec());
            std::env::set_var("MERIDIAN_DIMENSION_COUNT", raw);
            let err = ServiceConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("not valid UTF-8"));
        }

        std::env::remove_var("MERIDIAN_DIMENSION_COUNT");
        std::env::remove_var("MERIDIAN_DIMENSION_DEPTH");
    }

    #[test]
    fn from_json_with_defaults() {
        let config = ServiceConfig::from_json(r#"{"dimension_count": 5, "dimension_depth": 9}"#).unwrap();
        assert_eq!(config.dimension_count, 5);
        assert_eq!(config.dimension_depth, 9);
        assert_eq!(config.name, DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            ServiceConfig::from_json(r#"{"dimension_count": -1}"#),
            Err(Error::Config(_))
        ));
    }
}
