//! JSON written to stdout for the runtime.

use super::conf::PluginConf;
use crate::err::{ConfigValidationError, PluginError};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;

pub const SUPPORTED_VERSIONS: &[&str] = &["0.1.0", "0.2.0", "0.3.0", "0.3.1", "0.4.0"];
pub const CURRENT_VERSION: &str = "0.4.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    pub cni_version: String,
    pub code: u32,
    pub msg: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl ErrorResult {
    /// `msg` is the error itself, `details` its chain of causes.
    pub fn new(cni_version: &str, error: &PluginError) -> Self {
        let mut causes = vec![];
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            cni_version: cni_version.to_string(),
            code: error.code(),
            msg: error.to_string(),
            details: causes.join(": "),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResult {
    pub cni_version: &'static str,
    pub supported_versions: &'static [&'static str],
}

impl Default for VersionResult {
    fn default() -> Self {
        Self {
            cni_version: CURRENT_VERSION,
            supported_versions: SUPPORTED_VERSIONS,
        }
    }
}

/// The previous plugin's result, stamped with the caller's `cniVersion`.
pub fn pass_through(conf: &PluginConf) -> Result<Value, ConfigValidationError> {
    let mut result = conf
        .prev_result
        .clone()
        .ok_or(ConfigValidationError::MissingPrevResult)?;

    if let Value::Object(fields) = &mut result {
        fields.insert(
            "cniVersion".to_string(),
            Value::String(conf.cni_version.clone()),
        );
    }

    Ok(result)
}
