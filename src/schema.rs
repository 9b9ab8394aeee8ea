use jsonschema::{validator_for, Validator};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema compile error: {0}")]
    Compile(String),
}

/// Tool arguments rejected before any backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .details.join("; "))]
pub struct ValidationError {
    pub details: Vec<String>,
}

impl ValidationError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            details: vec![detail.into()],
        }
    }
}

/// A tool input schema (JSON Schema draft 2020-12), compiled once at registration.
pub struct ToolSchema {
    raw: Value,
    validator: Validator,
}

impl ToolSchema {
    pub fn compile(raw: Value) -> Result<Self, SchemaError> {
        let validator = validator_for(&raw).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { raw, validator })
    }

    /// The schema as advertised in `tools/list`.
    pub fn as_json(&self) -> &Value {
        &self.raw
    }

    /// Check `instance` structurally, collecting every violation.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationError> {
        let details: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect();

        if details.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { details })
        }
    }
}

/// Deserialize already-validated arguments into typed params.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ValidationError> {
    serde_json::from_value(args).map_err(|e| ValidationError::new(e.to_string()))
}
