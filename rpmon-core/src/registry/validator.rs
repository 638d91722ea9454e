use serde_json::Value;
use jsonschema::JSONSchema;
use crate::error::{Result, RpmonError};

/// Checks a registry document against the embedded schema.
pub struct RegistryValidator {
    schema: JSONSchema,
}

impl RegistryValidator {
    pub fn new() -> Result<Self> {
        let schema_str = include_str!("schema.json");
        let schema_value: Value = serde_json::from_str(schema_str).map_err(|e| {
            RpmonError::Registry(format!("Failed to parse internal schema: {}", e))
        })?;

        let schema = JSONSchema::compile(&schema_value).map_err(|e| {
            RpmonError::Registry(format!("Failed to compile registry schema: {}", e))
        })?;

        Ok(Self { schema })
    }

    pub fn validate(&self, document: &Value) -> Result<()> {
        if let Err(errors) = self.schema.validate(document) {
            let messages: Vec<String> = errors
                .map(|err| format!("{} at '{}'", err, err.instance_path))
                .collect();
            if !messages.is_empty() {
                return Err(RpmonError::Registry(format!(
                    "Rate provider registry validation failed:\n  - {}",
                    messages.join("\n  - ")
                )));
            }
        }
        Ok(())
    }
}
