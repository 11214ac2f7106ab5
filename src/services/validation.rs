use crate::errors::ToolError;
use serde_json::Value;

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: Option<&Value>, label: &str) -> Result<String, ToolError> {
        let text = value.and_then(|v| v.as_str()).ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a non-empty string", label))
        })?;
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(normalized.to_string())
    }

    pub fn ensure_optional_string(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<String>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => self.ensure_string(Some(val), label).map(Some),
        }
    }

    pub fn ensure_optional_u64(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<u64>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => val.as_u64().map(Some).ok_or_else(|| {
                ToolError::invalid_params(format!("{} must be a non-negative integer", label))
            }),
        }
    }

    pub fn ensure_optional_bool(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<bool>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => val
                .as_bool()
                .map(Some)
                .ok_or_else(|| ToolError::invalid_params(format!("{} must be a boolean", label))),
        }
    }

    pub fn ensure_string_array(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Vec<String>, ToolError> {
        let items = value.and_then(|v| v.as_array()).ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be an array of strings", label))
        })?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let text = item.as_str().map(str::trim).unwrap_or_default();
            if text.is_empty() {
                return Err(ToolError::invalid_params(format!(
                    "{} must contain only non-empty strings",
                    label
                )));
            }
            out.push(text.to_string());
        }
        if out.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must not be empty",
                label
            )));
        }
        Ok(out)
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}
