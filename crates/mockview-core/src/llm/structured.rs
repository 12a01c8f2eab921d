//! JSON-only generation helpers.

use super::error::GatewayError;
use super::request::GenerationRequest;
use serde_json::Value;

const JSON_PROMPT_SUFFIX: &str =
    "\n\nRespond with valid JSON only. Do not include any explanatory text before or after the JSON.";
const JSON_SYSTEM_SUFFIX: &str = "\n\nYou must respond with valid JSON format only.";
const JSON_SYSTEM_DEFAULT: &str =
    "You are a helpful assistant that responds with valid JSON format only.";

/// Top-level keys a structured reply must contain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredSchema {
    required: Vec<String>,
}

impl StructuredSchema {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Checks that `value` is an object containing every required key.
    pub fn validate(&self, value: &Value) -> Result<(), GatewayError> {
        let Some(object) = value.as_object() else {
            return Err(GatewayError::generation(
                "Response does not match schema: expected a JSON object",
            ));
        };
        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|key| !object.contains_key(key.as_str()))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::generation(format!(
                "Response does not match schema: missing {}",
                missing.join(", ")
            )))
        }
    }
}

/// Adds JSON-only instructions to both the prompt and the system message.
pub fn json_only(mut request: GenerationRequest) -> GenerationRequest {
    request.prompt.push_str(JSON_PROMPT_SUFFIX);
    request.system = Some(match request.system.take() {
        Some(system) => format!("{system}{JSON_SYSTEM_SUFFIX}"),
        None => JSON_SYSTEM_DEFAULT.to_string(),
    });
    request
}

/// Removes a surrounding Markdown code fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parses a model reply as JSON and optionally validates it.
pub fn parse_structured(
    raw: &str,
    schema: Option<&StructuredSchema>,
) -> Result<Value, GatewayError> {
    let body = strip_code_fences(raw);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::generation(format!("Failed to parse JSON response: {e}")))?;
    if let Some(schema) = schema {
        schema.validate(&value)?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_only_appends_instructions() {
        let request = json_only(GenerationRequest::new("Rate this"));
        assert!(request.prompt.starts_with("Rate this\n\nRespond with valid JSON only."));
        assert_eq!(request.system.as_deref(), Some(JSON_SYSTEM_DEFAULT));

        let request = json_only(GenerationRequest::new("Rate this").with_system("Be fair."));
        assert_eq!(
            request.system.as_deref(),
            Some("Be fair.\n\nYou must respond with valid JSON format only.")
        );
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_structured_with_schema() {
        let schema = StructuredSchema::new(["scores", "strengths"]);
        let value = parse_structured("```json\n{\"scores\": {}, \"strengths\": []}\n```", Some(&schema))
            .unwrap();
        assert_eq!(value, json!({"scores": {}, "strengths": []}));

        let err = parse_structured("{\"scores\": {}}", Some(&schema)).unwrap_err();
        assert_eq!(
            err,
            GatewayError::generation("Response does not match schema: missing strengths")
        );
    }

    #[test]
    fn test_parse_failure_is_generation_error() {
        let err = parse_structured("Sure! Here is your JSON", None).unwrap_err();
        assert!(matches!(err, GatewayError::Generation(_)));
    }
}
