//! Tool definitions sent to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A callable tool as the model sees it: name, description and JSON Schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Key under which [`malformed_arguments`] keeps unparseable tool arguments
pub const MALFORMED_ARGUMENTS: &str = "__malformed_arguments";

/// Wrap tool-call arguments that are not valid JSON
///
/// The raw text is kept so it can be replayed to the model verbatim, while
/// consumers of the arguments can tell it apart from a real payload.
pub fn malformed_arguments(raw: impl Into<String>) -> Value {
    let mut wrapper = serde_json::Map::new();
    wrapper.insert(MALFORMED_ARGUMENTS.to_string(), Value::String(raw.into()));
    Value::Object(wrapper)
}

/// Raw text of arguments wrapped by [`malformed_arguments`]
pub fn malformed_arguments_raw(input: &Value) -> Option<&str> {
    match input {
        Value::Object(map) if map.len() == 1 => map.get(MALFORMED_ARGUMENTS)?.as_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_for_the_wire() {
        let def = ToolDefinition::new(
            "analyze_sentiment",
            "Score a text",
            json!({ "type": "object", "required": ["input"] }),
        );

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["name"], "analyze_sentiment");
        assert_eq!(value["input_schema"]["required"][0], "input");
    }

    #[test]
    fn test_malformed_arguments_marker() {
        let wrapped = malformed_arguments(r#"{"input": "Bitc"#);

        assert_eq!(malformed_arguments_raw(&wrapped), Some(r#"{"input": "Bitc"#));
        assert_eq!(malformed_arguments_raw(&json!({ "input": "Bitcoin" })), None);
        assert_eq!(malformed_arguments_raw(&json!("Bitcoin")), None);
    }
}
