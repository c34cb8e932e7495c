//! Function definitions advertised to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Function definition for the completion API
///
/// Describes a function the model may ask us to call: its name, what it does,
/// and a JSON schema for its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name, as the model will refer to it
    pub name: String,

    /// Description of what the function does
    pub description: String,

    /// JSON schema for the parameters object
    pub parameters: Value,
}

impl FunctionDefinition {
    /// Create a new function definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Helpers to build JSON schemas for function parameters
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use stocksage_llm::functions::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "ticker": schema::string("Stock ticker"),
    ///         "window": schema::integer("Window length"),
    ///     }),
    ///     &["ticker", "window"],
    /// );
    /// assert_eq!(schema["required"][1], "window");
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// Integer property schema
    pub fn integer(description: &str) -> Value {
        json!({
            "type": "integer",
            "description": description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_definition_creation() {
        let params = schema::object(json!({ "ticker": schema::string("Ticker") }), &["ticker"]);

        let def = FunctionDefinition::new("get_stock_price", "Latest price", params.clone());
        assert_eq!(def.name, "get_stock_price");
        assert_eq!(def.parameters, params);
        assert_eq!(def.parameters["properties"]["ticker"]["type"], "string");
    }

    #[test]
    fn test_schema_builders() {
        assert_eq!(schema::integer("n")["type"], "integer");
        assert_eq!(schema::string("s")["description"], "s");
    }
}
