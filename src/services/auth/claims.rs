use serde_json::{Map, Value};

/// Verified token payload, exactly as decoded.
///
/// Handlers only ever see this type; how it was verified is the authorizer's business.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// Raw `permissions` entry, if present at all.
    pub fn permissions(&self) -> Option<&Value> {
        self.get("permissions")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
