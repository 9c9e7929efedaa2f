use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request-scoped bag of project fields supplied by the caller.
///
/// No schema is imposed here: a permit's required fields decide what must be present, and keys
/// no permit asks for still flow through to rendering.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct ProjectData(Map<String, Value>);

impl ProjectData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// A field is provided when it is present and not blank.
    pub fn is_provided(&self, field: &str) -> bool {
        self.0.get(field).is_some_and(|value| !is_blank(value))
    }

    /// Display form of a provided field; `None` when the field is missing or blank.
    pub fn display_value(&self, field: &str) -> Option<String> {
        let value = self.0.get(field).filter(|value| !is_blank(value))?;
        Some(match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ProjectData {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl<K, V> FromIterator<(K, V)> for ProjectData
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

/// Empty strings, `null`, `false`, zero and empty containers all count as "not supplied".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{is_blank, ProjectData};

    #[test]
    fn falsy_scalars_are_blank() {
        let falsy =
            [json!(null), json!(""), json!(0), json!(0.0), json!(false), json!([]), json!({})];
        for value in falsy {
            assert!(is_blank(&value), "{value} should be blank");
        }
        for value in [json!(" "), json!(1), json!(true), json!("0"), json!(["x"])] {
            assert!(!is_blank(&value), "{value} should be provided");
        }
    }

    #[test]
    fn display_value_renders_non_strings_as_json() {
        let data: ProjectData =
            [("stories", json!(2)), ("ownerName", json!("Jane")), ("notes", json!(""))]
                .into_iter()
                .collect();

        assert_eq!(data.display_value("stories").as_deref(), Some("2"));
        assert_eq!(data.display_value("ownerName").as_deref(), Some("Jane"));
        assert_eq!(data.display_value("notes"), None);
        assert_eq!(data.display_value("absent"), None);
    }
}
