use std::collections::HashMap;

/// Anything that can hand out the current value of a named form input.
///
/// Values are returned exactly as entered; `None` means the input is absent.
pub trait FormSource {
    fn field_value(&self, id: &str) -> Option<String>;
}

impl FormSource for HashMap<String, String> {
    fn field_value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Flatten a JSON object into form values.
///
/// Strings are taken as they are, numbers and booleans by their textual form,
/// `null` and nested values are dropped.
pub fn fields_from_json(object: serde_json::Map<String, serde_json::Value>) -> HashMap<String, String> {
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            serde_json::Value::Number(n) => Some((key, n.to_string())),
            serde_json::Value::Bool(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_map_source_returns_raw_values() {
        let mut fields = HashMap::new();
        fields.insert("numeroAula".to_string(), " 101 ".to_string());

        assert_eq!(fields.field_value("numeroAula").as_deref(), Some(" 101 "));
        assert_eq!(fields.field_value("comentario"), None);
    }

    #[test]
    fn test_fields_from_json() {
        let object = json!({
            "correoDocente": "a@b.com",
            "numeroAula": 101,
            "comentario": null,
            "extra": { "nested": true }
        });

        let fields = match object {
            serde_json::Value::Object(map) => fields_from_json(map),
            _ => unreachable!(),
        };

        assert_eq!(fields.get("correoDocente").map(String::as_str), Some("a@b.com"));
        assert_eq!(fields.get("numeroAula").map(String::as_str), Some("101"));
        assert!(!fields.contains_key("comentario"));
        assert!(!fields.contains_key("extra"));
    }
}
