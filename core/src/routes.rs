//! Named routes and the values used to address a created resource.
//!
//! A created response names the route that reads the new resource back and
//! the parameters that fill it in. The server resolves that pair into a
//! `location` URL through a `RouteTable`.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::RouteError;

/// Ordered parameter-name to value mapping for a named route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteValues(Vec<(String, Value)>);

impl RouteValues {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `name` to `value`, replacing an earlier value in place.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RouteValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = RouteValues::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

/// Route name to path template, e.g. `"GetSingleTodo" -> "/api/todo/{id}"`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    templates: HashMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(name.into(), template.into());
        self
    }

    pub fn template(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Expand the template registered under `name` with `values`.
    ///
    /// Every `{param}` segment must have a value. Values the template does
    /// not mention are ignored.
    pub fn url_for(&self, name: &str, values: &RouteValues) -> Result<String, RouteError> {
        let template = self
            .template(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let mut url = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            url.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| RouteError::MalformedTemplate(name.to_string()))?;
            let parameter = &after[..close];
            let value = values.get(parameter).ok_or_else(|| RouteError::MissingValue {
                route: name.to_string(),
                parameter: parameter.to_string(),
            })?;
            url.push_str(&render_segment(value));
            rest = &after[close + 1..];
        }
        url.push_str(rest);
        Ok(url)
    }
}

fn render_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Name of a JSON value's kind, used when route value types disagree.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new().with_route("GetSingleTodo", "/api/todo/{id}")
    }

    #[test]
    fn url_for_substitutes_parameters() {
        let values = RouteValues::new().with("id", 7);
        assert_eq!(table().url_for("GetSingleTodo", &values).unwrap(), "/api/todo/7");
    }

    #[test]
    fn string_values_render_without_quotes() {
        let values = RouteValues::new().with("id", "abc");
        assert_eq!(table().url_for("GetSingleTodo", &values).unwrap(), "/api/todo/abc");
    }

    #[test]
    fn unknown_route_is_an_error() {
        let err = table().url_for("Bad", &RouteValues::new()).unwrap_err();
        assert_eq!(err, RouteError::UnknownRoute("Bad".to_string()));
    }

    #[test]
    fn missing_value_is_an_error() {
        let values = RouteValues::new().with("bad", 7);
        let err = table().url_for("GetSingleTodo", &values).unwrap_err();
        assert!(matches!(err, RouteError::MissingValue { ref parameter, .. } if parameter == "id"));
    }

    #[test]
    fn unclosed_parameter_is_malformed() {
        let table = RouteTable::new().with_route("Broken", "/api/todo/{id");
        let values = RouteValues::new().with("id", 1);
        assert!(matches!(
            table.url_for("Broken", &values),
            Err(RouteError::MalformedTemplate(_))
        ));
    }

    #[test]
    fn insert_replaces_existing_value_in_place() {
        let values = RouteValues::new().with("a", 1).with("b", 2).with("a", 3);
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(values.get("a"), Some(&Value::from(3)));
    }
}
