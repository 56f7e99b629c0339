//! Custom axum extractors for the booking API

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// All input of a request: query string parameters merged with the body.
///
/// The body may be JSON (must be an object) or `application/x-www-form-urlencoded`.
/// Body keys override query keys of the same name. Query and form values are
/// always strings; JSON values keep their type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInput(pub Map<String, Value>);

impl RequestInput {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A field is present when it exists and is neither null nor an empty string
    pub fn has(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Scalar field rendered as a string; arrays and objects yield `None`
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Scalar field as a string, `""` when absent
    pub fn str_or_empty(&self, key: &str) -> String {
        self.get_str(key).unwrap_or_default()
    }

    /// Integer field. Absent or empty yields `Ok(None)`; anything that is not
    /// an integer is a validation error.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        if !self.has(key) {
            return Ok(None);
        }
        let parsed = match self.0.get(key) {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| Error::Validation(format!("'{}' must be an integer", key)))
    }

    /// Copy of the input without the given keys
    pub fn without(&self, keys: &[&str]) -> Map<String, Value> {
        self.0
            .iter()
            .filter(|(k, _)| !keys.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// All fields
    pub fn inner(&self) -> &Map<String, Value> {
        &self.0
    }

}

impl From<Value> for RequestInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

fn parse_urlencoded(raw: &[u8], target: &mut Map<String, Value>) {
    for (key, value) in url::form_urlencoded::parse(raw).into_owned() {
        target.insert(key, Value::String(value));
    }
}

impl<S> FromRequest<S> for RequestInput
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let mut fields = Map::new();

        if let Some(query) = req.uri().query() {
            parse_urlencoded(query.as_bytes(), &mut fields);
        }

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| Error::Validation(e.body_text()))?;

        if body.is_empty() {
            return Ok(Self(fields));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            parse_urlencoded(&body, &mut fields);
        } else {
            match serde_json::from_slice::<Value>(&body)
                .map_err(|e| Error::Validation(format!("Malformed JSON body: {}", e)))?
            {
                Value::Object(map) => fields.extend(map),
                Value::Null => {}
                _ => {
                    return Err(Error::Validation(
                        "Request body must be a JSON object".to_string(),
                    ))
                }
            }
        }

        Ok(Self(fields))
    }
}
