//! HTTP request and response types.
//!
//! # Design
//! These types describe one exchange as plain data. `HttpRequest` knows how
//! to render itself into the exact bytes written to the socket, and
//! `HttpResponse` keeps only what callers get to see: the status code and the
//! decoded body. Every other response header is discarded once the charset
//! has been read from it.

use std::fmt;

use serde::Serialize;

use crate::target::Target;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Ordered `key=value` pairs sent as an `application/x-www-form-urlencoded`
/// body.
///
/// Keys and values are written as given. Nothing is percent-encoded, so a
/// value containing `&` or `=` changes the meaning of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Joins the fields as `k1=v1&k2=v2` in insertion order.
    pub fn serialize(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        FormFields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Payload of a request, chosen explicitly by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Form(FormFields),
}

impl RequestBody {
    pub fn serialize(&self) -> String {
        match self {
            RequestBody::Empty => String::new(),
            RequestBody::Form(fields) => fields.serialize(),
        }
    }
}

/// A request ready to be written to a socket.
///
/// Built by `HttpClient::build_get` and `HttpClient::build_post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub target: Target,
    /// Serialized body. `None` for GET, which sends no entity headers at all.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Renders the request line, headers and body exactly as sent.
    pub fn to_wire(&self) -> String {
        let mut wire = format!(
            "{} {} {}\r\nHost: {}\r\nAccept: */*\r\nConnection: close\r\n",
            self.method.as_str(),
            self.target.path,
            self.target.version,
            self.target.authority,
        );
        match &self.body {
            Some(body) => {
                wire.push_str("Content-Type: application/x-www-form-urlencoded\r\n");
                wire.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));
                wire.push_str(body);
            }
            None => wire.push_str("\r\n"),
        }
        wire
    }
}

/// The parts of a response kept after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpResponse {
    pub code: u16,
    pub body: String,
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "code: {}", self.code)?;
        write!(f, "{}", self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_keep_insertion_order() {
        let fields: FormFields = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(fields.serialize(), "b=2&a=1");
    }

    #[test]
    fn form_fields_are_not_escaped() {
        let mut fields = FormFields::new();
        fields.push("q", "a b&c");
        assert_eq!(fields.serialize(), "q=a b&c");
    }

    #[test]
    fn empty_body_serializes_to_nothing() {
        assert_eq!(RequestBody::Empty.serialize(), "");
        assert_eq!(RequestBody::Form(FormFields::new()).serialize(), "");
    }

    #[test]
    fn response_display_shows_code_then_body() {
        let response = HttpResponse {
            code: 404,
            body: "missing".to_string(),
        };
        assert_eq!(response.to_string(), "code: 404\nmissing");
    }

    #[test]
    fn response_serializes_to_json() {
        let response = HttpResponse {
            code: 200,
            body: "ok".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["body"], "ok");
    }
}
