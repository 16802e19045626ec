//! Mapping of a method name, URL and optional JSON argument to a request.
//!
//! # Design
//! Argument parsing reports what it found instead of hiding it: callers get
//! `CommandArgs::Invalid` for malformed JSON and decide what to do with it.
//! `Command::run` keeps the lenient behavior of the command line and sends
//! an empty body in that case, logging a warning.

use log::warn;
use serde_json::Value;

use crate::client::HttpClient;
use crate::error::ClientError;
use crate::http::{FormFields, HttpMethod, HttpResponse, RequestBody};

/// Result of reading the optional JSON argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgs {
    NoArgs,
    Parsed(FormFields),
    Invalid(String),
}

impl CommandArgs {
    /// Reads `raw` as a JSON object whose members become form fields.
    ///
    /// String members are used verbatim; any other value is written as its
    /// compact JSON text, so `{"ok":true,"l":[1,2]}` becomes
    /// `ok=true&l=[1,2]`. Booleans and arrays deliberately keep their JSON
    /// spelling rather than being rendered as `True` or `[1, 2]`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return CommandArgs::NoArgs;
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(members)) => CommandArgs::Parsed(
                members
                    .into_iter()
                    .map(|(key, value)| match value {
                        Value::String(text) => (key, text),
                        other => (key, other.to_string()),
                    })
                    .collect(),
            ),
            Ok(other) => CommandArgs::Invalid(format!("expected a JSON object, got {other}")),
            Err(err) => CommandArgs::Invalid(err.to_string()),
        }
    }

    /// Turns the arguments into a body, downgrading invalid input to an
    /// empty one.
    pub fn into_body(self) -> RequestBody {
        match self {
            CommandArgs::NoArgs => RequestBody::Empty,
            CommandArgs::Parsed(fields) => RequestBody::Form(fields),
            CommandArgs::Invalid(reason) => {
                warn!("ignoring request arguments: {reason}");
                RequestBody::Empty
            }
        }
    }
}

/// One request as named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub method: HttpMethod,
    pub url: String,
    pub args: CommandArgs,
}

impl Command {
    /// `POST` (exact, case-sensitive) selects POST; every other method name
    /// is treated as GET.
    pub fn new(method: &str, url: &str, raw_args: Option<&str>) -> Self {
        let method = if method == "POST" {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        };
        Command {
            method,
            url: url.to_string(),
            args: CommandArgs::parse(raw_args),
        }
    }

    /// Interprets positional arguments as `URL` or `METHOD URL [JSON_ARGS]`.
    ///
    /// Returns `None` when no arguments were given. Arguments past the third
    /// are ignored.
    pub fn from_positional<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        match args {
            [] => None,
            [url] => Some(Command::new("GET", url.as_ref(), None)),
            [method, url] => Some(Command::new(method.as_ref(), url.as_ref(), None)),
            [method, url, json, ..] => Some(Command::new(
                method.as_ref(),
                url.as_ref(),
                Some(json.as_ref()),
            )),
        }
    }

    /// Performs the request. Arguments are only sent for POST.
    pub fn run(self, client: &HttpClient) -> Result<HttpResponse, ClientError> {
        match self.method {
            HttpMethod::Post => client.post(&self.url, &self.args.into_body()),
            HttpMethod::Get => client.get(&self.url),
        }
    }
}
