//! In-memory `ApiClient` for tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use endprobe_core::Method;

use crate::session::{ApiClient, ApiResponse, SessionError};

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub query: Vec<(String, String)>,
}

/// Answers from a fixed route table keyed by `"METHOD /path"`.
/// Unknown routes answer 404 with an empty body.
#[derive(Default)]
pub struct ScriptedClient {
    routes: HashMap<String, ApiResponse>,
    failing: HashSet<String>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, key: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert(key.to_string(), ApiResponse::new(status, body));
        self
    }

    /// Every request to `path`, whatever the verb, fails below HTTP.
    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl ApiClient for ScriptedClient {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: &[(String, String)],
    ) -> Result<ApiResponse, SessionError> {
        self.calls.borrow_mut().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
            query: query.to_vec(),
        });

        if self.failing.contains(path) {
            return Err(SessionError::Transport {
                method,
                url: format!("http://scripted{path}"),
                message: "operation timed out".to_string(),
            });
        }

        Ok(self
            .routes
            .get(&format!("{method} {path}"))
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(404, "")))
    }
}
