use condor_client::{HttpResponse, Method, Transport};
use condor_core::errors::{ConductorError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

/// One request the transport received
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

enum Reply {
    Status(u16, String),
    Unreachable,
}

struct Step {
    method: Method,
    path: String,
    reply: Reply,
}

/// In-memory transport that answers a fixed script of requests in order
///
/// Panics on any request that does not match the next scripted step, so a
/// test fails loudly when a flow sends something unexpected.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: RefCell<VecDeque<Step>>,
    recorded: RefCell<Vec<Recorded>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.steps.borrow_mut().push_back(Step {
            method,
            path: path.to_string(),
            reply: Reply::Status(status, body.to_string()),
        });
        self
    }

    pub fn then_json(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        let text = body.to_string();
        self.then(method, path, status, &text)
    }

    /// Next request to `path` fails without a response
    pub fn then_unreachable(self, method: Method, path: &str) -> Self {
        self.steps.borrow_mut().push_back(Step {
            method,
            path: path.to_string(),
            reply: Reply::Unreachable,
        });
        self
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.borrow().clone()
    }

    /// `"METHOD path"` for every request, in order
    pub fn calls(&self) -> Vec<String> {
        self.recorded
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// # Panics
    ///
    /// Panics if scripted steps were never requested
    pub fn assert_exhausted(&self) {
        let left: Vec<String> = self
            .steps
            .borrow()
            .iter()
            .map(|s| format!("{} {}", s.method, s.path))
            .collect();
        assert!(left.is_empty(), "scripted requests never sent: {:?}", left);
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<HttpResponse> {
        let step = self
            .steps
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request {} {}", method, path));

        assert_eq!(
            (step.method, step.path.as_str()),
            (method, path),
            "request out of script"
        );

        self.recorded.borrow_mut().push(Recorded {
            method,
            path: path.to_string(),
            body: body.map(|b| serde_json::from_slice(&b).expect("request body must be JSON")),
        });

        match step.reply {
            Reply::Status(status, text) => Ok(HttpResponse::new(status, text)),
            Reply::Unreachable => Err(ConductorError::Transport {
                path: path.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}
