//! Operation registry for tool dispatch

use serde_json::Value;
use thiserror::Error;

use super::protocol::ToolDescriptor;
use crate::minikube::ClusterError;

/// Failure modes a dispatched operation can surface to the caller
///
/// All three are returned as values; a failing operation must never take
/// down the dispatch loop or affect unrelated operations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The requested name is not registered
    #[error("unknown tool: {0}")]
    UnknownOperation(String),

    /// The external command exited non-zero; the diagnostic text is the
    /// tool's own output, verbatim
    #[error("{0}")]
    ExecutionFailed(String),

    /// The external command succeeded but its output could not be decoded
    #[error("malformed tool output: {detail}")]
    MalformedOutput { detail: String, raw: String },
}

impl From<ClusterError> for ToolError {
    fn from(err: ClusterError) -> Self {
        match err {
            ClusterError::CommandFailed { output } => ToolError::ExecutionFailed(output),
            ClusterError::MalformedStatus { source, raw } => ToolError::MalformedOutput {
                detail: source.to_string(),
                raw,
            },
            launch @ ClusterError::Launch { .. } => ToolError::ExecutionFailed(launch.to_string()),
        }
    }
}

/// Handler bound to one registered operation
pub type Handler = Box<dyn Fn(Option<&Value>) -> Result<String, ToolError> + Send + Sync>;

struct Operation {
    name: String,
    description: String,
    handler: Handler,
}

/// Fixed mapping from operation name to handler, built once at startup
pub struct Registry {
    operations: Vec<Operation>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Register an operation
    ///
    /// Names must be non-empty and unique within this registry; a
    /// violation is a programming error in server construction, so this
    /// panics rather than returning a runtime result.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Handler,
    ) {
        let name = name.into();
        assert!(!name.is_empty(), "operation name must not be empty");
        assert!(
            self.lookup(&name).is_none(),
            "operation '{}' registered twice",
            name
        );

        self.operations.push(Operation {
            name,
            description: description.into(),
            handler,
        });
    }

    /// Resolve `name` and invoke its handler, passing `args` through
    ///
    /// No retry and no timeout are imposed here; the handler's result is
    /// returned unchanged.
    pub fn dispatch(&self, name: &str, args: Option<&Value>) -> Result<String, ToolError> {
        let operation = self
            .lookup(name)
            .ok_or_else(|| ToolError::UnknownOperation(name.to_string()))?;
        (operation.handler)(args)
    }

    /// Tool descriptors advertised to protocol callers, in registration order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.operations
            .iter()
            .map(|op| ToolDescriptor::nullary(&op.name, &op.description))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn lookup(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
