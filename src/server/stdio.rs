//! Newline-delimited JSON-RPC transport over stdio

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use super::protocol::{
    CallToolParams, CallToolResult, InitializeResult, ListToolsResult, METHOD_NOT_FOUND,
    PARSE_ERROR, INVALID_PARAMS, PROTOCOL_VERSION, Request, Response, ServerInfo, ToolContent,
};
use super::registry::{Registry, ToolError};

/// MCP server bound to a registry, served over a byte stream
///
/// The reader/writer pair is generic so tests can drive the full loop
/// with in-memory buffers.
pub struct McpServer {
    info: ServerInfo,
    registry: Registry,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>, registry: Registry) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            registry,
        }
    }

    /// Serve requests until the reader reaches end of input
    ///
    /// One JSON-RPC message per line. The writer must carry nothing but
    /// protocol responses.
    pub fn serve(&self, reader: impl BufRead, mut writer: impl Write) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("Failed to read request line")?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line) {
                let encoded =
                    serde_json::to_string(&response).context("Failed to encode response")?;
                writeln!(writer, "{}", encoded).context("Failed to write response")?;
                writer.flush().context("Failed to flush response")?;
            }
        }

        debug!("reached end of input, shutting down");
        Ok(())
    }

    /// Process one raw message; notifications produce no response
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(err) => {
                warn!("unparseable request: {}", err);
                return Some(Response::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("parse error: {}", err),
                ));
            }
        };

        if request.is_notification() {
            debug!("ignoring notification '{}'", request.method);
            return None;
        }

        Some(self.handle_request(request))
    }

    fn handle_request(&self, request: Request) -> Response {
        let id = request.id.unwrap_or(Value::Null);
        debug!("handling '{}'", request.method);

        match request.method.as_str() {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: json!({"tools": {}}),
                    server_info: self.info.clone(),
                };
                Response::success(id, json!(result))
            }
            "ping" => Response::success(id, json!({})),
            "tools/list" => {
                let result = ListToolsResult {
                    tools: self.registry.descriptors(),
                };
                Response::success(id, json!(result))
            }
            "tools/call" => self.handle_tool_call(id, request.params),
            other => Response::failure(
                id,
                METHOD_NOT_FOUND,
                format!("method not found: {}", other),
            ),
        }
    }

    fn handle_tool_call(&self, id: Value, params: Option<Value>) -> Response {
        let params: CallToolParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => {
                return Response::failure(id, INVALID_PARAMS, "missing params for tools/call");
            }
            Err(err) => {
                return Response::failure(
                    id,
                    INVALID_PARAMS,
                    format!("invalid tools/call params: {}", err),
                );
            }
        };

        match self.registry.dispatch(&params.name, params.arguments.as_ref()) {
            Ok(text) => Response::success(id, json!(CallToolResult::text(text))),
            Err(ToolError::UnknownOperation(name)) => {
                Response::failure(id, INVALID_PARAMS, format!("unknown tool: {}", name))
            }
            // Execution and decode failures stay inside the protocol
            // envelope so the caller sees the diagnostic and the loop
            // keeps serving.
            Err(ToolError::MalformedOutput { detail, raw }) => {
                let mut result =
                    CallToolResult::error(format!("malformed tool output: {}", detail));
                result.content.push(ToolContent::text(raw));
                Response::success(id, json!(result))
            }
            Err(err) => Response::success(id, json!(CallToolResult::error(err.to_string()))),
        }
    }
}
