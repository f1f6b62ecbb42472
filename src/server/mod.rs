//! Protocol surface: wire types, operation registry, stdio transport

pub mod protocol;
pub mod registry;
pub mod stdio;

pub use registry::{Handler, Registry, ToolError};
pub use stdio::McpServer;
