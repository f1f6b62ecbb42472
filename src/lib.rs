//! Model Context Protocol server for local minikube clusters
//!
//! Exposes cluster lifecycle operations (start, stop, status) as named
//! tools over JSON-RPC on stdio, so automated agents can drive minikube
//! without parsing free-form CLI output.

pub mod commands;
pub mod config;
pub mod minikube;
pub mod server;
pub mod utils;
