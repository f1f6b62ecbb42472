//! Utility modules for minikube-mcp

pub mod prereqs;

pub use prereqs::{CommandPrereq, Prerequisite, ServerPrereqs};
