//! Serve command, wiring the operation registry to the cluster handle

use anyhow::{Result, anyhow, bail};
use std::io;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::minikube::MinikubeCluster;
use crate::server::{McpServer, Registry, ToolError};

/// Transport mechanisms the launcher can select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Sse,
    Http,
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "sse" => Ok(Transport::Sse),
            "http" => Ok(Transport::Http),
            _ => Err(anyhow!(
                "Invalid transport: {}. Must be 'stdio', 'sse' or 'http'",
                s
            )),
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Stdio => write!(f, "stdio"),
            Transport::Sse => write!(f, "sse"),
            Transport::Http => write!(f, "http"),
        }
    }
}

/// How much of the cluster lifecycle the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    ReadOnly,
    ReadWrite,
}

impl AccessLevel {
    pub fn allows_write(self) -> bool {
        matches!(self, AccessLevel::ReadWrite)
    }
}

impl FromStr for AccessLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "readonly" => Ok(AccessLevel::ReadOnly),
            "readwrite" => Ok(AccessLevel::ReadWrite),
            _ => Err(anyhow!(
                "Invalid access level: {}. Must be 'readonly' or 'readwrite'",
                s
            )),
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessLevel::ReadOnly => write!(f, "readonly"),
            AccessLevel::ReadWrite => write!(f, "readwrite"),
        }
    }
}

/// Run the MCP server over the selected transport
pub fn serve(transport: &str, access_level: &str) -> Result<()> {
    let transport = Transport::from_str(transport)?;
    let access_level = AccessLevel::from_str(access_level)?;

    if transport != Transport::Stdio {
        bail!("Transport '{}' is not supported yet; use stdio", transport);
    }

    let settings = Settings::load();
    let cluster = Arc::new(MinikubeCluster::from_settings(&settings)?);
    let registry = build_registry(cluster, access_level);

    info!(
        "serving {} tool(s) over stdio at access level '{}'",
        registry.len(),
        access_level
    );

    let server = McpServer::new(settings.server.name, settings.server.version, registry);
    let stdin = io::stdin();
    let stdout = io::stdout();
    server.serve(stdin.lock(), stdout.lock())
}

/// Build the fixed operation set backed by `cluster`
///
/// At readonly access only the status query is exposed; readwrite adds
/// the start and stop operations.
pub fn build_registry(cluster: Arc<MinikubeCluster>, access_level: AccessLevel) -> Registry {
    let mut registry = Registry::new();

    if access_level.allows_write() {
        let start_cluster = cluster.clone();
        registry.register(
            "minikube_start",
            "Starts the Minikube cluster",
            Box::new(move |_args| Ok(start_cluster.start()?)),
        );

        let stop_cluster = cluster.clone();
        registry.register(
            "minikube_stop",
            "Stops the Minikube cluster",
            Box::new(move |_args| Ok(stop_cluster.stop()?)),
        );
    }

    registry.register(
        "minikube_status",
        "Gets the status of the Minikube cluster",
        Box::new(move |_args| {
            let status = cluster.status()?;
            serde_json::to_string_pretty(&status)
                .map_err(|err| ToolError::ExecutionFailed(format!("Failed to encode status: {}", err)))
        }),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minikube::{CommandOutput, CommandRunner};

    /// Runner answering every invocation with the same scripted output
    struct StaticRunner(CommandOutput);

    impl CommandRunner for StaticRunner {
        fn run(&self, _binary: &str, _args: &[String]) -> io::Result<CommandOutput> {
            Ok(self.0.clone())
        }
    }

    fn cluster_reporting(stdout: &str) -> Arc<MinikubeCluster> {
        let output = CommandOutput {
            success: true,
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        };
        Arc::new(MinikubeCluster::new("minikube").with_runner(Box::new(StaticRunner(output))))
    }

    #[test]
    fn test_readwrite_registers_all_operations() {
        let registry = build_registry(cluster_reporting(""), AccessLevel::ReadWrite);
        let names: Vec<_> = registry
            .descriptors()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec!["minikube_start", "minikube_stop", "minikube_status"]
        );
    }

    #[test]
    fn test_readonly_registers_status_only() {
        let registry = build_registry(cluster_reporting(""), AccessLevel::ReadOnly);
        let names: Vec<_> = registry
            .descriptors()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["minikube_status"]);
    }

    #[test]
    fn test_status_operation_reencodes_as_pretty_json() {
        let cluster = cluster_reporting(
            r#"{"Name":"minikube","Host":"Running","Kubelet":"Running","APIServer":"Running","Kubeconfig":"Configured"}"#,
        );
        let registry = build_registry(cluster, AccessLevel::ReadOnly);

        let text = registry.dispatch("minikube_status", None).unwrap();
        assert!(text.contains("\"Host\": \"Running\""));
        assert!(text.contains("\"Kubeconfig\": \"Configured\""));
    }

    #[test]
    fn test_start_operation_passes_output_through() {
        let cluster = cluster_reporting("Done! kubectl is now configured");
        let registry = build_registry(cluster, AccessLevel::ReadWrite);

        let text = registry.dispatch("minikube_start", None).unwrap();
        assert_eq!(text, "Done! kubectl is now configured");
    }

    #[test]
    fn test_transport_from_str() {
        assert_eq!(Transport::from_str("stdio").unwrap(), Transport::Stdio);
        assert_eq!(Transport::from_str("SSE").unwrap(), Transport::Sse);
        assert!(Transport::from_str("carrier-pigeon").is_err());
    }

    #[test]
    fn test_access_level_from_str() {
        assert_eq!(
            AccessLevel::from_str("readonly").unwrap(),
            AccessLevel::ReadOnly
        );
        assert_eq!(
            AccessLevel::from_str("ReadWrite").unwrap(),
            AccessLevel::ReadWrite
        );
        assert!(AccessLevel::from_str("admin").is_err());
    }
}
