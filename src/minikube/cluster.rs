//! Minikube cluster lifecycle operations

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use super::runner::{CommandOutput, CommandRunner, ProcessRunner};
use crate::config::Settings;

/// Cluster state as reported by `minikube status -o json`
///
/// Field names mirror minikube's own JSON schema. The state strings
/// ("Running", "Stopped", ...) are free-form and passed through without
/// interpretation; judging what they mean is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStatus {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Host")]
    pub host: String,

    #[serde(rename = "Kubelet")]
    pub kubelet: String,

    #[serde(rename = "APIServer")]
    pub api_server: String,

    #[serde(rename = "Kubeconfig")]
    pub kubeconfig: String,
}

/// Errors from driving the minikube binary
#[derive(Error, Debug)]
pub enum ClusterError {
    /// The process exited non-zero. Carries the combined output verbatim;
    /// minikube's own error text is the most useful diagnostic available.
    #[error("{output}")]
    CommandFailed { output: String },

    /// The process could not be launched at all
    #[error("failed to run '{binary}': {source}")]
    Launch {
        binary: String,
        #[source]
        source: io::Error,
    },

    /// `minikube status` exited zero but its output was not valid JSON
    #[error("failed to parse status output: {source}")]
    MalformedStatus {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
}

/// Handle to a local minikube cluster, addressed by optional profile
///
/// Each call spawns exactly one external process and blocks until it
/// exits. No state is cached between calls and no timeout is imposed.
pub struct MinikubeCluster {
    binary: String,
    profile: Option<String>,
    start_flags: Vec<String>,
    runner: Box<dyn CommandRunner>,
}

impl MinikubeCluster {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            profile: None,
            start_flags: Vec::new(),
            runner: Box::new(ProcessRunner),
        }
    }

    /// Build a cluster handle from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            binary: settings.minikube.binary.clone(),
            profile: settings.minikube.profile.clone(),
            start_flags: settings.minikube.parsed_start_flags()?,
            runner: Box::new(ProcessRunner),
        })
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_start_flags(mut self, flags: Vec<String>) -> Self {
        self.start_flags = flags;
        self
    }

    /// Replace the process runner, used by tests to script outcomes
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Start the cluster, blocking until `minikube start` exits
    pub fn start(&self) -> Result<String, ClusterError> {
        let mut args = self.base_args("start");
        args.extend(self.start_flags.iter().cloned());
        let output = self.run(&args)?;

        if !output.success {
            return Err(ClusterError::CommandFailed {
                output: output.combined(),
            });
        }

        Ok(output.combined())
    }

    /// Stop the cluster, blocking until `minikube stop` exits
    pub fn stop(&self) -> Result<String, ClusterError> {
        let args = self.base_args("stop");
        let output = self.run(&args)?;

        if !output.success {
            return Err(ClusterError::CommandFailed {
                output: output.combined(),
            });
        }

        Ok(output.combined())
    }

    /// Query cluster state via minikube's machine-readable status output
    ///
    /// A non-zero exit (typically "cluster not found") and a JSON decode
    /// failure (tool-version mismatch) are reported as distinct errors.
    pub fn status(&self) -> Result<ClusterStatus, ClusterError> {
        let mut args = self.base_args("status");
        args.push("-o".to_string());
        args.push("json".to_string());
        let output = self.run(&args)?;

        if !output.success {
            return Err(ClusterError::CommandFailed {
                output: output.combined(),
            });
        }

        serde_json::from_str(&output.stdout).map_err(|source| ClusterError::MalformedStatus {
            source,
            raw: output.stdout.clone(),
        })
    }

    fn base_args(&self, subcommand: &str) -> Vec<String> {
        let mut args = vec![subcommand.to_string()];
        if let Some(profile) = &self.profile {
            args.push("-p".to_string());
            args.push(profile.clone());
        }
        args
    }

    fn run(&self, args: &[String]) -> Result<CommandOutput, ClusterError> {
        self.runner
            .run(&self.binary, args)
            .map_err(|source| ClusterError::Launch {
                binary: self.binary.clone(),
                source,
            })
    }
}
