//! Minikube process operations

pub mod cluster;
pub mod runner;

pub use cluster::{ClusterError, ClusterStatus, MinikubeCluster};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
