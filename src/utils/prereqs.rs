//! Prerequisite checks for the external tools this server drives

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("Tool '{name}' not found")]
    NotFound { name: String, hint: String },
}

/// Trait for checking prerequisites
pub trait Prerequisite {
    /// Name of the prerequisite tool
    fn name(&self) -> &str;

    /// Check if the tool is available
    fn check(&self) -> Result<(), PrereqError>;

    /// Installation hint for the user
    fn install_hint(&self) -> &str;
}

/// Prerequisite satisfied by a binary resolvable on PATH
pub struct CommandPrereq {
    pub name: String,
    pub hint: String,
}

impl CommandPrereq {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }
}

impl Prerequisite for CommandPrereq {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<(), PrereqError> {
        which::which(&self.name).map_err(|_| PrereqError::NotFound {
            name: self.name.clone(),
            hint: self.hint.clone(),
        })?;
        Ok(())
    }

    fn install_hint(&self) -> &str {
        &self.hint
    }
}

/// Tools minikube-mcp expects on the host
pub struct ServerPrereqs;

impl ServerPrereqs {
    /// Get minikube prerequisite
    pub fn minikube() -> CommandPrereq {
        CommandPrereq::new(
            "minikube",
            "Install from: https://minikube.sigs.k8s.io/docs/start/",
        )
    }

    /// Get kubectl prerequisite
    pub fn kubectl() -> CommandPrereq {
        CommandPrereq::new(
            "kubectl",
            "Install from: https://kubernetes.io/docs/tasks/tools/",
        )
    }

    /// Check all prerequisites and return detailed results
    /// Returns (found_tools, missing_tools)
    pub fn check_all(prereqs: &[&dyn Prerequisite]) -> (Vec<String>, Vec<(String, String)>) {
        let mut found = Vec::new();
        let mut missing = Vec::new();

        for prereq in prereqs {
            match prereq.check() {
                Ok(_) => found.push(prereq.name().to_string()),
                Err(PrereqError::NotFound { name, hint }) => missing.push((name, hint)),
            }
        }

        (found, missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prereq_trait() {
        let prereq = CommandPrereq::new("echo", "Should always exist");
        assert_eq!(prereq.name(), "echo");
        assert!(prereq.check().is_ok());
    }

    #[test]
    fn test_missing_prereq() {
        let prereq = CommandPrereq::new("nonexistent-tool-xyz", "Test hint");
        assert!(prereq.check().is_err());
    }

    #[test]
    fn test_check_all_partitions_results() {
        let present = CommandPrereq::new("echo", "coreutils");
        let absent = CommandPrereq::new("nonexistent-tool-xyz", "Test hint");
        let prereqs: Vec<&dyn Prerequisite> = vec![&present, &absent];

        let (found, missing) = ServerPrereqs::check_all(&prereqs);
        assert_eq!(found, vec!["echo"]);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].0, "nonexistent-tool-xyz");
    }
}
