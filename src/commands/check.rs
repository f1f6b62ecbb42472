//! Prerequisite check command

use anyhow::Result;
use colored::Colorize;
use regex::Regex;
use std::process::Command;

use crate::utils::prereqs::{Prerequisite, ServerPrereqs};

/// Verify the external tools are present and report their versions
pub fn check() -> Result<()> {
    let minikube = ServerPrereqs::minikube();
    let kubectl = ServerPrereqs::kubectl();
    let prereqs: Vec<&dyn Prerequisite> = vec![&minikube, &kubectl];

    let (found, missing) = ServerPrereqs::check_all(&prereqs);

    for name in &found {
        match probe_version(name) {
            Some(version) => println!("  {} {} {}", "✓".green(), name, version),
            None => println!("  {} {}", "✓".green(), name),
        }
    }

    for (name, hint) in &missing {
        println!("  {} {}", "✗".red(), name);
        println!("    {}", hint);
    }

    println!();
    if missing.is_empty() {
        println!("{}", "All prerequisites satisfied".green());
        Ok(())
    } else {
        anyhow::bail!("{} missing prerequisite(s)", missing.len());
    }
}

/// Ask the tool for its version; None when it cannot be determined
fn probe_version(tool: &str) -> Option<String> {
    let output = Command::new(tool).arg("version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    extract_version(&String::from_utf8_lossy(&output.stdout))
}

/// Pull a semver-looking token out of `<tool> version` output
fn extract_version(text: &str) -> Option<String> {
    let pattern = Regex::new(r"v\d+\.\d+\.\d+[\w.+-]*").ok()?;
    Some(pattern.find(text)?.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_minikube_version() {
        let text = "minikube version: v1.34.0\ncommit: 210b148df93a80eb872ecbeb7e35281b3c582c61";
        assert_eq!(extract_version(text).as_deref(), Some("v1.34.0"));
    }

    #[test]
    fn test_extract_kubectl_version() {
        let text = "Client Version: v1.31.0-rc.1";
        assert_eq!(extract_version(text).as_deref(), Some("v1.31.0-rc.1"));
    }

    #[test]
    fn test_extract_version_absent() {
        assert!(extract_version("no version here").is_none());
    }
}
