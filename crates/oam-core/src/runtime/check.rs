//! Tool detection for git, Node.js and the package managers

use std::fmt;
use std::process::Command;

/// Package manager used in the next-steps instructions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    pub fn install_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm install",
            PackageManager::Yarn => "yarn",
        }
    }

    pub fn dev_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run dev",
            PackageManager::Yarn => "yarn dev",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    pub fn summary(&self) -> String {
        match (&self.version, self.available) {
            (Some(version), true) => format!("{} ({})", self.name, version),
            (None, true) => format!("{} (unknown version)", self.name),
            (_, false) => format!("{} (not installed)", self.name),
        }
    }
}

fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    match Command::new(program).arg("--version").output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version).filter(|v| !v.is_empty()),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if git is available (needed for remote templates)
pub fn check_git() -> RuntimeInfo {
    probe("git", "git")
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

pub fn check_package_manager(package_manager: PackageManager) -> RuntimeInfo {
    probe(package_manager.binary(), package_manager.binary())
}

/// Everything a new project needs. Results are advisory; nothing fails here.
pub fn check_tools(needs_git: bool, package_manager: PackageManager) -> Vec<RuntimeInfo> {
    let mut results = Vec::new();
    if needs_git {
        results.push(check_git());
    }
    results.push(check_node());
    results.push(check_package_manager(package_manager));
    results
}
