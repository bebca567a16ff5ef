//! Detection of the external tools a generated project relies on

pub mod check;

pub use check::{check_git, check_node, check_package_manager, check_tools, PackageManager, RuntimeInfo};
