//! Template assets: embedded sources, the bundled project manifest, tree
//! copying and remote retrieval
//!
//! This module provides:
//! - [`TemplateId`], the identifier of every embedded template source
//! - Root manifest types for the bundled project templates
//! - Recursive tree copying
//! - Remote git retrieval into a scoped temporary directory
//! - Version compatibility checking

pub mod copier;
pub mod embedded;
pub mod fetcher;
pub mod manifest;
pub mod version;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScaffoldError;

pub use copier::copy_tree;
pub use fetcher::{fetch_remote, ClonedTemplate, GitCloner, RemoteRepo, RepoCloner};
pub use manifest::{RootManifest, TemplateEntry};
pub use version::{check_compatibility, VersionWarning};

/// Identifier of an embedded template source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    ReactComponent,
    ReactStyles,
    ReactTest,
    ReactIndex,
    VueComponent,
    VueStyles,
    VueTest,
    VanillaComponent,
    VanillaStyles,
    VanillaTest,
    ReactHook,
    VueComposable,
    UtilityFunction,
    TemplatePackage,
    TemplateReadme,
}

impl TemplateId {
    pub const ALL: [TemplateId; 15] = [
        TemplateId::ReactComponent,
        TemplateId::ReactStyles,
        TemplateId::ReactTest,
        TemplateId::ReactIndex,
        TemplateId::VueComponent,
        TemplateId::VueStyles,
        TemplateId::VueTest,
        TemplateId::VanillaComponent,
        TemplateId::VanillaStyles,
        TemplateId::VanillaTest,
        TemplateId::ReactHook,
        TemplateId::VueComposable,
        TemplateId::UtilityFunction,
        TemplateId::TemplatePackage,
        TemplateId::TemplateReadme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::ReactComponent => "react-component",
            TemplateId::ReactStyles => "react-styles",
            TemplateId::ReactTest => "react-test",
            TemplateId::ReactIndex => "react-index",
            TemplateId::VueComponent => "vue-component",
            TemplateId::VueStyles => "vue-styles",
            TemplateId::VueTest => "vue-test",
            TemplateId::VanillaComponent => "vanilla-component",
            TemplateId::VanillaStyles => "vanilla-styles",
            TemplateId::VanillaTest => "vanilla-test",
            TemplateId::ReactHook => "react-hook",
            TemplateId::VueComposable => "vue-composable",
            TemplateId::UtilityFunction => "utility-function",
            TemplateId::TemplatePackage => "template-package",
            TemplateId::TemplateReadme => "template-readme",
        }
    }

    /// Raw template text
    pub fn source(&self) -> &'static str {
        match self {
            TemplateId::ReactComponent => embedded::REACT_COMPONENT,
            TemplateId::ReactStyles => embedded::REACT_STYLES,
            TemplateId::ReactTest => embedded::REACT_TEST,
            TemplateId::ReactIndex => embedded::REACT_INDEX,
            TemplateId::VueComponent => embedded::VUE_COMPONENT,
            TemplateId::VueStyles => embedded::VUE_STYLES,
            TemplateId::VueTest => embedded::VUE_TEST,
            TemplateId::VanillaComponent => embedded::VANILLA_COMPONENT,
            TemplateId::VanillaStyles => embedded::VANILLA_STYLES,
            TemplateId::VanillaTest => embedded::VANILLA_TEST,
            TemplateId::ReactHook => embedded::REACT_HOOK,
            TemplateId::VueComposable => embedded::VUE_COMPOSABLE,
            TemplateId::UtilityFunction => embedded::UTILITY_FUNCTION,
            TemplateId::TemplatePackage => embedded::TEMPLATE_PACKAGE,
            TemplateId::TemplateReadme => embedded::TEMPLATE_README,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ScaffoldError::config(format!("unknown template '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_str() {
        for id in TemplateId::ALL {
            assert_eq!(id.as_str().parse::<TemplateId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_id_is_configuration_error() {
        let err = "svelte-component".parse::<TemplateId>().unwrap_err();
        assert!(matches!(err, ScaffoldError::Configuration(_)));
    }

    #[test]
    fn test_every_source_is_non_empty() {
        for id in TemplateId::ALL {
            assert!(!id.source().trim().is_empty(), "{} is empty", id);
        }
    }
}
