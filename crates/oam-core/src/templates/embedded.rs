//! Compile-time embedded template sources.
//!
//! Each constant loads an asset from this crate's `templates/` directory via
//! [`include_str!`]; paths are relative to this file. Renaming or moving an asset
//! without updating the path here fails the build.

// -------------------------------------------------------
// Components
// -------------------------------------------------------

pub const REACT_COMPONENT: &str = include_str!("../../templates/components/react-component.tmpl");
pub const REACT_STYLES: &str = include_str!("../../templates/components/react-styles.tmpl");
pub const REACT_TEST: &str = include_str!("../../templates/components/react-test.tmpl");
pub const REACT_INDEX: &str = include_str!("../../templates/components/react-index.tmpl");

pub const VUE_COMPONENT: &str = include_str!("../../templates/components/vue-component.tmpl");
pub const VUE_STYLES: &str = include_str!("../../templates/components/vue-styles.tmpl");
pub const VUE_TEST: &str = include_str!("../../templates/components/vue-test.tmpl");

pub const VANILLA_COMPONENT: &str = include_str!("../../templates/components/vanilla-component.tmpl");
pub const VANILLA_STYLES: &str = include_str!("../../templates/components/vanilla-styles.tmpl");
pub const VANILLA_TEST: &str = include_str!("../../templates/components/vanilla-test.tmpl");

// -------------------------------------------------------
// Hooks and utilities
// -------------------------------------------------------

pub const REACT_HOOK: &str = include_str!("../../templates/components/react-hook.tmpl");
pub const VUE_COMPOSABLE: &str = include_str!("../../templates/components/vue-composable.tmpl");
pub const UTILITY_FUNCTION: &str = include_str!("../../templates/components/utility-function.tmpl");

// -------------------------------------------------------
// New project template skeleton
// -------------------------------------------------------

pub const TEMPLATE_PACKAGE: &str = include_str!("../../templates/components/template-package.tmpl");
pub const TEMPLATE_README: &str = include_str!("../../templates/components/template-readme.tmpl");

// -------------------------------------------------------
// Generator definitions
// -------------------------------------------------------

pub const GENERATORS: &str = include_str!("../../templates/generators.yaml");
