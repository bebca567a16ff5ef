//! oam core - scaffolding for frontend projects and components
//!
//! This library holds everything the `oam` binary does apart from argument
//! parsing: turning names into casing variants, rendering `{{placeholder}}`
//! templates, resolving which files a component consists of, and creating
//! whole projects from bundled or remote templates.
//!
//! # Architecture
//!
//! - **Pure core** - [`naming`], [`render`], [`component`], [`prompt`] and
//!   [`generator`] never touch the disk
//! - **Effects** - [`writer`], [`materialize`], [`templates`] and [`runtime`]
//!   read and write files or spawn processes
//! - **Configuration** - the [`ProductConfig`] trait and [`config::Settings`]
//! - **CLI/TUI Interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts in [`tui`]
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use oam_core::component::{self, ComponentAnswers, ComponentVariant, Destination};
//!
//! let answers = ComponentAnswers {
//!     name: "UserCard".into(),
//!     description: None,
//!     has_tests: false,
//!     has_styles: true,
//!     destination: Destination::Components,
//! };
//! let files = component::render_component(ComponentVariant::React, &answers)?;
//! oam_core::writer::write_files(&std::env::current_dir()?, &files).await?;
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod generator;
pub mod guard;
pub mod materialize;
pub mod naming;
pub mod product;
pub mod prompt;
pub mod render;
pub mod runtime;
pub mod templates;
pub mod writer;

#[cfg(feature = "tui")]
pub mod tui;

pub use config::Settings;
pub use error::{Result, ScaffoldError};
pub use materialize::{Materializer, ProjectAnswers, ProjectTemplate};
pub use product::ProductConfig;
pub use runtime::{PackageManager, RuntimeInfo};
