//! tsinit-lib: core logic for scaffolding TypeScript/Node.js projects
//!
//! The crate is organised around one linear pipeline:
//! - `preflight`: runtime version and target directory checks
//! - `init`: version pin, `package.json` and `tsconfig.json` generation
//! - `json`: structured, idempotent edits on JSON/JSONC documents
//! - `install`: fixed development dependency groups
//! - `emit`: constant-content files
//! - `scaffold`: the ordered, skippable step list tying it all together

pub mod config;
pub mod consts;
pub mod emit;
pub mod execute;
pub mod init;
pub mod install;
pub mod json;
pub mod manifest;
pub mod platform;
pub mod preflight;
pub mod scaffold;
pub mod tsconfig;
pub mod util;
