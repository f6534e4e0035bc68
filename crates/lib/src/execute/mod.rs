//! External command execution.
//!
//! Every subprocess the scaffolder launches (`node`, `npm`, `npx`) goes
//! through the [`CommandRunner`] trait so the pipeline can be driven by a
//! fake runner in tests.

mod cmd;
mod types;

pub use cmd::SystemRunner;
pub use types::{CommandRunner, ExecuteError, Invocation};
