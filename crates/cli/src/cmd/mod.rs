mod scaffold;

pub use scaffold::{ScaffoldArgs, cmd_scaffold};
