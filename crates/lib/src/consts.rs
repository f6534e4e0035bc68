pub const APP_NAME: &str = "tsinit";

/// Runtime major version required when nothing else is configured.
pub const DEFAULT_NODE_MAJOR: u64 = 22;

pub const VERSION_PIN_FILE: &str = ".nvmrc";
pub const MANIFEST_FILE: &str = "package.json";
pub const COMPILER_CONFIG_FILE: &str = "tsconfig.json";

/// File name of the optional user settings inside the config directory.
pub const SETTINGS_FILE: &str = "config.json";
