//! Default configuration values

/// Organization group id whose artifacts count as internal
pub const DEFAULT_GROUP_ID: &str = "com.dell.cpsd";

/// Version of `maven-dependency-plugin` used to dump dependency trees
pub const DEFAULT_PLUGIN_VERSION: &str = "3.0.2";

/// File name Maven writes each module's dependency tree to.
/// Also the suffix of the per-repository cache file (`<repository>.<suffix>`).
pub const DEFAULT_OUTPUT_FILE: &str = "dependency_tree";

/// Build descriptor marking a directory as a repository
pub const BUILD_DESCRIPTOR: &str = "pom.xml";

/// Settings file looked up in the root directory
pub const SETTINGS_FILE_NAME: &str = "buildorder.toml";

/// Settings file name inside the platform config directory
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.toml";

/// Application name used in directory paths
pub const APP_NAME: &str = "buildorder";

/// Suffix appended to a file while it is being written
pub const TEMP_SUFFIX: &str = "tmp";

/// Exit status when repositories remain unresolved
pub const EXIT_UNRESOLVED: i32 = 2;

/// Environment variable names for settings overrides
pub const ENV_GROUP_ID: &str = "BUILDORDER_GROUP_ID";
pub const ENV_PLUGIN_VERSION: &str = "BUILDORDER_PLUGIN_VERSION";
pub const ENV_OUTPUT_FILE: &str = "BUILDORDER_OUTPUT_FILE";
pub const ENV_JOBS: &str = "BUILDORDER_JOBS";
