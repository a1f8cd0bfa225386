//! Configuration, `.env` loading, and credential cache locations.

pub mod config;
pub mod env_file;
pub mod paths;

pub use config::{
    ENV_CLAUDE_OAUTH_CREDS_PATH, ENV_CLAUDE_USE_OAUTH, ENV_CODEX_CLI_HOME, ENV_ENV_FILE,
    ENV_GEMINI_OAUTH_CREDS_PATH, ENV_GEMINI_USE_CLOUDCODE, ENV_PROVIDER, ENV_WORKSPACE, EnvSource,
    FeatureFlags, GatewayConfig,
};
pub use env_file::EnvFile;
