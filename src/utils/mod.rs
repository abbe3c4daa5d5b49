/// Environment-sourced credentials and endpoints.
pub mod config;
/// Backend list and pipeline settings from `chorus.toml`.
pub mod toml_config;
