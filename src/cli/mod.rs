pub mod add_file;
pub mod push_directory;
pub mod push_file;

use runners::config::Config;
use runners::core::RunnersResult;
use runners::di::ServiceContainer;
use runners::runner::RunnersManager;
use std::path::Path;

/// Load configuration (explicit path or the per-user default) and wire the
/// production services around it
pub fn build_manager(config_path: Option<&Path>) -> RunnersResult<RunnersManager> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let services = ServiceContainer::new(config)?;
    Ok(RunnersManager::new(services))
}
