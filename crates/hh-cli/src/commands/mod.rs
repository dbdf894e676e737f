pub mod inspect;
pub mod reconstruct;
pub mod version;

use std::error::Error;
use std::path::Path;

use hh_reco::RecoConfig;

/// Loads the YAML config when given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> Result<RecoConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            Ok(RecoConfig::load(path)?)
        }
        None => Ok(RecoConfig::default()),
    }
}
