//! Curated tag combinations.
//!
//! Read-only named tag lists shipped with the catalog. User-saved
//! combinations are persisted by the client and never stored here.

use std::path::Path;

use crate::models::Combination;
use crate::services::catalog_service::load_data_file;
use crate::utils::ApiResult;

pub struct CombinationService {
    combinations: Vec<Combination>,
}

impl CombinationService {
    pub fn load(data_dir: &Path) -> ApiResult<Self> {
        let combinations: Vec<Combination> =
            serde_json::from_value(load_data_file(data_dir, "predefined_combinations.json")?)?;

        tracing::info!("Loaded {} predefined combinations", combinations.len());

        Ok(Self { combinations })
    }

    pub fn list(&self) -> &[Combination] {
        &self.combinations
    }
}
