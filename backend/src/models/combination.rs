use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Tag;

/// A curated, named tag list the UI can apply in one click.
///
/// Combinations are read-only seed data; user-saved combinations live on
/// the client side and never reach the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Combination {
    pub name: String,
    pub tags: Vec<Tag>,
}
