//! In-memory tag catalog.
//!
//! Loads the generated catalog files from the data directory at startup.
//! Each file independently falls back to a compiled-in seed copy when it is
//! missing or unreadable, so a fresh checkout serves a working catalog.
//! Lookups are plain map reads; the prompt engine never touches this
//! provider, it only receives tag lists the caller resolved through it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rust_embed::RustEmbed;
use serde_json::Value;

use crate::models::Tag;
use crate::utils::{ApiError, ApiResult};

/// Hard cap on search results to keep responses small.
const SEARCH_RESULT_LIMIT: usize = 20;

/// Seed catalog compiled into the binary.
#[derive(RustEmbed)]
#[folder = "data/"]
struct SeedData;

/// Tag lists keyed by main category, then subcategory.
///
/// Ordered maps so that seeded sampling iterates the pool in a stable
/// order regardless of load order.
type TagTree = BTreeMap<String, BTreeMap<String, Vec<Tag>>>;

pub struct CatalogService {
    structure: Value,
    tags: TagTree,
    search_index: Vec<Tag>,
    sample_size: usize,
    seed: Option<u64>,
}

impl CatalogService {
    pub fn load(data_dir: &Path, sample_size: usize, seed: Option<u64>) -> ApiResult<Self> {
        let structure = load_data_file(data_dir, "structure_data.json")?;
        let tags: TagTree =
            serde_json::from_value(load_data_file(data_dir, "processed_tags_data.json")?)?;

        // The flat search index is a generated view of the processed tags;
        // derive it when the file is absent so the two cannot disagree.
        let search_index = match load_data_file(data_dir, "search_tags_data.json")
            .and_then(|value| serde_json::from_value(value).map_err(ApiError::from))
        {
            Ok(index) => index,
            Err(err) => {
                tracing::warn!("Search index unavailable ({}), flattening catalog", err);
                flatten_tags(&tags)
            }
        };

        let total: usize = tags.values().flat_map(|subs| subs.values()).map(Vec::len).sum();
        tracing::info!(
            "Catalog loaded: {} main categories, {} tags, {} searchable",
            tags.len(),
            total,
            search_index.len()
        );

        Ok(Self { structure, tags, search_index, sample_size, seed })
    }

    /// Category tree: main category name -> subcategory names.
    pub fn structure(&self) -> &Value {
        &self.structure
    }

    /// Tags under one (main, sub) category pair; unknown pairs are empty.
    pub fn tags_for(&self, main: &str, sub: &str) -> Vec<Tag> {
        self.tags
            .get(main)
            .and_then(|subs| subs.get(sub))
            .cloned()
            .unwrap_or_default()
    }

    /// Case-insensitive substring search over both labels, heaviest tags
    /// first, capped at [`SEARCH_RESULT_LIMIT`].
    pub fn search(&self, query: &str) -> Vec<Tag> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        let mut hits: Vec<Tag> = self
            .search_index
            .iter()
            .filter(|tag| {
                tag.tag_en.to_lowercase().contains(&needle)
                    || tag.tag_cn.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            b.effective_weight()
                .partial_cmp(&a.effective_weight())
                .unwrap_or(Ordering::Equal)
        });
        hits.truncate(SEARCH_RESULT_LIMIT);
        hits
    }

    /// Random sample of tags across every subcategory of one main
    /// category, for the "recommended tags" strip. Unknown categories are
    /// empty. With a configured seed the selection is deterministic.
    pub fn recommended(&self, category: &str) -> Vec<Tag> {
        let Some(subs) = self.tags.get(category) else {
            return Vec::new();
        };

        let mut pool: Vec<Tag> = subs.values().flatten().cloned().collect();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        pool.shuffle(&mut rng);
        pool.truncate(self.sample_size);
        pool
    }
}

/// Read a catalog file from the data directory, falling back to the
/// embedded seed copy when it is missing or does not parse.
pub(crate) fn load_data_file(data_dir: &Path, name: &str) -> ApiResult<Value> {
    let path = data_dir.join(name);
    match read_json(&path) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(
                "Data file {} unusable ({}), using embedded seed",
                path.display(),
                err
            );
            let embedded = SeedData::get(name).ok_or_else(|| {
                ApiError::catalog_unavailable(format!("no embedded copy of {}", name))
            })?;
            Ok(serde_json::from_slice(embedded.data.as_ref())?)
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn flatten_tags(tags: &TagTree) -> Vec<Tag> {
    tags.iter()
        .flat_map(|(main, subs)| {
            subs.iter().flat_map(move |(sub, list)| {
                list.iter().map(move |tag| Tag {
                    main_category: Some(main.clone()),
                    sub_category: Some(sub.clone()),
                    ..tag.clone()
                })
            })
        })
        .collect()
}
