//! Prompt serialization engine.
//!
//! Turns an ordered selection of weighted bilingual tags into prompt
//! strings for one of the supported syntax dialects. The engine is a pure
//! function of its input: no state, no I/O, and both language outputs share
//! every structural decision (sort order, weight thresholds, separators),
//! differing only in which label is substituted at each position. Repeated
//! calls with the same input produce byte-identical output, and concurrent
//! callers need no coordination.

#[cfg(test)]
mod tests;

use std::cmp::Ordering;

use crate::models::{GeneratePromptRequest, GeneratePromptResponse, PromptFormat, Tag};
use crate::utils::{ApiError, ApiResult};

/// Separator between rendered tokens.
const TOKEN_SEPARATOR: &str = ", ";

/// How a dialect expresses weight in its output.
///
/// `comfy` and `sd` are two historical names for the same bracket syntax;
/// both map to `Bracket` and must never diverge.
#[derive(Debug, Clone, Copy)]
enum WeightPolicy {
    /// `(label)` repeated floor(weight) times for weights above 1.0;
    /// sub-unity weights render verbatim
    Repeat,
    /// `(label:W)` with W formatted to one decimal place
    Bracket,
    /// Weight has no effect on the output
    Ignore,
}

fn weight_policy(format: PromptFormat) -> WeightPolicy {
    match format {
        PromptFormat::Standard => WeightPolicy::Repeat,
        PromptFormat::Comfy | PromptFormat::Sd => WeightPolicy::Bracket,
        PromptFormat::Midjourney | PromptFormat::Dalle => WeightPolicy::Ignore,
    }
}

#[derive(Debug, Clone, Copy)]
enum Language {
    En,
    Cn,
}

fn label(tag: &Tag, language: Language) -> &str {
    match language {
        Language::En => &tag.tag_en,
        Language::Cn => &tag.tag_cn,
    }
}

/// Render a prompt pair from the selected tags.
///
/// The only rejected input is an empty tag selection; every other
/// irregularity (unknown dialect, missing or non-finite weight, empty
/// style/negative text) is normalized so the engine stays total.
pub fn generate(req: &GeneratePromptRequest) -> ApiResult<GeneratePromptResponse> {
    if req.tags.is_empty() {
        return Err(ApiError::validation_error("at least one tag required"));
    }

    let sorted = sort_by_weight(&req.tags);

    let mut prompt_en = render_joined(&sorted, Language::En, req.format);
    let mut prompt_cn = render_joined(&sorted, Language::Cn, req.format);

    // The style token belongs to the midjourney dialect only. It is not
    // translated, so both language strings get the identical suffix.
    if req.format == PromptFormat::Midjourney && !req.style.is_empty() {
        let suffix = format!(" --style {}", req.style);
        prompt_en.push_str(&suffix);
        prompt_cn.push_str(&suffix);
    }

    let negative = (!req.negative_prompt.is_empty()).then(|| req.negative_prompt.clone());

    Ok(GeneratePromptResponse {
        prompt_en,
        prompt_cn,
        format: req.format,
        style: req.style.clone(),
        negative_prompt_en: negative.clone(),
        negative_prompt_cn: negative,
    })
}

/// Stable sort of a working copy by effective weight, heaviest first.
///
/// Tags with equal effective weight keep their input order, so every
/// dialect and both language outputs agree on tag positions.
fn sort_by_weight(tags: &[Tag]) -> Vec<&Tag> {
    let mut sorted: Vec<&Tag> = tags.iter().collect();
    sorted.sort_by(|a, b| {
        b.effective_weight()
            .partial_cmp(&a.effective_weight())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

fn render_joined(tags: &[&Tag], language: Language, format: PromptFormat) -> String {
    tags.iter()
        .map(|tag| render_token(label(tag, language), tag.effective_weight(), format))
        .collect::<Vec<_>>()
        .join(TOKEN_SEPARATOR)
}

/// Render one tag label according to the dialect's weight policy.
fn render_token(label: &str, weight: f64, format: PromptFormat) -> String {
    match weight_policy(format) {
        WeightPolicy::Repeat => {
            if weight > 1.0 {
                // Emphasis by literal repetition, no separator between
                // the repeated groups.
                format!("({label})").repeat(weight.floor() as usize)
            } else {
                // Weights at or below 1.0 have no visual effect in this
                // dialect. Intentional, not a bug.
                label.to_string()
            }
        }
        WeightPolicy::Bracket => {
            if weight == 1.0 {
                label.to_string()
            } else {
                format!("({label}:{weight:.1})")
            }
        }
        WeightPolicy::Ignore => label.to_string(),
    }
}
