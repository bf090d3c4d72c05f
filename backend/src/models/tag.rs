use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A bilingual prompt tag with an optional rendering weight.
///
/// The identity of a tag, for selection and removal purposes, is the
/// `(tag_en, tag_cn)` pair; weight and category provenance never
/// participate in identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    /// English label, e.g. "masterpiece"
    pub tag_en: String,
    /// Chinese label, e.g. "杰作"
    pub tag_cn: String,
    /// Rendering weight; practical range 0.1..=2.0 but never rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl Tag {
    /// Declared weight, or 1.0 when absent or non-finite.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() => w,
            _ => 1.0,
        }
    }

    /// Whether two tags are the same selection (both labels match).
    pub fn same_labels(&self, other: &Tag) -> bool {
        self.tag_en == other.tag_en && self.tag_cn == other.tag_cn
    }
}

/// Prompt syntax dialect.
///
/// | Dialect      | weight == 1.0 | weight != 1.0                              |
/// |--------------|---------------|--------------------------------------------|
/// | `standard`   | label         | > 1.0: `(label)` x floor(weight); < 1.0: label |
/// | `comfy`/`sd` | label         | `(label:W)`, W with one decimal place      |
/// | `midjourney` | label         | label (weight ignored, `--style` suffix)   |
/// | `dalle`      | label         | label (weight ignored)                     |
///
/// `comfy` and `sd` are two historical names for the same bracket-weighted
/// syntax and must render identically. Sub-unity weights in `standard` have
/// no visual effect; that asymmetry is intentional and preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PromptFormat {
    Standard,
    Comfy,
    Sd,
    Midjourney,
    Dalle,
}

impl Default for PromptFormat {
    fn default() -> Self {
        Self::Standard
    }
}

impl PromptFormat {
    /// Parse a wire value. Unknown values fall back to `standard` instead
    /// of failing the request.
    pub fn parse(value: &str) -> Self {
        match value {
            "comfy" => Self::Comfy,
            "sd" => Self::Sd,
            "midjourney" => Self::Midjourney,
            "dalle" => Self::Dalle,
            _ => Self::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Comfy => "comfy",
            Self::Sd => "sd",
            Self::Midjourney => "midjourney",
            Self::Dalle => "dalle",
        }
    }
}

impl<'de> Deserialize<'de> for PromptFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Request body for `POST /api/generate_prompt`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GeneratePromptRequest {
    /// Ordered tag selection; rejected when empty
    #[validate(length(min = 1, message = "at least one tag required"))]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub format: PromptFormat,
    /// Free text, echoed verbatim into both negative fields when non-empty
    #[serde(default, rename = "negativePrompt")]
    pub negative_prompt: String,
    /// Trailing style token, meaningful only to `midjourney`
    #[serde(default)]
    pub style: String,
}

/// Rendered prompt pair. The negative fields are present only when a
/// non-empty negative prompt was supplied.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneratePromptResponse {
    pub prompt_en: String,
    pub prompt_cn: String,
    /// Resolved dialect (`standard` after an unknown-value fallback)
    pub format: PromptFormat,
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt_cn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_weight_defaults() {
        let tag = Tag {
            tag_en: "sword".into(),
            tag_cn: "剑".into(),
            weight: None,
            main_category: None,
            sub_category: None,
        };
        assert_eq!(tag.effective_weight(), 1.0);

        let nan = Tag { weight: Some(f64::NAN), ..tag.clone() };
        assert_eq!(nan.effective_weight(), 1.0);

        let inf = Tag { weight: Some(f64::INFINITY), ..tag.clone() };
        assert_eq!(inf.effective_weight(), 1.0);

        let weighted = Tag { weight: Some(1.5), ..tag };
        assert_eq!(weighted.effective_weight(), 1.5);
    }

    #[test]
    fn test_same_labels_ignores_weight_and_category() {
        let a = Tag {
            tag_en: "cat".into(),
            tag_cn: "猫".into(),
            weight: Some(1.5),
            main_category: Some("其他".into()),
            sub_category: None,
        };
        let b = Tag {
            tag_en: "cat".into(),
            tag_cn: "猫".into(),
            weight: None,
            main_category: None,
            sub_category: Some("效果".into()),
        };
        assert!(a.same_labels(&b));
    }

    #[test]
    fn test_format_parse_known_values() {
        assert_eq!(PromptFormat::parse("standard"), PromptFormat::Standard);
        assert_eq!(PromptFormat::parse("comfy"), PromptFormat::Comfy);
        assert_eq!(PromptFormat::parse("sd"), PromptFormat::Sd);
        assert_eq!(PromptFormat::parse("midjourney"), PromptFormat::Midjourney);
        assert_eq!(PromptFormat::parse("dalle"), PromptFormat::Dalle);
    }

    #[test]
    fn test_format_parse_unknown_falls_back_to_standard() {
        assert_eq!(PromptFormat::parse("niji"), PromptFormat::Standard);
        assert_eq!(PromptFormat::parse(""), PromptFormat::Standard);
    }

    #[test]
    fn test_request_defaults() {
        let req: GeneratePromptRequest =
            serde_json::from_str(r#"{"tags":[{"tag_en":"cat","tag_cn":"猫"}]}"#).unwrap();
        assert_eq!(req.format, PromptFormat::Standard);
        assert!(req.negative_prompt.is_empty());
        assert!(req.style.is_empty());
    }
}
