//! Prompt engine unit tests.
//!
//! Exercises the serializer contract: ordering, per-dialect weight
//! rendering, style suffixing, negative-prompt field presence, and the
//! single empty-input failure mode.

use super::*;
use crate::models::{GeneratePromptRequest, PromptFormat, Tag};

fn tag(en: &str, cn: &str, weight: Option<f64>) -> Tag {
    Tag {
        tag_en: en.to_string(),
        tag_cn: cn.to_string(),
        weight,
        main_category: None,
        sub_category: None,
    }
}

fn request(tags: Vec<Tag>, format: PromptFormat) -> GeneratePromptRequest {
    GeneratePromptRequest {
        tags,
        format,
        negative_prompt: String::new(),
        style: String::new(),
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_sorts_by_weight_descending() {
        let req = request(
            vec![
                tag("low", "低", Some(0.5)),
                tag("high", "高", Some(2.0)),
                tag("mid", "中", Some(1.2)),
            ],
            PromptFormat::Dalle,
        );
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "high, mid, low");
        assert_eq!(res.prompt_cn, "高, 中, 低");
    }

    #[test]
    fn test_equal_weights_keep_input_order() {
        let req = request(
            vec![
                tag("first", "一", None),
                tag("second", "二", Some(1.0)),
                tag("third", "三", None),
            ],
            PromptFormat::Dalle,
        );
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "first, second, third");
    }

    #[test]
    fn test_missing_weight_sorts_as_unity() {
        let req = request(
            vec![
                tag("plain", "平", None),
                tag("boosted", "强", Some(1.5)),
                tag("faded", "弱", Some(0.3)),
            ],
            PromptFormat::Dalle,
        );
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "boosted, plain, faded");
    }

    #[test]
    fn test_both_languages_share_positions() {
        let req = request(
            vec![tag("b", "乙", Some(0.8)), tag("a", "甲", Some(1.6))],
            PromptFormat::Midjourney,
        );
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "a, b");
        assert_eq!(res.prompt_cn, "甲, 乙");
    }

    #[test]
    fn test_non_finite_weight_treated_as_unity() {
        let req = request(
            vec![
                tag("nan", "非", Some(f64::NAN)),
                tag("heavy", "重", Some(1.5)),
            ],
            PromptFormat::Standard,
        );
        let res = generate(&req).unwrap();
        // NaN normalizes to 1.0: sorts below 1.5 and renders verbatim.
        assert_eq!(res.prompt_en, "(heavy), nan");
    }
}

mod standard_dialect {
    use super::*;

    #[test]
    fn test_unit_weight_renders_verbatim() {
        let req = request(vec![tag("sword", "剑", Some(1.0))], PromptFormat::Standard);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "sword");
        assert_eq!(res.prompt_cn, "剑");
    }

    #[test]
    fn test_double_weight_repeats_wrapped_label() {
        let req = request(vec![tag("fire", "火", Some(2.0))], PromptFormat::Standard);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "(fire)(fire)");
        assert_eq!(res.prompt_cn, "(火)(火)");
    }

    #[test]
    fn test_fractional_weight_repeats_floor_times() {
        let req = request(vec![tag("glow", "光", Some(1.5))], PromptFormat::Standard);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "(glow)");
    }

    #[test]
    fn test_sub_unity_weight_has_no_visual_effect() {
        let req = request(vec![tag("haze", "雾", Some(0.5))], PromptFormat::Standard);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "haze");
        assert_eq!(res.prompt_cn, "雾");
    }

    #[test]
    fn test_triple_weight() {
        let req = request(vec![tag("gold", "金", Some(3.0))], PromptFormat::Standard);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "(gold)(gold)(gold)");
    }
}

mod bracket_dialects {
    use super::*;

    #[test]
    fn test_comfy_renders_weight_with_one_decimal() {
        let req = request(vec![tag("glow", "光晕", Some(1.5))], PromptFormat::Comfy);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "(glow:1.5)");
        assert_eq!(res.prompt_cn, "(光晕:1.5)");
    }

    #[test]
    fn test_sub_unity_weight_also_bracketed() {
        let req = request(vec![tag("fog", "雾气", Some(0.8))], PromptFormat::Sd);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "(fog:0.8)");
    }

    #[test]
    fn test_unit_weight_renders_verbatim() {
        let req = request(vec![tag("tree", "树", None)], PromptFormat::Comfy);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "tree");
    }

    #[test]
    fn test_weight_rounded_to_one_decimal() {
        let req = request(vec![tag("mist", "薄雾", Some(1.34))], PromptFormat::Sd);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "(mist:1.3)");
    }

    #[test]
    fn test_comfy_and_sd_render_identically() {
        let tags = vec![
            tag("cat", "猫", Some(1.3)),
            tag("dog", "狗", None),
            tag("bird", "鸟", Some(0.6)),
        ];
        let comfy = generate(&request(tags.clone(), PromptFormat::Comfy)).unwrap();
        let sd = generate(&request(tags, PromptFormat::Sd)).unwrap();
        assert_eq!(comfy.prompt_en, sd.prompt_en);
        assert_eq!(comfy.prompt_cn, sd.prompt_cn);
        // Only the echoed dialect name differs.
        assert_eq!(comfy.format, PromptFormat::Comfy);
        assert_eq!(sd.format, PromptFormat::Sd);
    }
}

mod unweighted_dialects {
    use super::*;

    #[test]
    fn test_midjourney_appends_style_suffix() {
        let mut req = request(
            vec![tag("cat", "猫", None), tag("dog", "狗", None)],
            PromptFormat::Midjourney,
        );
        req.style = "raw".to_string();
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "cat, dog --style raw");
        assert_eq!(res.prompt_cn, "猫, 狗 --style raw");
        assert_eq!(res.style, "raw");
    }

    #[test]
    fn test_midjourney_empty_style_omits_suffix() {
        let req = request(vec![tag("cat", "猫", None)], PromptFormat::Midjourney);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "cat");
    }

    #[test]
    fn test_midjourney_ignores_weights() {
        let req = request(vec![tag("cat", "猫", Some(2.0))], PromptFormat::Midjourney);
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "cat");
    }

    #[test]
    fn test_style_on_other_dialects_is_echoed_but_not_rendered() {
        let mut req = request(vec![tag("cat", "猫", None)], PromptFormat::Dalle);
        req.style = "raw".to_string();
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "cat");
        assert_eq!(res.style, "raw");
    }

    #[test]
    fn test_dalle_plain_join() {
        let req = request(
            vec![tag("cat", "猫", Some(1.8)), tag("dog", "狗", Some(0.4))],
            PromptFormat::Dalle,
        );
        let res = generate(&req).unwrap();
        assert_eq!(res.prompt_en, "cat, dog");
    }
}

mod negative_prompt {
    use super::*;

    #[test]
    fn test_non_empty_negative_echoed_in_both_slots() {
        let mut req = request(vec![tag("cat", "猫", None)], PromptFormat::Standard);
        req.negative_prompt = "blurry".to_string();
        let res = generate(&req).unwrap();
        assert_eq!(res.negative_prompt_en.as_deref(), Some("blurry"));
        assert_eq!(res.negative_prompt_cn.as_deref(), Some("blurry"));
    }

    #[test]
    fn test_empty_negative_omits_fields() {
        let req = request(vec![tag("cat", "猫", None)], PromptFormat::Standard);
        let res = generate(&req).unwrap();
        assert!(res.negative_prompt_en.is_none());
        assert!(res.negative_prompt_cn.is_none());

        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("negative_prompt_en").is_none());
        assert!(json.get("negative_prompt_cn").is_none());
    }
}

mod failure {
    use super::*;
    use crate::utils::ApiError;

    #[test]
    fn test_empty_tags_rejected_for_every_dialect() {
        for format in [
            PromptFormat::Standard,
            PromptFormat::Comfy,
            PromptFormat::Sd,
            PromptFormat::Midjourney,
            PromptFormat::Dalle,
        ] {
            let mut req = request(Vec::new(), format);
            req.style = "raw".to_string();
            req.negative_prompt = "blurry".to_string();
            match generate(&req) {
                Err(ApiError::ValidationError(msg)) => {
                    assert!(msg.contains("at least one tag"));
                }
                other => panic!("expected validation error, got {:?}", other.map(|r| r.prompt_en)),
            }
        }
    }
}

mod determinism {
    use super::*;

    #[test]
    fn test_repeated_calls_are_byte_identical() {
        let mut req = request(
            vec![
                tag("castle", "城堡", Some(1.4)),
                tag("sunset", "日落", None),
                tag("mist", "薄雾", Some(0.7)),
            ],
            PromptFormat::Comfy,
        );
        req.negative_prompt = "lowres".to_string();

        let first = generate(&req).unwrap();
        for _ in 0..5 {
            let again = generate(&req).unwrap();
            assert_eq!(again.prompt_en, first.prompt_en);
            assert_eq!(again.prompt_cn, first.prompt_cn);
            assert_eq!(again.negative_prompt_en, first.negative_prompt_en);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let tags = vec![tag("b", "乙", Some(0.5)), tag("a", "甲", Some(1.5))];
        let req = request(tags.clone(), PromptFormat::Standard);
        let _ = generate(&req).unwrap();
        // The engine sorts a working copy, never the caller's list.
        assert_eq!(req.tags[0].tag_en, "b");
        assert_eq!(req.tags[1].tag_en, "a");
    }
}
