//! Integration tests for directive extraction.
//!
//! These tests verify that:
//! - Sign inference, numeric normalization and time-segment propagation work
//!   end to end through the lexicon annotator
//! - Only the first time segment is used for the whole input
//! - Repeated directives are kept (or dropped) according to policy
//! - Contract violations in a synthetic token stream abort the extraction

use std::sync::Arc;
use titr_annotate::LexiconAnnotator;
use titr_core::{DEFAULT_TIME_SEGMENT, ExtractionError, ExtractionResult, MealTime, Token};
use titr_extraction::{ExtractionConfig, ExtractionEngine};

fn engine() -> ExtractionEngine<LexiconAnnotator> {
    ExtractionEngine::with_defaults(LexiconAnnotator::with_defaults())
}

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn extract(text: &str) -> ExtractionResult {
    engine().extract(text).expect("extraction should succeed")
}

#[test]
fn test_no_directives_is_not_an_error() {
    let result = extract("Пациент чувствует себя хорошо, продолжать текущую терапию.");
    assert!(result.is_empty());
    assert!(result.basal_changes.is_empty());
    assert!(result.carb_ratio_changes.is_empty());
    assert!(result.correction_factor_changes.is_empty());
}

#[test]
fn test_extraction_is_idempotent() {
    let text = "С 23:00 до 6:00 снизить базу на 10 %. УК на завтрак 1:12";
    let engine = engine();
    let first = engine.extract(text).ok();
    let second = engine.extract(text).ok();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
#[expect(clippy::float_cmp, reason = "Parsed literals are exact")]
fn test_decrease_and_increase_signs() {
    let decrease = extract("Снизить базу на 10 %");
    assert_eq!(decrease.basal_changes.len(), 1);
    assert_eq!(decrease.basal_changes[0].change_percent, -10.0);

    let increase = extract("увеличить базу на 15 %");
    assert_eq!(increase.basal_changes[0].change_percent, 15.0);

    let inflected = extract("уменьшите базальный на 20 %");
    assert_eq!(inflected.basal_changes[0].change_percent, -20.0);
}

#[test]
fn test_time_segment_normalized_and_attached() {
    let result = extract("с 9.00 до 17:00 повысить базу на 5 %");
    assert_eq!(result.basal_changes.len(), 1);
    assert_eq!(result.basal_changes[0].time_segment, "09:00-17:00");
}

#[test]
fn test_default_time_segment_without_context() {
    let result = extract("повысить базу на 5 %");
    assert_eq!(result.basal_changes[0].time_segment, DEFAULT_TIME_SEGMENT);
}

#[test]
fn test_context_applies_to_directives_before_the_segment() {
    let result = extract("снизить базу на 10 % с 23:00 до 6:00");
    assert_eq!(result.basal_changes[0].time_segment, "23:00-06:00");
}

#[test]
fn test_only_first_time_segment_is_used() {
    let result = extract(
        "с 23:00 до 6:00 снизить базу на 10 %, с 6:00 до 12:00 повысить базу на 5 %",
    );
    assert_eq!(result.basal_changes.len(), 2);
    assert!(
        result
            .basal_changes
            .iter()
            .all(|d| d.time_segment == "23:00-06:00")
    );
}

#[test]
#[expect(clippy::float_cmp, reason = "Parsed literals are exact")]
fn test_ratio_keeps_second_number() {
    let result = extract("УК на завтрак 1:10");
    assert_eq!(result.carb_ratio_changes.len(), 1);
    assert_eq!(result.carb_ratio_changes[0].meal_time, MealTime::Breakfast);
    assert_eq!(result.carb_ratio_changes[0].value, 10.0);
}

#[test]
#[expect(clippy::float_cmp, reason = "Parsed literals are exact")]
fn test_ratio_without_separator() {
    let result = extract("коэффициент на ужин 12");
    assert_eq!(result.carb_ratio_changes[0].meal_time, MealTime::Dinner);
    assert_eq!(result.carb_ratio_changes[0].value, 12.0);
}

#[test]
#[expect(clippy::float_cmp, reason = "Parsed literals are exact")]
fn test_multiple_matches_in_document_order() {
    let result = extract(
        "ук на завтрак 1:10, ук на обед 1:12, ук на ужин 1:8. \
         снизить базу на 10 %, снизить базу на 10 %",
    );
    let meals: Vec<MealTime> = result.carb_ratio_changes.iter().map(|d| d.meal_time).collect();
    assert_eq!(meals, [MealTime::Breakfast, MealTime::Lunch, MealTime::Dinner]);
    assert_eq!(result.carb_ratio_changes[2].value, 8.0);

    assert_eq!(result.basal_changes.len(), 2);
    assert_eq!(result.basal_changes[0], result.basal_changes[1]);
}

#[test]
fn test_duplicates_dropped_when_policy_disallows() {
    let engine = ExtractionEngine::new(
        LexiconAnnotator::with_defaults(),
        ExtractionConfig {
            allow_duplicate_directives: false,
        },
    );
    let result = engine
        .extract("снизить базу на 10 %, снизить базу на 10 %, повысить базу на 5 %")
        .ok();
    let percents: Option<Vec<f64>> =
        result.map(|r| r.basal_changes.iter().map(|d| d.change_percent).collect());
    assert_eq!(percents, Some(vec![-10.0, 5.0]));
}

#[test]
#[expect(clippy::float_cmp, reason = "Parsed literals are exact")]
fn test_comma_decimal_separator() {
    let result = extract("снизить базу на 10,5 %");
    assert_eq!(result.basal_changes[0].change_percent, -10.5);
}

#[test]
fn test_unparsable_numeric_token_aborts_extraction() {
    let tokens = vec![
        Token::word("снизить", "снизить"),
        Token::word("базу", "база"),
        Token::literal("на"),
        Token::number("десять"),
        Token::punct("%"),
        Token::literal("ук"),
        Token::literal("на"),
        Token::word("обед", "обед"),
        Token::number("10"),
    ];
    let err = engine().extract_tokens(&tokens);
    assert!(matches!(
        err,
        Err(ExtractionError::MalformedTokenStream {
            pattern: "BASAL_CHANGE",
            index: 3,
            ..
        })
    ));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_synthetic_token_stream_from_json() {
    let json = r#"[
        {"surface":"от","lower":"от","lemma":"от","shape":"xx"},
        {"surface":"7.30","lower":"7.30","lemma":"7.30","shape":"d.dd","is_numeric":true},
        {"surface":"по","lower":"по","lemma":"по","shape":"xx"},
        {"surface":"9.00","lower":"9.00","lemma":"9.00","shape":"d.dd","is_numeric":true},
        {"surface":"повысить","lower":"повысить","lemma":"повысить","shape":"xxxx"},
        {"surface":"базальный","lower":"базальный","lemma":"базальный","shape":"xxxx"},
        {"surface":"на","lower":"на","lemma":"на","shape":"xx"},
        {"surface":"20","lower":"20","lemma":"20","shape":"dd","is_numeric":true},
        {"surface":"%","lower":"%","lemma":"%","shape":"%","is_punctuation":true}
    ]"#;
    let tokens: Vec<Token> = serde_json::from_str(json).expect("token JSON should deserialize");

    let result = engine()
        .extract_tokens(&tokens)
        .expect("well-formed stream should extract");
    assert_eq!(result.basal_changes.len(), 1);
    assert_eq!(result.basal_changes[0].time_segment, "07:30-09:00");
}

#[test]
fn test_concurrent_extractions_are_independent() {
    let engine = Arc::new(engine());
    let texts = [
        "с 23:00 до 6:00 снизить базу на 10 %",
        "повысить базу на 5 %",
        "ук на обед 1:12",
    ];

    let handles: Vec<_> = texts
        .iter()
        .map(|text| {
            let engine = Arc::clone(&engine);
            let text = (*text).to_string();
            std::thread::spawn(move || engine.extract(&text).ok())
        })
        .collect();

    let results: Vec<Option<ExtractionResult>> =
        handles.into_iter().map(|h| h.join().ok().flatten()).collect();

    let segments: Vec<Option<String>> = results
        .iter()
        .map(|r| {
            r.as_ref()
                .and_then(|r| r.basal_changes.first())
                .map(|d| d.time_segment.clone())
        })
        .collect();
    assert_eq!(
        segments,
        [
            Some("23:00-06:00".to_string()),
            Some(DEFAULT_TIME_SEGMENT.to_string()),
            None
        ]
    );
    assert!(results[2].as_ref().is_some_and(|r| r.carb_ratio_changes.len() == 1));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_serialized_shape() {
    let result = extract("с 22.00 до 2:00 снизить базу на 10 %. ук на завтрак 1:10");
    let value = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "basal_changes": [{"time_segment": "22:00-02:00", "change_percent": -10.0}],
            "carb_ratio_changes": [{"meal_time": "breakfast", "value": 10.0}],
            "correction_factor_changes": []
        })
    );
}

#[test]
#[expect(clippy::float_cmp, reason = "Parsed literals are exact")]
fn test_colon_after_meal_is_optional_separator() {
    let result = extract("УК на завтрак: 10");
    assert_eq!(result.carb_ratio_changes.len(), 1);
    assert_eq!(result.carb_ratio_changes[0].meal_time, MealTime::Breakfast);
    assert_eq!(result.carb_ratio_changes[0].value, 10.0);
}

#[test]
#[expect(clippy::float_cmp, reason = "Parsed literals are exact")]
fn test_ratio_after_closing_preposition() {
    let result = extract("ук на ужин по 1:8");
    assert_eq!(result.carb_ratio_changes.len(), 1);
    assert_eq!(result.carb_ratio_changes[0].meal_time, MealTime::Dinner);
    assert_eq!(result.carb_ratio_changes[0].value, 8.0);
}
