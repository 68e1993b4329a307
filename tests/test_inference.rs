//! Integration test: inference-service contract over a trained artifact

use polars::prelude::*;
use shopintent::artifact::ArtifactBundle;
use shopintent::error::IntentError;
use shopintent::inference::{InferenceService, SessionFeatures};
use shopintent::schema::FeatureValue;
use shopintent::training::{Trainer, TrainingConfig};

const NUMERIC_FEATURES: [&str; 14] = [
    "Administrative",
    "Administrative_Duration",
    "Informational",
    "Informational_Duration",
    "ProductRelated",
    "ProductRelated_Duration",
    "BounceRates",
    "ExitRates",
    "PageValues",
    "SpecialDay",
    "OperatingSystems",
    "Browser",
    "Region",
    "TrafficType",
];

const CATEGORICAL_FEATURES: [&str; 3] = ["Month", "VisitorType", "Weekend"];

fn synthetic_sessions() -> DataFrame {
    let n = 20usize;
    let buyer: Vec<bool> = (0..n).map(|i| i % 2 == 1).collect();

    let product_related: Vec<i64> = (0..n)
        .map(|i| if buyer[i] { 40 + i as i64 } else { 5 + i as i64 })
        .collect();
    let product_related_duration: Vec<f64> =
        product_related.iter().map(|&v| v as f64 * 8.0).collect();

    df!(
        "Administrative" => (0..n).map(|i| (i % 4) as i64).collect::<Vec<_>>(),
        "Administrative_Duration" => (0..n).map(|i| (i % 4) as f64 * 10.0).collect::<Vec<_>>(),
        "Informational" => (0..n).map(|i| (i % 3) as i64).collect::<Vec<_>>(),
        "Informational_Duration" => (0..n).map(|i| (i % 3) as f64 * 5.0).collect::<Vec<_>>(),
        "ProductRelated" => product_related,
        "ProductRelated_Duration" => product_related_duration,
        "BounceRates" => (0..n).map(|i| if buyer[i] { 0.01 } else { 0.2 }).collect::<Vec<_>>(),
        "ExitRates" => (0..n).map(|i| if buyer[i] { 0.02 } else { 0.25 }).collect::<Vec<_>>(),
        "PageValues" => (0..n).map(|i| if buyer[i] { 15.0 + i as f64 } else { 0.0 }).collect::<Vec<_>>(),
        "SpecialDay" => (0..n).map(|i| if i % 5 == 0 { 0.4 } else { 0.0 }).collect::<Vec<_>>(),
        "Month" => (0..n).map(|i| ["Feb", "Mar", "May", "Nov", "Dec"][i % 5]).collect::<Vec<_>>(),
        "OperatingSystems" => (0..n).map(|i| (i % 3 + 1) as i64).collect::<Vec<_>>(),
        "Browser" => (0..n).map(|i| (i % 4 + 1) as i64).collect::<Vec<_>>(),
        "Region" => (0..n).map(|i| (i % 9 + 1) as i64).collect::<Vec<_>>(),
        "TrafficType" => (0..n).map(|i| (i % 6 + 1) as i64).collect::<Vec<_>>(),
        "VisitorType" => (0..n).map(|i| if i % 5 == 0 { "New_Visitor" } else { "Returning_Visitor" }).collect::<Vec<_>>(),
        "Weekend" => (0..n).map(|i| i % 3 == 0).collect::<Vec<_>>(),
        "Revenue" => buyer
    )
    .unwrap()
}

fn trained_service() -> InferenceService {
    let config = TrainingConfig {
        n_trees: 25,
        ..TrainingConfig::default()
    };
    let outcome = Trainer::new(config).train(&synthetic_sessions()).unwrap();
    InferenceService::new(ArtifactBundle::from_pipeline(outcome.pipeline))
}

fn buyer_session() -> SessionFeatures {
    let mut session = SessionFeatures::new();
    session.insert("Administrative".to_string(), FeatureValue::Number(2.0));
    session.insert("Administrative_Duration".to_string(), FeatureValue::Number(20.0));
    session.insert("Informational".to_string(), FeatureValue::Number(1.0));
    session.insert("Informational_Duration".to_string(), FeatureValue::Number(10.0));
    session.insert("ProductRelated".to_string(), FeatureValue::Number(45.0));
    session.insert("ProductRelated_Duration".to_string(), FeatureValue::Number(360.0));
    session.insert("BounceRates".to_string(), FeatureValue::Number(0.01));
    session.insert("ExitRates".to_string(), FeatureValue::Number(0.02));
    session.insert("PageValues".to_string(), FeatureValue::Number(18.0));
    session.insert("SpecialDay".to_string(), FeatureValue::Number(0.0));
    session.insert("Month".to_string(), FeatureValue::Text("Nov".to_string()));
    session.insert("OperatingSystems".to_string(), FeatureValue::Number(2.0));
    session.insert("Browser".to_string(), FeatureValue::Number(1.0));
    session.insert("Region".to_string(), FeatureValue::Number(3.0));
    session.insert("TrafficType".to_string(), FeatureValue::Number(2.0));
    session.insert(
        "VisitorType".to_string(),
        FeatureValue::Text("Returning_Visitor".to_string()),
    );
    session.insert("Weekend".to_string(), FeatureValue::Flag(false));
    session
}

#[test]
fn test_prediction_pair_is_consistent() {
    let service = trained_service();
    let prediction = service.predict(&buyer_session()).unwrap();

    assert!(prediction.class == 0 || prediction.class == 1);
    assert!((0.0..=1.0).contains(&prediction.probability));
    assert_eq!(prediction.class == 1, prediction.probability >= 0.5);
}

#[test]
fn test_every_feature_is_required() {
    let service = trained_service();

    for name in NUMERIC_FEATURES.iter().chain(CATEGORICAL_FEATURES.iter()) {
        let mut session = buyer_session();
        session.remove(*name);

        let err = service.predict(&session).unwrap_err();
        match err {
            IntentError::SchemaError(msg) => {
                assert!(
                    msg.contains(name),
                    "error for {} should name the feature: {}",
                    name,
                    msg
                );
            }
            other => panic!("expected SchemaError for {}, got {:?}", name, other),
        }
    }
}

#[test]
fn test_unknown_categories_are_tolerated() {
    let service = trained_service();

    let mut session = buyer_session();
    session.insert("Month".to_string(), FeatureValue::Text("June".to_string()));
    session.insert("VisitorType".to_string(), FeatureValue::Text("Other".to_string()));

    let prediction = service.predict(&session).unwrap();
    assert!((0.0..=1.0).contains(&prediction.probability));
}

#[test]
fn test_extra_keys_are_ignored() {
    let service = trained_service();

    let mut session = buyer_session();
    session.insert("NotAFeature".to_string(), FeatureValue::Number(99.0));

    assert!(service.predict(&session).is_ok());
}

#[test]
fn test_session_json_deserializes_into_features() {
    // The same shape the CLI and the HTTP API accept
    let json = r#"{
        "Administrative": 2,
        "Month": "June",
        "Weekend": true
    }"#;

    let session: SessionFeatures = serde_json::from_str(json).unwrap();
    assert_eq!(session.get("Administrative"), Some(&FeatureValue::Number(2.0)));
    assert_eq!(
        session.get("Month"),
        Some(&FeatureValue::Text("June".to_string()))
    );
    assert_eq!(session.get("Weekend"), Some(&FeatureValue::Flag(true)));
}
