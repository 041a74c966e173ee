//! Result classifier: maps a raw capture-service response onto a
//! [`ResultBundle`].
//!
//! Classification is pure. It extracts the three optional keys the service
//! may return and performs no validation beyond presence; a response carrying
//! none of them classifies to an empty bundle, which the lookup client treats
//! as a retryable failure.

use crate::types::{LookupResult, ResultBundle};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    #[serde(default)]
    extracted_sign_in_code: Option<RawSignInCode>,
    #[serde(default)]
    extracted_actualizar_hogar_link: Option<RawRecoveryLink>,
    #[serde(default)]
    extracted_temporal_sign_in_link: Option<RawTemporalSignInLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSignInCode {
    sign_in_code: String,
    time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecoveryLink {
    recovery_link: String,
    time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTemporalSignInLink {
    temporal_sign_in_link: String,
    time: DateTime<Utc>,
}

/// Classify a raw response body.
///
/// Absent keys are not errors; a body that is not a JSON object is.
pub fn classify(body: &[u8]) -> Result<ResultBundle, serde_json::Error> {
    let raw: RawResponse = serde_json::from_slice(body)?;

    let mut bundle = ResultBundle::new();
    if let Some(link) = raw.extracted_temporal_sign_in_link {
        bundle.insert(LookupResult::TemporalSignInLink {
            url: link.temporal_sign_in_link,
            observed_at: link.time,
        });
    }
    if let Some(link) = raw.extracted_actualizar_hogar_link {
        bundle.insert(LookupResult::RecoveryLink {
            url: link.recovery_link,
            observed_at: link.time,
        });
    }
    if let Some(code) = raw.extracted_sign_in_code {
        bundle.insert(LookupResult::SignInCode {
            code: code.sign_in_code,
            observed_at: code.time,
        });
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultTag;

    #[test]
    fn all_keys_absent_is_empty() {
        let bundle = classify(b"{}").unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn explicit_nulls_are_absent() {
        let body = br#"{
            "extractedSignInCode": null,
            "extractedActualizarHogarLink": null,
            "extractedTemporalSignInLink": null
        }"#;
        assert!(classify(body).unwrap().is_empty());
    }

    #[test]
    fn single_code_classifies() {
        let body = br#"{
            "extractedSignInCode": { "signInCode": "482913", "time": "2024-05-01T12:00:00Z" }
        }"#;
        let bundle = classify(body).unwrap();
        assert_eq!(bundle.len(), 1);
        match bundle.get(ResultTag::SignInCode) {
            Some(LookupResult::SignInCode { code, .. }) => assert_eq!(code, "482913"),
            other => panic!("unexpected entry: {other:?}"),
        }
    }

    #[test]
    fn all_three_variants_classify() {
        let body = br#"{
            "extractedSignInCode": { "signInCode": "482913", "time": "2024-05-01T12:00:00Z" },
            "extractedActualizarHogarLink": { "recoveryLink": "https://svc.example.com/r/1", "time": "2024-05-01T12:01:00Z" },
            "extractedTemporalSignInLink": { "temporalSignInLink": "https://svc.example.com/t/1", "time": "2024-05-01T12:02:00Z" }
        }"#;
        let bundle = classify(body).unwrap();
        assert_eq!(bundle.len(), 3);
        assert!(bundle.get(ResultTag::RecoveryLink).is_some());
        assert!(bundle.get(ResultTag::TemporalSignInLink).is_some());
    }

    #[test]
    fn non_object_body_is_a_decode_error() {
        assert!(classify(b"not json").is_err());
    }
}
