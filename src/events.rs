// Events and models shared between the submission task and the TUI
//
// The submission runs on a spawned task; its single completion event flows
// back to the event loop over an mpsc channel. The classification result
// mirrors the service's JSON response.

use crate::client::ClassifyError;
use serde::{Deserialize, Deserializer, Serialize};

/// Events flowing from background tasks into the TUI event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// The in-flight submission resolved - success, service error, or
    /// transport failure. Exactly one of these arrives per submission.
    SubmissionFinished(Result<Classification, ClassifyError>),
}

/// Binary classification tag.
///
/// The service answers with a category string; the known productive
/// spellings map to `Productive` and everything else renders as the
/// unproductive variant. The badge is a binary tag, not an open enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Productive,
    Unproductive,
}

impl Category {
    /// Canonical display label for the badge.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Productive => "Productive",
            Category::Unproductive => "Unproductive",
        }
    }

    pub fn is_productive(&self) -> bool {
        matches!(self, Category::Productive)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            // The reference service answers in Portuguese; accept both spellings.
            "Productive" | "Produtivo" => Category::Productive,
            _ => Category::Unproductive,
        })
    }
}

/// A successful classification, as returned by `POST /classify`.
///
/// Immutable once rendered until the next submission or an explicit reset.
/// `timestamp` is displayed verbatim - no client-side reformatting.
#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    pub email_preview: String,
    pub category: Category,
    #[serde(deserialize_with = "confidence_percent")]
    pub confidence: u8,
    pub suggested_response: String,
    pub timestamp: String,
}

/// The service reports confidence on a 0-100 scale but may round to two
/// decimals (e.g. 33.33); clamp onto the integer scale the UI renders.
fn confidence_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_accepts_both_productive_spellings() {
        let c: Category = serde_json::from_value(serde_json::json!("Productive")).unwrap();
        assert_eq!(c, Category::Productive);

        let c: Category = serde_json::from_value(serde_json::json!("Produtivo")).unwrap();
        assert_eq!(c, Category::Productive);
    }

    #[test]
    fn test_unknown_category_is_unproductive() {
        for raw in ["Improdutivo", "Spam", ""] {
            let c: Category = serde_json::from_value(serde_json::json!(raw)).unwrap();
            assert_eq!(c, Category::Unproductive, "{raw:?}");
        }
    }

    #[test]
    fn test_classification_from_service_json() {
        // Shape as produced by the service, including the extra `success`
        // flag this client ignores
        let body = serde_json::json!({
            "success": true,
            "email_preview": "Preciso de ajuda com login",
            "category": "Produtivo",
            "confidence": 92.0,
            "suggested_response": "Prezado(a), ...",
            "timestamp": "2025-01-15 09:30:00"
        });

        let result: Classification = serde_json::from_value(body).unwrap();
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.confidence, 92);
        assert_eq!(result.timestamp, "2025-01-15 09:30:00");
    }

    #[test]
    fn test_fractional_confidence_rounds_onto_integer_scale() {
        let body = serde_json::json!({
            "email_preview": "p",
            "category": "Improdutivo",
            "confidence": 33.33,
            "suggested_response": "r",
            "timestamp": "t"
        });

        let result: Classification = serde_json::from_value(body).unwrap();
        assert_eq!(result.confidence, 33);
    }
}
