//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.
//!
//! Every identifier in SurveyPro is issued by the backend, so the client only
//! checks that it is present and of sane length before using it in a URL.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length accepted for any identifier.
pub const MAX_ID_LEN: usize = 128;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting empty and over-long values.
            pub fn new(id: impl Into<String>) -> Result<Self, ValueObjectError> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(ValueObjectError::IdEmpty { kind: $kind });
                }
                let len = trimmed.len();
                if len > MAX_ID_LEN {
                    return Err(ValueObjectError::IdTooLong {
                        kind: $kind,
                        max: MAX_ID_LEN,
                        actual: len,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Get the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert to owned String.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Survey (form) identifier.
    SurveyId,
    "SurveyId"
);
identifier!(
    /// Question identifier, unique within a survey.
    QuestionId,
    "QuestionId"
);
identifier!(
    /// Public share token used by respondents to open a published survey.
    ShareToken,
    "ShareToken"
);
identifier!(
    /// Export job identifier.
    JobId,
    "JobId"
);
identifier!(
    /// Room identifier.
    RoomId,
    "RoomId"
);
identifier!(
    /// User identifier.
    UserId,
    "UserId"
);

/// Backend ids arrive as JSON strings or numbers; both are accepted.
pub(crate) fn id_from_json(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_id_new_success() {
        // テスト項目: 有効なサーベイ ID を作成できる
        // given (前提条件):
        let id = "form-42".to_string();

        // when (操作):
        let result = SurveyId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "form-42");
    }

    #[test]
    fn test_id_is_trimmed() {
        // テスト項目: 前後の空白は取り除かれる
        let id = JobId::new("  job-1 \n").unwrap();
        assert_eq!(id.as_str(), "job-1");
    }

    #[test]
    fn test_id_new_empty_fails() {
        // テスト項目: 空の ID は作成できない
        // when (操作):
        let result = RoomId::new("   ");

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::IdEmpty { kind: "RoomId" }
        );
    }

    #[test]
    fn test_id_new_too_long_fails() {
        // テスト項目: 129 文字以上の ID は作成できない
        // given (前提条件):
        let id = "a".repeat(MAX_ID_LEN + 1);

        // when (操作):
        let result = ShareToken::new(id);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::IdTooLong {
                kind: "ShareToken",
                max: MAX_ID_LEN,
                actual: MAX_ID_LEN + 1
            }
        );
    }

    #[test]
    fn test_id_serde_rejects_empty_string() {
        // テスト項目: デシリアライズ時にも検証が行われる
        let ok: QuestionId = serde_json::from_str("\"q1\"").unwrap();
        assert_eq!(ok.as_str(), "q1");

        let err = serde_json::from_str::<QuestionId>("\"\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_id_from_json_accepts_numbers() {
        // テスト項目: 数値の ID も文字列として扱える
        assert_eq!(id_from_json(&serde_json::json!(17)).as_deref(), Some("17"));
        assert_eq!(id_from_json(&serde_json::json!("x")).as_deref(), Some("x"));
        assert_eq!(id_from_json(&serde_json::json!(null)), None);
    }
}
