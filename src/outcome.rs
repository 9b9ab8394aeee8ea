//! Normalization of cache operation results into tool results.

use crate::protocol::ToolResult;

/// What a single cache operation produced. Exactly one case per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOperationResult {
    Hit(String),
    Miss,
    Success,
    SuccessWithList(Vec<String>),
    BackendError(String),
    /// A reply this layer does not model, rendered as text.
    Unrecognized(String),
}

impl CacheOperationResult {
    /// The single text block presented to the agent.
    pub fn render(&self) -> String {
        match self {
            Self::Hit(value) => format!("Status: HIT\nValue: {value}"),
            Self::Miss => "Status: MISS".to_string(),
            Self::Success => "Status: SUCCESS".to_string(),
            Self::SuccessWithList(names) => {
                format!("Status: SUCCESS\nCaches: {}", names.join("\n"))
            }
            Self::BackendError(message) => format!("Status: ERROR:\nDetails: {message}"),
            Self::Unrecognized(raw) => format!("Status: UNKNOWN RESPONSE:\nDetails: {raw}"),
        }
    }
}

impl From<CacheOperationResult> for ToolResult {
    fn from(result: CacheOperationResult) -> Self {
        let text = result.render();
        match result {
            CacheOperationResult::BackendError(_) => ToolResult::error(text),
            _ => ToolResult::text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_case() {
        let cases = [
            (CacheOperationResult::Hit("42".into()), "Status: HIT\nValue: 42"),
            (CacheOperationResult::Miss, "Status: MISS"),
            (CacheOperationResult::Success, "Status: SUCCESS"),
            (
                CacheOperationResult::SuccessWithList(vec!["a".into(), "b".into(), "c".into()]),
                "Status: SUCCESS\nCaches: a\nb\nc",
            ),
            (
                CacheOperationResult::BackendError("quota exceeded".into()),
                "Status: ERROR:\nDetails: quota exceeded",
            ),
            (
                CacheOperationResult::Unrecognized("Throttled: slow down".into()),
                "Status: UNKNOWN RESPONSE:\nDetails: Throttled: slow down",
            ),
        ];

        for (result, expected) in cases {
            assert_eq!(result.render(), expected);
        }
    }

    #[test]
    fn produces_exactly_one_text_block() {
        let result: ToolResult =
            CacheOperationResult::SuccessWithList(vec!["x".into(), "y".into()]).into();
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.content[0].content_type, "text");
        assert!(!result.is_error);
    }

    #[test]
    fn backend_errors_are_flagged() {
        let result: ToolResult = CacheOperationResult::BackendError("down".into()).into();
        assert!(result.is_error);

        let result: ToolResult = CacheOperationResult::Unrecognized("?".into()).into();
        assert!(!result.is_error);
    }
}
