//! Domain errors surfaced by the tool layer.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// A required parameter was missing or malformed. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// A remote call failed; the message already carries the cause chain.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Config(String),
}

impl ToolError {
    /// HTTP-style status code for the error kind.
    pub fn code(&self) -> u16 {
        match self {
            ToolError::Validation(_) => 400,
            ToolError::NotFound(_) => 404,
            ToolError::Upstream(_) | ToolError::Config(_) => 500,
        }
    }

    /// Wraps a gateway failure, rendering the whole `anyhow` context chain after `operation`.
    pub fn upstream(operation: impl AsRef<str>, err: anyhow::Error) -> Self {
        ToolError::Upstream(format!("{}: {:#}", operation.as_ref(), err))
    }

    pub fn missing_param(name: &str) -> Self {
        ToolError::Validation(format!("缺少必要参数：{name}"))
    }
}

/// Gateway errors already carry their operation as context.
impl From<anyhow::Error> for ToolError {
    fn from(err: anyhow::Error) -> Self {
        ToolError::Upstream(format!("{:#}", err))
    }
}

/// User-facing rendering used at the protocol boundary.
pub fn format_error_message(err: &ToolError) -> String {
    format!("错误 ({}): {}", err.code(), err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn codes_follow_error_kind() {
        assert_eq!(ToolError::Validation("x".into()).code(), 400);
        assert_eq!(ToolError::NotFound("x".into()).code(), 404);
        assert_eq!(ToolError::Upstream("x".into()).code(), 500);
        assert_eq!(ToolError::Config("x".into()).code(), 500);
    }

    #[test]
    fn upstream_keeps_cause_chain() {
        let err = Err::<(), _>(anyhow!("connection reset"))
            .context("搜索剧集\"绝命毒师\"失败")
            .unwrap_err();
        let wrapped = ToolError::upstream("高级剧集发现失败", err);
        assert_eq!(
            wrapped.to_string(),
            "高级剧集发现失败: 搜索剧集\"绝命毒师\"失败: connection reset"
        );
    }

    #[test]
    fn formats_with_code_prefix() {
        let err = ToolError::missing_param("genre");
        assert_eq!(format_error_message(&err), "错误 (400): 缺少必要参数：genre");
    }
}
