use serde::{Deserialize, Serialize};

use super::gateway::{GenerateRequest, LlmGatewayError, TextGateway};

const PREVIEW_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAnalysisKind {
    Sentiment,
    Summary,
    Keywords,
    General,
}

impl ContentAnalysisKind {
    /// Unrecognized tags fall back to the general template.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "sentiment" => Self::Sentiment,
            "summary" => Self::Summary,
            "keywords" => Self::Keywords,
            _ => Self::General,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Summary => "summary",
            Self::Keywords => "keywords",
            Self::General => "general",
        }
    }
}

pub fn prompt_for(kind: ContentAnalysisKind, content: &str) -> String {
    let instruction = match kind {
        ContentAnalysisKind::Sentiment => "Analyze the sentiment of the following text:",
        ContentAnalysisKind::Summary => "Provide a concise summary of the following text:",
        ContentAnalysisKind::Keywords => "Extract key themes and keywords from the following text:",
        ContentAnalysisKind::General => "Analyze the following content:",
    };

    format!("{instruction}\n{content}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub analysis_type: String,
    pub content_preview: String,
    pub result: String,
}

pub async fn analyze_content<G: TextGateway + ?Sized>(
    gateway: &G,
    content: &str,
    kind: ContentAnalysisKind,
) -> Result<ContentAnalysis, LlmGatewayError> {
    let result = gateway
        .generate(GenerateRequest::new(prompt_for(kind, content)))
        .await?;

    Ok(ContentAnalysis {
        analysis_type: kind.as_str().to_string(),
        content_preview: preview(content),
        result,
    })
}

/// First 100 characters of the content, with an ellipsis when truncated.
fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let truncated: String = chars.by_ref().take(PREVIEW_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}
