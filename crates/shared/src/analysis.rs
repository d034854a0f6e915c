#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisCategory {
    Optimization,
    Security,
    Performance,
    General,
}

impl AnalysisCategory {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "optimization" => Some(Self::Optimization),
            "security" => Some(Self::Security),
            "performance" => Some(Self::Performance),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimization => "optimization",
            Self::Security => "security",
            Self::Performance => "performance",
            Self::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisGuidance {
    pub recommendations: &'static [&'static str],
    pub score: f32,
}

const OPTIMIZATION_RECOMMENDATIONS: &[&str] = &[
    "Use multi-stage builds to reduce image size",
    "Combine RUN commands to reduce layer count",
    "Use .dockerignore to exclude unnecessary files",
];

const SECURITY_RECOMMENDATIONS: &[&str] = &[
    "Use specific base image tags instead of 'latest'",
    "Run containers as non-root user",
    "Scan image for vulnerabilities",
];

const PERFORMANCE_RECOMMENDATIONS: &[&str] = &[
    "Cache dependencies before adding application code",
    "Use minimal base images",
    "Optimize layer ordering",
];

// The general category and unrecognized tags share the empty default entry.
const DEFAULT_GUIDANCE: AnalysisGuidance = AnalysisGuidance {
    recommendations: &[],
    score: 0.0,
};

pub fn guidance_for(category: Option<AnalysisCategory>) -> AnalysisGuidance {
    match category {
        Some(AnalysisCategory::Optimization) => AnalysisGuidance {
            recommendations: OPTIMIZATION_RECOMMENDATIONS,
            score: 0.75,
        },
        Some(AnalysisCategory::Security) => AnalysisGuidance {
            recommendations: SECURITY_RECOMMENDATIONS,
            score: 0.65,
        },
        Some(AnalysisCategory::Performance) => AnalysisGuidance {
            recommendations: PERFORMANCE_RECOMMENDATIONS,
            score: 0.80,
        },
        Some(AnalysisCategory::General) | None => DEFAULT_GUIDANCE,
    }
}
