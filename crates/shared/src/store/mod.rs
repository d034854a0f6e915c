mod memory;

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use memory::MemoryStore;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Running,
    Completed,
}

impl BuildStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBuild {
    pub name: String,
    pub dockerfile: String,
    pub target: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BuildRecord {
    pub id: String,
    pub name: String,
    pub dockerfile: String,
    pub target: Option<String>,
    pub args: Vec<String>,
    pub status: BuildStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub analysis_type: String,
    pub recommendations: Vec<String>,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub id: String,
    pub analysis_type: String,
    pub recommendations: Vec<String>,
    pub score: f32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

pub trait ArtifactStore: Send + Sync {
    fn create_build(&self, build: NewBuild) -> StoreFuture<'_, BuildRecord>;
    fn get_build<'a>(&'a self, build_id: &'a str) -> StoreFuture<'a, Option<BuildRecord>>;
    fn list_builds(&self) -> StoreFuture<'_, Vec<BuildRecord>>;
    fn record_analysis(&self, analysis: NewAnalysis) -> StoreFuture<'_, AnalysisRecord>;
    fn get_analysis<'a>(&'a self, analysis_id: &'a str) -> StoreFuture<'a, Option<AnalysisRecord>>;
    fn list_analyses(&self) -> StoreFuture<'_, Vec<AnalysisRecord>>;
}
