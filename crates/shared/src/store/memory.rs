use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    AnalysisRecord, ArtifactStore, BuildRecord, BuildStatus, NewAnalysis, NewBuild, StoreFuture,
};

/// In-memory store. Build and analysis IDs come from per-kind atomic
/// sequences, so concurrent creates cannot hand out the same ID.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    builds: RwLock<HashMap<String, BuildRecord>>,
    analyses: RwLock<HashMap<String, AnalysisRecord>>,
    build_seq: AtomicU64,
    analysis_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_build_id(&self) -> String {
        let seq = self.inner.build_seq.fetch_add(1, Ordering::Relaxed) + 1;
        format!("build_{seq}")
    }

    fn next_analysis_id(&self) -> String {
        let seq = self.inner.analysis_seq.fetch_add(1, Ordering::Relaxed) + 1;
        format!("analysis_{seq}")
    }
}

impl ArtifactStore for MemoryStore {
    fn create_build(&self, build: NewBuild) -> StoreFuture<'_, BuildRecord> {
        Box::pin(async move {
            let record = BuildRecord {
                id: self.next_build_id(),
                name: build.name,
                dockerfile: build.dockerfile,
                target: build.target,
                args: build.args,
                status: BuildStatus::Running,
                created_at: Utc::now(),
            };

            let mut builds = self.inner.builds.write().await;
            builds.insert(record.id.clone(), record.clone());
            Ok(record)
        })
    }

    fn get_build<'a>(&'a self, build_id: &'a str) -> StoreFuture<'a, Option<BuildRecord>> {
        Box::pin(async move {
            let builds = self.inner.builds.read().await;
            Ok(builds.get(build_id).cloned())
        })
    }

    fn list_builds(&self) -> StoreFuture<'_, Vec<BuildRecord>> {
        Box::pin(async move {
            let builds = self.inner.builds.read().await;
            let mut records: Vec<BuildRecord> = builds.values().cloned().collect();
            records.sort_by(|left, right| {
                left.created_at
                    .cmp(&right.created_at)
                    .then_with(|| left.id.cmp(&right.id))
            });
            Ok(records)
        })
    }

    fn record_analysis(&self, analysis: NewAnalysis) -> StoreFuture<'_, AnalysisRecord> {
        Box::pin(async move {
            let record = AnalysisRecord {
                id: self.next_analysis_id(),
                analysis_type: analysis.analysis_type,
                recommendations: analysis.recommendations,
                score: analysis.score,
                created_at: Utc::now(),
            };

            let mut analyses = self.inner.analyses.write().await;
            analyses.insert(record.id.clone(), record.clone());
            Ok(record)
        })
    }

    fn get_analysis<'a>(&'a self, analysis_id: &'a str) -> StoreFuture<'a, Option<AnalysisRecord>> {
        Box::pin(async move {
            let analyses = self.inner.analyses.read().await;
            Ok(analyses.get(analysis_id).cloned())
        })
    }

    fn list_analyses(&self) -> StoreFuture<'_, Vec<AnalysisRecord>> {
        Box::pin(async move {
            let analyses = self.inner.analyses.read().await;
            let mut records: Vec<AnalysisRecord> = analyses.values().cloned().collect();
            records.sort_by(|left, right| {
                left.created_at
                    .cmp(&right.created_at)
                    .then_with(|| left.id.cmp(&right.id))
            });
            Ok(records)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_named(name: &str) -> NewBuild {
        NewBuild {
            name: name.to_string(),
            dockerfile: "FROM alpine:3.20".to_string(),
            target: None,
            args: Vec::new(),
        }
    }

    #[tokio::test]
    async fn sequential_creates_produce_sequential_build_ids() {
        let store = MemoryStore::new();

        for expected in 1..=4_u64 {
            let record = store
                .create_build(build_named("seq"))
                .await
                .expect("create should succeed");
            assert_eq!(record.id, format!("build_{expected}"));
            assert_eq!(record.status, BuildStatus::Running);
        }
    }

    #[tokio::test]
    async fn missing_build_lookup_returns_none() {
        let store = MemoryStore::new();
        let found = store
            .get_build("build_0")
            .await
            .expect("lookup should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn stored_build_round_trips_by_id() {
        let store = MemoryStore::new();
        let created = store
            .create_build(NewBuild {
                name: "api".to_string(),
                dockerfile: "FROM rust:1.85".to_string(),
                target: Some("release".to_string()),
                args: vec!["--platform=linux/amd64".to_string()],
            })
            .await
            .expect("create should succeed");

        let fetched = store
            .get_build(&created.id)
            .await
            .expect("lookup should succeed")
            .expect("record should exist");
        assert_eq!(fetched.name, "api");
        assert_eq!(fetched.target.as_deref(), Some("release"));
        assert_eq!(fetched.args.len(), 1);
    }

    #[tokio::test]
    async fn list_builds_returns_records_in_creation_order() {
        let store = MemoryStore::new();
        store
            .create_build(build_named("first"))
            .await
            .expect("create should succeed");
        store
            .create_build(build_named("second"))
            .await
            .expect("create should succeed");

        let listed = store.list_builds().await.expect("list should succeed");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "build_1");
        assert_eq!(listed[1].id, "build_2");
    }

    #[tokio::test]
    async fn analysis_ids_use_their_own_sequence() {
        let store = MemoryStore::new();
        store
            .create_build(build_named("unrelated"))
            .await
            .expect("create should succeed");

        let record = store
            .record_analysis(NewAnalysis {
                analysis_type: "security".to_string(),
                recommendations: vec!["Run containers as non-root user".to_string()],
                score: 0.65,
            })
            .await
            .expect("record should succeed");
        assert_eq!(record.id, "analysis_1");

        let fetched = store
            .get_analysis("analysis_1")
            .await
            .expect("lookup should succeed")
            .expect("record should exist");
        assert_eq!(fetched.score, 0.65);

        let listed = store.list_analyses().await.expect("list should succeed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].analysis_type, "security");
    }
}
