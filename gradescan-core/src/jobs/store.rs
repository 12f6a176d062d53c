use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{error::GradescanError, grade::record::ProcessedGrade};

/// The outcome written back for one sheet: either the full grade list or
/// a failure message, never a partial mixture.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SheetResult {
    Completed { grades: Vec<ProcessedGrade> },
    Failed { error: String },
}

/// The persistence seam for processed sheets.
///
/// The pipeline's only contract with storage is "write this result when
/// done": one atomic write per job, so readers never observe a
/// partially-applied state. Schema, indexing, and everything else belong
/// to the collaborator behind this trait.
pub trait SheetStore: Send + Sync {
    fn write_result(
        &self,
        sheet_id: &str,
        result: SheetResult,
    ) -> BoxFuture<'_, Result<(), GradescanError>>;
}

/// In-memory store for tests and local runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    results: Arc<Mutex<HashMap<String, SheetResult>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn result_for(&self, sheet_id: &str) -> Option<SheetResult> {
        self.results.lock().await.get(sheet_id).cloned()
    }
}

impl SheetStore for MemoryStore {
    fn write_result(
        &self,
        sheet_id: &str,
        result: SheetResult,
    ) -> BoxFuture<'_, Result<(), GradescanError>> {
        let sheet_id = sheet_id.to_string();
        Box::pin(async move {
            self.results.lock().await.insert(sheet_id, result);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        store
            .write_result("sheet-1", SheetResult::Completed { grades: vec![] })
            .await
            .unwrap();

        assert_eq!(
            store.result_for("sheet-1").await,
            Some(SheetResult::Completed { grades: vec![] })
        );
        assert_eq!(store.result_for("sheet-2").await, None);
    }

    #[tokio::test]
    async fn test_later_write_supersedes_earlier() {
        let store = MemoryStore::new();
        store
            .write_result(
                "sheet-1",
                SheetResult::Failed {
                    error: "quota".to_string(),
                },
            )
            .await
            .unwrap();
        store
            .write_result("sheet-1", SheetResult::Completed { grades: vec![] })
            .await
            .unwrap();

        assert_eq!(
            store.result_for("sheet-1").await,
            Some(SheetResult::Completed { grades: vec![] })
        );
    }
}
