//! # In-Memory Deposition
//!
//! A single record's version chain held in process, behaving like Zenodo
//! for the operations the publisher uses:
//! - a new draft starts with a copy of the latest version's files
//! - metadata must be an object with a `metadata` key
//! - publishing turns the draft into the latest version
//!
//! Every call is recorded so tests can assert the exact sequence.

use super::{BucketLocation, DepositionError, DepositionId, DepositionService, remote_file_name};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositionCall {
    ResolveLatest(DepositionId),
    GetOrCreateDraft(DepositionId),
    SetMetadata(DepositionId),
    ClearFiles(DepositionId),
    ResolveBucket(DepositionId),
    Upload(String),
    Publish(DepositionId),
}

/// The editable draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftState {
    pub id: DepositionId,
    pub metadata: Option<Value>,
    pub files: BTreeMap<String, Vec<u8>>,
}

#[derive(Debug)]
struct Chain {
    published: Vec<DepositionId>,
    latest_files: BTreeMap<String, Vec<u8>>,
    latest_metadata: Option<Value>,
    draft: Option<DraftState>,
    next_id: u64,
    locked: bool,
    calls: Vec<DepositionCall>,
}

/// In-process deposition service.
#[derive(Debug)]
pub struct InMemoryDeposition {
    chain: Mutex<Chain>,
}

impl InMemoryDeposition {
    /// A record whose published versions are `versions`, oldest first.
    ///
    /// New drafts get IDs above the highest published one.
    pub fn with_versions(versions: &[u64]) -> Self {
        let next_id = versions.iter().max().copied().unwrap_or(0) + 1;
        Self {
            chain: Mutex::new(Chain {
                published: versions.iter().copied().map(DepositionId).collect(),
                latest_files: BTreeMap::new(),
                latest_metadata: None,
                draft: None,
                next_id,
                locked: false,
                calls: Vec::new(),
            }),
        }
    }

    /// Give the latest version these files (empty content).
    #[must_use]
    pub fn with_latest_files(self, names: &[&str]) -> Self {
        {
            let mut chain = self.lock();
            for name in names {
                chain.latest_files.insert((*name).to_string(), Vec::new());
            }
        }
        self
    }

    /// Start with an open draft of the latest version.
    #[must_use]
    pub fn with_open_draft(self, id: u64) -> Self {
        {
            let mut chain = self.lock();
            let files = chain.latest_files.clone();
            chain.draft = Some(DraftState {
                id: DepositionId(id),
                metadata: None,
                files,
            });
            chain.next_id = chain.next_id.max(id + 1);
        }
        self
    }

    /// Refuse to open new drafts, as a locked record would.
    #[must_use]
    pub fn locked(self) -> Self {
        self.lock().locked = true;
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<DepositionCall> {
        self.lock().calls.clone()
    }

    /// Current draft, if one is open.
    pub fn draft(&self) -> Option<DraftState> {
        self.lock().draft.clone()
    }

    /// Latest published version.
    pub fn latest(&self) -> Option<DepositionId> {
        self.lock().published.last().copied()
    }

    /// File names of the latest published version.
    pub fn latest_file_names(&self) -> Vec<String> {
        self.lock().latest_files.keys().cloned().collect()
    }

    /// Metadata of the latest published version.
    pub fn latest_metadata(&self) -> Option<Value> {
        self.lock().latest_metadata.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Chain> {
        self.chain.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn bucket_for(id: DepositionId) -> BucketLocation {
        BucketLocation(format!("memory://bucket/{id}"))
    }
}

impl Chain {
    fn record(&mut self, call: DepositionCall) {
        self.calls.push(call);
    }

    fn open_draft(&mut self, id: DepositionId) -> Result<&mut DraftState, DepositionError> {
        match self.draft.as_mut() {
            Some(draft) if draft.id == id => Ok(draft),
            _ => Err(DepositionError::NotFound(format!("draft {id}"))),
        }
    }
}

#[async_trait]
impl DepositionService for InMemoryDeposition {
    async fn resolve_latest(&self, any: DepositionId) -> Result<DepositionId, DepositionError> {
        let mut chain = self.lock();
        chain.record(DepositionCall::ResolveLatest(any));

        let known = chain.published.contains(&any)
            || chain.draft.as_ref().is_some_and(|d| d.id == any);
        match chain.published.last() {
            Some(latest) if known => Ok(*latest),
            _ => Err(DepositionError::NotFound(format!("deposition {any}"))),
        }
    }

    async fn get_or_create_draft(
        &self,
        latest: DepositionId,
    ) -> Result<DepositionId, DepositionError> {
        let mut chain = self.lock();
        chain.record(DepositionCall::GetOrCreateDraft(latest));

        if chain.published.last() != Some(&latest) {
            return Err(DepositionError::NotFound(format!("deposition {latest}")));
        }
        if let Some(draft) = &chain.draft {
            return Ok(draft.id);
        }
        if chain.locked {
            return Err(DepositionError::Conflict(format!(
                "deposition {latest} is locked"
            )));
        }

        let id = DepositionId(chain.next_id);
        chain.next_id += 1;
        let files = chain.latest_files.clone();
        chain.draft = Some(DraftState {
            id,
            metadata: None,
            files,
        });
        Ok(id)
    }

    async fn set_metadata(
        &self,
        draft: DepositionId,
        metadata: &Value,
    ) -> Result<(), DepositionError> {
        let mut chain = self.lock();
        chain.record(DepositionCall::SetMetadata(draft));

        if !metadata.get("metadata").is_some_and(Value::is_object) {
            return Err(DepositionError::Validation(
                "body must contain a `metadata` object".to_string(),
            ));
        }
        chain.open_draft(draft)?.metadata = Some(metadata.clone());
        Ok(())
    }

    async fn clear_files(&self, draft: DepositionId) -> Result<(), DepositionError> {
        let mut chain = self.lock();
        chain.record(DepositionCall::ClearFiles(draft));
        chain.open_draft(draft)?.files.clear();
        Ok(())
    }

    async fn resolve_bucket(&self, draft: DepositionId) -> Result<BucketLocation, DepositionError> {
        let mut chain = self.lock();
        chain.record(DepositionCall::ResolveBucket(draft));
        chain.open_draft(draft)?;
        Ok(Self::bucket_for(draft))
    }

    async fn upload(&self, bucket: &BucketLocation, file: &Path) -> Result<(), DepositionError> {
        let name = remote_file_name(file)?;
        let bytes = tokio::fs::read(file).await?;

        let mut chain = self.lock();
        chain.record(DepositionCall::Upload(name.clone()));
        match chain.draft.as_mut() {
            Some(draft) if Self::bucket_for(draft.id) == *bucket => {
                draft.files.insert(name, bytes);
                Ok(())
            }
            _ => Err(DepositionError::NotFound(format!(
                "bucket {}",
                bucket.as_str()
            ))),
        }
    }

    async fn publish(&self, draft: DepositionId) -> Result<(), DepositionError> {
        let mut chain = self.lock();
        chain.record(DepositionCall::Publish(draft));

        let state = chain.open_draft(draft)?.clone();
        if state.metadata.is_none() {
            return Err(DepositionError::Validation(format!(
                "draft {draft} has no metadata"
            )));
        }
        chain.published.push(state.id);
        chain.latest_files = state.files;
        chain.latest_metadata = state.metadata;
        chain.draft = None;
        Ok(())
    }
}
