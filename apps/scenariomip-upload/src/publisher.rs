//! # Publisher
//!
//! Drives a [`DepositionService`] through one release:
//!
//! 1. resolve the latest version from any known deposition ID
//! 2. get or create the draft of that version
//! 3. replace the draft's metadata
//! 4. remove the files carried over from the previous version
//! 5. resolve the draft's bucket
//! 6. upload workbook, CSV and README, in that order
//! 7. publish, only when asked to
//!
//! The first failing step ends the run. Earlier steps are not undone, so a
//! failed upload can leave a draft with some of the new files; running again
//! is safe because steps 3 and 4 overwrite.

use crate::deposition::{DepositionError, DepositionId, DepositionService};
use scenariomip_core::{ArtifactSet, MetadataDocument};

/// Where the run ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    pub draft_id: DepositionId,
    pub published: bool,
}

impl PublishOutcome {
    /// Public record URL when published, draft preview URL otherwise.
    #[must_use]
    pub fn url(&self, domain: &str) -> String {
        let domain = domain.trim_end_matches('/');
        if self.published {
            format!("{domain}/records/{}", self.draft_id)
        } else {
            format!("{domain}/uploads/{}", self.draft_id)
        }
    }

    /// Line printed at the end of a successful run.
    #[must_use]
    pub fn message(&self, domain: &str) -> String {
        if self.published {
            format!("Published the new record at {}", self.url(domain))
        } else {
            format!("You can preview the draft upload at {}", self.url(domain))
        }
    }
}

/// Runs the release sequence against a borrowed service.
pub struct Publisher<'a, S: DepositionService + ?Sized> {
    service: &'a S,
}

impl<'a, S: DepositionService + ?Sized> Publisher<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Publish `artifacts` as a new version of the record containing `seed`.
    ///
    /// With `finalize == false` the draft is left open for review.
    pub async fn publish_artifacts(
        &self,
        seed: DepositionId,
        metadata: &MetadataDocument,
        artifacts: &ArtifactSet,
        finalize: bool,
    ) -> Result<PublishOutcome, DepositionError> {
        let latest = self.service.resolve_latest(seed).await?;
        let draft = self.service.get_or_create_draft(latest).await?;
        tracing::info!(%seed, %latest, %draft, "Working on draft");

        self.service.set_metadata(draft, metadata.as_json()).await?;
        self.service.clear_files(draft).await?;

        let bucket = self.service.resolve_bucket(draft).await?;
        for file in artifacts.upload_order() {
            self.service.upload(&bucket, file).await?;
        }

        if finalize {
            self.service.publish(draft).await?;
        } else {
            tracing::info!(%draft, "Leaving draft unpublished");
        }

        Ok(PublishOutcome {
            draft_id: draft,
            published: finalize,
        })
    }
}
