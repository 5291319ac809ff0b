//! Cache-aside content resolution with keyed generation dedup.
//!
//! The resolver reads the three content fields for a key, returns them
//! verbatim when complete, and otherwise funnels all concurrent callers for
//! that key through one shared generation. Generation runs on a detached
//! task: a caller that navigates away does not cancel the work, and the
//! cache is still populated for everyone else.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};

use localpages_core::{
    ContentBundle, ContentField, ContentGenerator, ContentKey, ContentStore, GenerationError,
};

use crate::fallback::fallback_bundle;

/// Provenance of a resolved bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// All three fields were already cached.
    Cache,
    /// The bundle came from a generation this resolution participated in.
    Generated,
    /// Generation failed; the bundle is the deterministic fallback.
    Fallback,
}

/// Result of one resolution, with provenance.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub key: ContentKey,
    pub bundle: ContentBundle,
    pub source: ContentSource,
}

type GenerationOutcome = Result<ContentBundle, GenerationError>;

/// One shared in-flight generation.
///
/// The epoch identifies which registry entry a receiver belongs to, so a
/// dead channel evicts exactly its own entry and never a successor's.
#[derive(Clone)]
struct Inflight {
    epoch: u64,
    rx: watch::Receiver<Option<GenerationOutcome>>,
}

/// Resolves page content for (location, service) keys.
///
/// Never fails outward: every error path degrades to the fallback bundle.
pub struct PageContentResolver {
    store: Arc<dyn ContentStore>,
    generator: Arc<dyn ContentGenerator>,
    inflight: Arc<Mutex<HashMap<ContentKey, Inflight>>>,
    epoch: AtomicU64,
}

impl PageContentResolver {
    /// Create a resolver over the given cache store and generator.
    pub fn new(store: Arc<dyn ContentStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            store,
            generator,
            inflight: Arc::new(Mutex::new(HashMap::new())),
            epoch: AtomicU64::new(0),
        }
    }

    /// Resolve the content bundle for raw route input.
    pub async fn resolve(&self, raw_location: &str, raw_service: &str) -> ContentBundle {
        self.resolve_detailed(raw_location, raw_service).await.bundle
    }

    /// Resolve with provenance attached.
    pub async fn resolve_detailed(&self, raw_location: &str, raw_service: &str) -> Resolution {
        let key = ContentKey::normalize(raw_location, raw_service);

        if let Some(bundle) = self.read_cached(&key).await {
            tracing::debug!(key = %key, "cache hit");
            return Resolution { key, bundle, source: ContentSource::Cache };
        }

        match self.generate_shared(&key).await {
            Ok(bundle) => {
                tracing::debug!(key = %key, "content generated");
                Resolution { key, bundle, source: ContentSource::Generated }
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "generation failed; serving fallback content");
                let bundle = fallback_bundle(&key);
                Resolution { key, bundle, source: ContentSource::Fallback }
            }
        }
    }

    /// Whether a generation for this key is currently in flight.
    ///
    /// Transient status for callers that want to surface an in-progress
    /// indicator; resolution itself never requires polling this.
    pub async fn is_generating(&self, raw_location: &str, raw_service: &str) -> bool {
        let key = ContentKey::normalize(raw_location, raw_service);
        self.inflight.lock().await.contains_key(&key)
    }

    /// Assemble the bundle from the cache, or `None` if any field is absent.
    ///
    /// Field reads are independent and issued concurrently. Cached values
    /// are returned verbatim.
    async fn read_cached(&self, key: &ContentKey) -> Option<ContentBundle> {
        let (title, description, main_content) = tokio::join!(
            self.read_field(key, ContentField::MetaTitle),
            self.read_field(key, ContentField::MetaDescription),
            self.read_field(key, ContentField::MainContent),
        );

        Some(ContentBundle { title: title?, description: description?, main_content: main_content? })
    }

    /// Read one field, treating an unavailable store as a miss for that
    /// field.
    async fn read_field(&self, key: &ContentKey, field: ContentField) -> Option<String> {
        match self.store.get(key, field).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key, field = %field, error = %err, "cache read failed; treating as miss");
                None
            }
        }
    }

    /// Await the outcome of the single in-flight generation for `key`,
    /// spawning it if this caller is first.
    async fn generate_shared(&self, key: &ContentKey) -> GenerationOutcome {
        let inflight = self.join_or_spawn(key).await;
        let mut rx = inflight.rx.clone();

        loop {
            let published = rx.borrow_and_update().clone();
            if let Some(outcome) = published {
                return outcome;
            }

            if rx.changed().await.is_err() {
                // The generation task died without publishing. Evict the
                // entry (if it is still ours) so the key isn't wedged.
                let mut registry = self.inflight.lock().await;
                if registry.get(key).is_some_and(|current| current.epoch == inflight.epoch) {
                    registry.remove(key);
                }
                return Err(GenerationError::Interrupted);
            }
        }
    }

    /// Atomically join the existing generation slot for `key` or register a
    /// new one. Exactly one caller spawns the generation task.
    async fn join_or_spawn(&self, key: &ContentKey) -> Inflight {
        let mut registry = self.inflight.lock().await;
        if let Some(existing) = registry.get(key) {
            return existing.clone();
        }

        let (tx, rx) = watch::channel(None);
        let entry = Inflight { epoch: self.epoch.fetch_add(1, Ordering::Relaxed), rx };
        registry.insert(key.clone(), entry.clone());

        let generator = Arc::clone(&self.generator);
        let inflight = Arc::clone(&self.inflight);
        let key = key.clone();

        // Detached task: an abandoned caller must not cancel the shared
        // generation. The entry is removed before the outcome is published;
        // watch retains the value for receivers handed out earlier.
        tokio::spawn(async move {
            let outcome = generator.generate(&key).await;
            inflight.lock().await.remove(&key);
            let _ = tx.send(Some(outcome));
        });

        entry
    }
}
