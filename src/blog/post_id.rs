//! Persistent post IDs.
//!
//! IDs are monotonic and stable across builds. The counter state is read from
//! an [`IdStore`] once when a build starts and written back once when it ends.
//!
//! ```json
//! { "nextId": 4, "assigned": { "first.md": 1, "second.md": 2, "third.md": 3 } }
//! ```

use super::post::Post;
use crate::content::frontmatter::get_u64;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Frontmatter key for a pinned ID
const POST_ID_KEY: &str = "postId";

// ============================================================================
// State & Stores
// ============================================================================

/// Serialized counter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdState {
    pub next_id: u64,
    /// Post key (relative path) → ID
    #[serde(default)]
    pub assigned: BTreeMap<String, u64>,
}

impl Default for PostIdState {
    fn default() -> Self {
        Self {
            next_id: 1,
            assigned: BTreeMap::new(),
        }
    }
}

/// Where counter state lives between builds.
pub trait IdStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<PostIdState>>;
    fn save(&self, state: &PostIdState) -> Result<()>;
}

/// JSON file store (default `.quire/post-ids.json`).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdStore for JsonFileStore {
    fn load(&self) -> Result<Option<PostIdState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read post IDs from {}", self.path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("Malformed post ID file {}", self.path.display()))?;
        Ok(Some(state))
    }

    fn save(&self, state: &PostIdState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write post IDs to {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<PostIdState>>,
}

impl MemoryStore {
    pub fn with_state(state: PostIdState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// Last saved state.
    pub fn snapshot(&self) -> Option<PostIdState> {
        self.state.lock().ok().and_then(|s| s.clone())
    }
}

impl IdStore for MemoryStore {
    fn load(&self) -> Result<Option<PostIdState>> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &PostIdState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("post ID store lock poisoned"))?;
        *guard = Some(state.clone());
        Ok(())
    }
}

// ============================================================================
// Counter
// ============================================================================

/// Post ID counter scoped to one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostIdCounter {
    state: PostIdState,
}

impl PostIdCounter {
    /// Read state from `store`; an empty store starts at ID 1.
    pub fn load(store: &dyn IdStore) -> Result<Self> {
        let state = store.load()?.unwrap_or_default();
        Ok(Self { state })
    }

    /// ID for `key`.
    ///
    /// An explicit ID wins and moves `next_id` past it. Otherwise a key seen
    /// before keeps its ID, and a new key takes `next_id`.
    pub fn assign(&mut self, key: &str, explicit: Option<u64>) -> u64 {
        let state = &mut self.state;

        if let Some(id) = explicit.filter(|&id| id > 0) {
            state.assigned.insert(key.to_owned(), id);
            state.next_id = state.next_id.max(id + 1);
            return id;
        }

        if let Some(&id) = state.assigned.get(key) {
            return id;
        }

        let id = state.next_id;
        state.next_id += 1;
        state.assigned.insert(key.to_owned(), id);
        id
    }

    pub fn next_id(&self) -> u64 {
        self.state.next_id
    }

    /// Write state back to `store`.
    pub fn persist(&self, store: &dyn IdStore) -> Result<()> {
        store.save(&self.state)
    }
}

/// Assign IDs to every post, oldest first, so new posts number in publication order.
///
/// Key is the post's relative path. Drafts get IDs too.
pub fn assign_ids(posts: &mut [Post], counter: &mut PostIdCounter) {
    let mut order: Vec<usize> = (0..posts.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&posts[a], &posts[b]);
        a.date
            .cmp(&b.date)
            .then_with(|| a.created.cmp(&b.created))
            .then_with(|| a.path.cmp(&b.path))
    });

    for i in order {
        let post = &mut posts[i];
        let explicit = get_u64(&post.frontmatter, POST_ID_KEY);
        post.id = Some(counter.assign(&post.path, explicit));
    }
}

// ============================================================================
// Tests
// ============================================================================
