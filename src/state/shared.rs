use std::sync::Arc;

use tokio::sync::Mutex;

use super::selection::SelectionState;
use super::session::{Intent, IntentOutcome, SetupSession};
use super::store::SessionStore;
use crate::error::Result;
use crate::platform::OperatingSystem;
use crate::script::ScriptResult;
use crate::tools::{Tool, ToolCommands};

/// Async handle to a session. Every call holds one exclusive lock over the
/// catalog and selection for its whole duration.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SetupSession>>,
}

impl SharedSession {
    pub fn new(session: SetupSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn apply(&self, intent: Intent) -> Result<IntentOutcome> {
        self.inner.lock().await.apply(intent)
    }

    pub async fn select_os(&self, os: OperatingSystem) {
        self.inner.lock().await.select_os(os);
    }

    pub async fn toggle_tool(&self, id: &str) -> SelectionState {
        self.inner.lock().await.toggle_tool(id)
    }

    pub async fn add_custom_tool(&self, name: &str, commands: ToolCommands) -> Result<Tool> {
        self.inner.lock().await.add_custom_tool(name, commands)
    }

    pub async fn request_script(&self) -> Result<ScriptResult> {
        self.inner.lock().await.generate()
    }

    pub async fn active_os(&self) -> OperatingSystem {
        self.inner.lock().await.active_os()
    }

    pub async fn selected(&self) -> Vec<String> {
        self.inner.lock().await.selection().members().to_vec()
    }

    pub async fn save(&self, store: &dyn SessionStore, key: &str) -> Result<()> {
        let snapshot = self.inner.lock().await.snapshot();
        store.save(key, &snapshot).await
    }

    /// Runs `f` with exclusive access, for multi-step updates that must not
    /// interleave with other callers.
    pub async fn with_session<R>(&self, f: impl FnOnce(&mut SetupSession) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}
