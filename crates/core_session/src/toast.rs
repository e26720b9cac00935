use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use uuid::Uuid;

pub type ToastId = Uuid;

/// How long a toast stays up before dismissing itself.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
}

struct ToastEntry {
    toast: Toast,
    timer: Option<JoinHandle<()>>,
}

/// Transient notifications. Each toast schedules its own dismissal on the
/// current tokio runtime; without a runtime it stays until dismissed.
#[derive(Clone)]
pub struct ToastCenter {
    entries: Arc<Mutex<Vec<ToastEntry>>>,
    ttl: Duration,
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::with_ttl(TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Error)
    }

    pub fn push(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        };
        let id = toast.id;
        debug!(%id, ?kind, "toast shown");

        // The lock is held while the timer is spawned so the timer can never
        // observe the list before its entry is in it.
        let mut entries = self.entries.lock();
        let timer = self.schedule_expiry(id);
        entries.push(ToastEntry { toast, timer });
        id
    }

    /// Removes a toast before its timer fires. Returns whether it was present.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let removed = {
            let mut entries = self.entries.lock();
            let position = entries.iter().position(|entry| entry.toast.id == id);
            position.map(|index| entries.remove(index))
        };
        match removed {
            Some(entry) => {
                if let Some(timer) = entry.timer {
                    timer.abort();
                }
                debug!(%id, "toast dismissed");
                true
            }
            None => false,
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.toast.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn schedule_expiry(&self, id: ToastId) -> Option<JoinHandle<()>> {
        let handle = Handle::try_current().ok()?;
        let entries = Arc::clone(&self.entries);
        let ttl = self.ttl;
        Some(handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            entries.lock().retain(|entry| entry.toast.id != id);
            trace!(%id, "toast expired");
        }))
    }
}
