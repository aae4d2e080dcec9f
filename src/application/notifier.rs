//! Single-slot, self-dismissing user feedback

use crate::domain::{Notification, NotificationKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct Inner {
    tx: watch::Sender<Option<Notification>>,
    delay: Duration,
    generation: AtomicU64,
    dismissal: Mutex<Option<JoinHandle<()>>>,
}

/// Holds at most one visible notification. The newest `show` wins and
/// restarts the dismissal timer.
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new(delay: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Notifier {
            inner: Arc::new(Inner {
                tx,
                delay,
                generation: AtomicU64::new(0),
                dismissal: Mutex::new(None),
            }),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification {
            message: message.into(),
            kind,
        };
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.tx.send_replace(Some(notification));

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let delay = self.inner.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.tx.send_if_modified(|slot| {
                    if inner.generation.load(Ordering::SeqCst) == generation && slot.is_some() {
                        *slot = None;
                        true
                    } else {
                        false
                    }
                });
            }
        });

        let mut dismissal = self
            .inner
            .dismissal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = dismissal.replace(handle) {
            previous.abort();
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    /// The visible notification, if any
    pub fn current(&self) -> Option<Notification> {
        self.inner.tx.borrow().clone()
    }

    /// Observe notifications as they appear and disappear
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.tx.subscribe()
    }
}
