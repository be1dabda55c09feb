//! In-process publish/subscribe of lifecycle events.
//!
//! Every subscriber owns a dedicated task that handles its events
//! one after another. Handlers may block, they run on the blocking
//! thread pool of the runtime.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use hc_core::{
    entities::Id,
    events::{EventKind, LifecycleEvent},
};
use parking_lot::{Mutex, RwLock};
use tokio::{
    runtime::Handle,
    sync::{mpsc, Notify},
};

/// Handlers must be idempotent, delivery is at-least-once.
pub trait EventHandler: Send + Sync + 'static {
    fn handle_event(&self, event: &LifecycleEvent);
}

struct Subscriber {
    name: String,
    tx: mpsc::UnboundedSender<LifecycleEvent>,
}

#[derive(Default)]
struct Pending {
    count: AtomicUsize,
    idle: Notify,
}

impl Pending {
    fn start(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    fn done(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }

    async fn wait(&self) {
        loop {
            let mut notified = std::pin::pin!(self.idle.notified());
            notified.as_mut().enable();
            if self.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

type CoalescingKey = (EventKind, Id);

struct Inner {
    runtime: Handle,
    subscribers: RwLock<Vec<Subscriber>>,
    delayed: Mutex<HashMap<CoalescingKey, LifecycleEvent>>,
    pending: Arc<Pending>,
}

#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl EventBus {
    pub fn new(runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                runtime,
                subscribers: Default::default(),
                delayed: Default::default(),
                pending: Default::default(),
            }),
        }
    }

    pub fn subscribe(&self, name: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let name = name.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<LifecycleEvent>();
        let pending = Arc::clone(&self.inner.pending);
        let task_name = name.clone();
        self.inner.runtime.spawn(async move {
            while let Some(event) = rx.recv().await {
                let handler = Arc::clone(&handler);
                let kind = event.kind();
                let res = tokio::task::spawn_blocking(move || handler.handle_event(&event)).await;
                if let Err(err) = res {
                    log::error!(
                        "Subscriber {task_name} failed to handle {} event: {err}",
                        kind.as_ref()
                    );
                }
                pending.done();
            }
            log::debug!("Subscriber {task_name} stopped");
        });
        log::debug!("Subscribed {name}");
        self.inner.subscribers.write().push(Subscriber { name, tx });
    }

    /// Delivers the event to all subscribers without waiting for them.
    pub fn publish(&self, event: LifecycleEvent) {
        self.inner.publish(event);
    }

    /// Delivers the event after the delay.
    ///
    /// Events of the same kind and entity that are published
    /// within the delay are coalesced into a single delivery
    /// (see [`LifecycleEvent::coalesce`]).
    pub fn publish_delayed(&self, event: LifecycleEvent, delay: Duration) {
        if delay.is_zero() {
            self.inner.publish(event);
            return;
        }
        let key = (event.kind(), event.entity_id());
        {
            let mut delayed = self.inner.delayed.lock();
            if let Some(scheduled) = delayed.remove(&key) {
                log::debug!(
                    "Coalescing {} event for {}",
                    key.0.as_ref(),
                    key.1
                );
                delayed.insert(key, scheduled.coalesce(event));
                return;
            }
            delayed.insert(key, event);
        }
        self.inner.pending.start();
        let inner = Arc::clone(&self.inner);
        self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let event = inner.delayed.lock().remove(&key);
            if let Some(event) = event {
                inner.publish(event);
            }
            inner.pending.done();
        });
    }

    /// Waits until all published and delayed events have been handled.
    pub async fn wait_idle(&self) {
        self.inner.pending.wait().await;
    }
}

impl Inner {
    fn publish(&self, event: LifecycleEvent) {
        let subscribers = self.subscribers.read();
        for subscriber in subscribers.iter() {
            self.pending.start();
            if subscriber.tx.send(event.clone()).is_err() {
                log::warn!("Subscriber {} is gone", subscriber.name);
                self.pending.done();
            }
        }
    }
}
