//! Current-report store for dynreport.
//!
//! A [`ReportStore`] is an explicitly constructed context object holding the
//! report currently on display. Publishing replaces the document wholesale
//! and notifies every subscriber synchronously before returning; the only
//! partial update is [`ReportStore::update_chart`].
//!
//! Cloning a store yields another handle to the same state, so a single
//! store created at session start can be handed to every consumer.
//!
//! # Example
//!
//! ```
//! use dr_common::ReportDocument;
//! use dr_store::ReportStore;
//!
//! let store = ReportStore::new();
//! let subscription = store.subscribe(|doc| println!("now showing {}", doc.title));
//! store.publish(ReportDocument::new("Q4 2024 Sales Performance Report"));
//! drop(subscription);
//! ```

use dr_common::{ChartSpec, ReportDocument};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;

type Callback = Arc<dyn Fn(&Arc<ReportDocument>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    current: Option<Arc<ReportDocument>>,
    subscribers: Vec<(u64, Callback)>,
    next_id: u64,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared holder of the current report.
#[derive(Clone, Default)]
pub struct ReportStore {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for ReportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("ReportStore")
            .field("current", &inner.current.as_ref().map(|d| d.title.as_str()))
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl ReportStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current document, if one has been published.
    pub fn current(&self) -> Option<Arc<ReportDocument>> {
        lock(&self.inner).current.clone()
    }

    /// Replace the current document and notify all subscribers.
    pub fn publish(&self, document: ReportDocument) {
        let document = Arc::new(document);
        let callbacks = Self::swap(&mut lock(&self.inner), Arc::clone(&document));
        Self::notify(&document, callbacks);
    }

    /// Replace one chart of the current document and republish it.
    ///
    /// Returns `false` without notifying anyone when there is no current
    /// document or the section/chart id is not found. The patch and the swap
    /// happen under one lock, so a concurrent publish is never overwritten by
    /// a stale copy.
    pub fn update_chart(&self, section_id: &str, chart_id: &str, chart: ChartSpec) -> bool {
        let (document, callbacks) = {
            let mut inner = lock(&self.inner);
            let Some(current) = inner.current.as_ref() else {
                debug!(section_id, chart_id, "update_chart ignored: no current report");
                return false;
            };
            let exists = current
                .find_section(section_id)
                .and_then(|s| s.find_chart(chart_id))
                .is_some();
            if !exists {
                debug!(section_id, chart_id, "update_chart ignored: chart not found");
                return false;
            }

            let mut doc = ReportDocument::clone(current);
            let replaced = doc
                .find_section_mut(section_id)
                .map(|s| s.replace_chart(chart_id, chart))
                .unwrap_or(false);
            if !replaced {
                return false;
            }
            let doc = Arc::new(doc);
            let callbacks = Self::swap(&mut inner, Arc::clone(&doc));
            (doc, callbacks)
        };

        Self::notify(&document, callbacks);
        true
    }

    /// Register a callback invoked on every subsequent publish.
    ///
    /// The callback is released when the returned handle is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<ReportDocument>) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        debug!(subscriber = id, total = inner.subscribers.len(), "subscriber added");
        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }

    /// Install `document` as current and snapshot the subscribers.
    fn swap(inner: &mut Inner, document: Arc<ReportDocument>) -> Vec<Callback> {
        inner.current = Some(document);
        inner.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }

    // Callbacks run without the lock so they may read or publish again.
    fn notify(document: &Arc<ReportDocument>, callbacks: Vec<Callback>) {
        debug!(
            title = %document.title,
            sections = document.sections.len(),
            subscribers = callbacks.len(),
            "report published"
        );
        for callback in callbacks {
            callback(document);
        }
    }
}

/// Handle to a store subscription; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<Mutex<Inner>>,
    id: u64,
}

impl Subscription {
    /// Release the subscription explicitly.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            lock(&inner).subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dr_common::{ChartKind, Section, Series};
    use serde_json::json;

    fn chart(id: &str, y: f64) -> ChartSpec {
        ChartSpec::new(id, id.to_uppercase(), ChartKind::Line)
            .with_series(Series::xy("S", vec![json!(1)], vec![json!(y)]))
    }

    fn doc_a() -> ReportDocument {
        ReportDocument::new("Report A")
            .with_section(
                Section::new("overview", "Overview", 1)
                    .with_chart(chart("trend", 1.0))
                    .with_chart(chart("share", 2.0)),
            )
            .with_section(Section::new("detail", "Detail", 2).with_chart(chart("detail-chart", 3.0)))
    }

    fn recorder(store: &ReportStore) -> (Subscription, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(move |doc| sink.lock().unwrap().push(doc.title.clone()));
        (sub, seen)
    }

    #[test]
    fn test_starts_empty() {
        let store = ReportStore::new();
        assert!(store.current().is_none());
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_notifies_synchronously() {
        let store = ReportStore::new();
        let (_sub, seen) = recorder(&store);
        store.publish(doc_a());
        assert_eq!(*seen.lock().unwrap(), vec!["Report A"]);
        assert_eq!(store.current().unwrap().title, "Report A");

        store.publish(ReportDocument::new("Report B"));
        assert_eq!(*seen.lock().unwrap(), vec!["Report A", "Report B"]);
    }

    #[test]
    fn test_late_subscriber_sees_only_later_publishes() {
        let store = ReportStore::new();
        store.publish(doc_a());
        let (_sub, seen) = recorder(&store);
        assert!(seen.lock().unwrap().is_empty());
        store.publish(ReportDocument::new("Report B"));
        assert_eq!(*seen.lock().unwrap(), vec!["Report B"]);
    }

    #[test]
    fn test_update_chart_replaces_only_that_chart() {
        let store = ReportStore::new();
        store.publish(doc_a());
        let before = store.current().unwrap();
        let (_sub, seen) = recorder(&store);

        assert!(store.update_chart("overview", "share", chart("share", 99.0)));
        assert_eq!(seen.lock().unwrap().len(), 1);

        let after = store.current().unwrap();
        let mut expected = (*before).clone();
        expected.sections[0].charts.as_mut().unwrap()[1] = chart("share", 99.0);
        assert_eq!(*after, expected);
        assert_eq!(after.sections[1], before.sections[1]);
        assert_eq!(after.sections[0].charts()[0], before.sections[0].charts()[0]);
    }

    #[test]
    fn test_update_chart_unknown_ids_are_noops() {
        let store = ReportStore::new();
        assert!(!store.update_chart("overview", "trend", chart("trend", 5.0)));

        store.publish(doc_a());
        let (_sub, seen) = recorder(&store);
        assert!(!store.update_chart("missing", "trend", chart("trend", 5.0)));
        assert!(!store.update_chart("overview", "missing", chart("missing", 5.0)));
        assert!(!store.update_chart("detail", "trend", chart("trend", 5.0)));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(*store.current().unwrap(), doc_a());
    }

    #[test]
    fn test_dropping_subscription_stops_notifications() {
        let store = ReportStore::new();
        let (sub, seen) = recorder(&store);
        let (other, _) = recorder(&store);
        assert_eq!(store.subscriber_count(), 2);

        sub.unsubscribe();
        drop(other);
        assert_eq!(store.subscriber_count(), 0);
        store.publish(doc_a());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_callback_can_read_store() {
        let store = ReportStore::new();
        let reader = store.clone();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |_| {
            *sink.lock().unwrap() = reader.current().map(|d| d.sections.len());
        });
        store.publish(doc_a());
        assert_eq!(*seen.lock().unwrap(), Some(2));
    }

    #[test]
    fn test_concurrent_update_never_restores_older_publish() {
        let titled = |n: u32| {
            let mut doc = doc_a();
            doc.title = n.to_string();
            doc
        };
        let store = ReportStore::new();
        store.publish(titled(0));

        let updater = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..2_000 {
                    store.update_chart("overview", "share", chart("share", f64::from(i)));
                }
            })
        };
        for i in 1..2_000u32 {
            store.publish(titled(i));
            let title: u32 = store.current().unwrap().title.parse().unwrap();
            assert!(title >= i, "publish {i} was overwritten by {title}");
        }
        updater.join().unwrap();
    }

    #[test]
    fn test_subscription_outlives_store() {
        let store = ReportStore::new();
        let (sub, _) = recorder(&store);
        drop(store);
        drop(sub);
    }
}
