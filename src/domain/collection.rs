//! Dashboard items and the refreshable collection that owns them

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::error::FetchError;
use super::observe::Observable;

/// One dashboard card. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display string, already formatted (`$12,450`)
    pub value: String,
    /// Display token (`#4CAF50`)
    pub color: String,
}

impl DashboardItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            value: value.into(),
            color: color.into(),
        }
    }
}

/// Opaque asynchronous provider of dashboard batches
#[async_trait::async_trait]
pub trait DashboardSource: Send + Sync + 'static {
    async fn fetch_batch(&self) -> Result<Vec<DashboardItem>, FetchError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSnapshot {
    pub items: Vec<DashboardItem>,
    pub is_refreshing: bool,
    /// Error of the most recent settlement, cleared by the next success
    pub last_error: Option<FetchError>,
    /// Completion time of the last successful load
    pub loaded_at: Option<DateTime<Local>>,
}

/// Identifies one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// How a settlement was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The batch replaced the items
    Replaced { count: usize },
    /// The fetch failed; the previous items were kept
    Failed(FetchError),
    /// The ticket was not the one in flight
    Stale,
    /// A load was already in flight; no new fetch was started
    Coalesced,
}

/// Items plus the refreshing flag.
///
/// At most one load is in flight: `begin_load` while one is outstanding
/// coalesces into it. `is_refreshing` is set before `begin_load` returns and
/// cleared by `settle` or `abandon`, whichever comes first.
#[derive(Debug, Default)]
pub struct RefreshableCollection {
    state: Observable<CollectionSnapshot>,
    in_flight: Option<LoadTicket>,
    next_ticket: u64,
}

impl RefreshableCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<DashboardItem> {
        self.state.borrow().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn item(&self, index: usize) -> Option<DashboardItem> {
        self.state.borrow().items.get(index).cloned()
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.borrow().is_refreshing
    }

    pub fn in_flight(&self) -> Option<LoadTicket> {
        self.in_flight
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<CollectionSnapshot> {
        self.state.subscribe()
    }

    /// Start a load. Returns `None` when one is already in flight.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if let Some(current) = self.in_flight {
            debug!(ticket = current.id(), "refresh coalesced into in-flight load");
            return None;
        }
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.state.update(|state| {
            state.is_refreshing = true;
            true
        });
        debug!(ticket = ticket.id(), "dashboard load started");
        Some(ticket)
    }

    /// Apply the outcome of the load identified by `ticket`
    pub fn settle(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<DashboardItem>, FetchError>,
    ) -> Settlement {
        if self.in_flight != Some(ticket) {
            debug!(ticket = ticket.id(), "dropping stale settlement");
            return Settlement::Stale;
        }
        self.in_flight = None;

        let settlement = match &outcome {
            Ok(items) => Settlement::Replaced { count: items.len() },
            Err(err) => Settlement::Failed(err.clone()),
        };

        self.state.update(|state| {
            match outcome {
                Ok(items) => {
                    state.items = items;
                    state.last_error = None;
                    state.loaded_at = Some(Local::now());
                }
                Err(err) => state.last_error = Some(err),
            }
            state.is_refreshing = false;
            true
        });

        match &settlement {
            Settlement::Replaced { count } => info!(ticket = ticket.id(), count, "dashboard loaded"),
            Settlement::Failed(err) => warn!(ticket = ticket.id(), %err, "dashboard load failed"),
            _ => {}
        }
        settlement
    }

    /// Give up on an in-flight load without an outcome (worker unreachable,
    /// caller cancelled). Items are kept.
    pub fn abandon(&mut self, ticket: LoadTicket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        self.state.update(|state| {
            state.is_refreshing = false;
            true
        });
        debug!(ticket = ticket.id(), "dashboard load abandoned");
        true
    }

    /// Begin, await the source, settle. The settle step also runs when the
    /// returned future is dropped mid-flight.
    pub async fn load<S>(&mut self, source: &S) -> Settlement
    where
        S: DashboardSource + ?Sized,
    {
        let Some(ticket) = self.begin_load() else {
            return Settlement::Coalesced;
        };
        let guard = InFlight {
            collection: self,
            ticket: Some(ticket),
        };
        let outcome = source.fetch_batch().await;
        guard.finish(outcome)
    }

    /// User-triggered reload
    pub async fn refresh<S>(&mut self, source: &S) -> Settlement
    where
        S: DashboardSource + ?Sized,
    {
        self.load(source).await
    }
}

struct InFlight<'a> {
    collection: &'a mut RefreshableCollection,
    ticket: Option<LoadTicket>,
}

impl InFlight<'_> {
    fn finish(mut self, outcome: Result<Vec<DashboardItem>, FetchError>) -> Settlement {
        match self.ticket.take() {
            Some(ticket) => self.collection.settle(ticket, outcome),
            None => Settlement::Stale,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.collection.abandon(ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: usize) -> Vec<DashboardItem> {
        (0..n)
            .map(|i| DashboardItem::new(i.to_string(), "t", "d", "v", "#000000"))
            .collect()
    }

    #[test]
    fn test_begin_sets_refreshing_synchronously() {
        let mut coll = RefreshableCollection::new();
        assert!(!coll.is_refreshing());
        let ticket = coll.begin_load();
        assert!(ticket.is_some());
        assert!(coll.is_refreshing());
    }

    #[test]
    fn test_second_begin_coalesces() {
        let mut coll = RefreshableCollection::new();
        let first = coll.begin_load();
        assert!(first.is_some());
        assert_eq!(coll.begin_load(), None);
        assert_eq!(coll.in_flight(), first);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut coll = RefreshableCollection::new();
        let first = coll.begin_load().unwrap();
        coll.settle(first, Ok(batch(2)));
        let second = coll.begin_load().unwrap();

        assert_eq!(coll.settle(first, Ok(batch(9))), Settlement::Stale);
        assert!(coll.is_refreshing());
        assert_eq!(coll.len(), 2);

        assert_eq!(coll.settle(second, Ok(batch(3))), Settlement::Replaced { count: 3 });
        assert!(!coll.is_refreshing());
    }

    #[test]
    fn test_abandon_clears_flag_keeps_items() {
        let mut coll = RefreshableCollection::new();
        let t = coll.begin_load().unwrap();
        coll.settle(t, Ok(batch(4)));
        let t = coll.begin_load().unwrap();
        assert!(coll.abandon(t));
        assert!(!coll.is_refreshing());
        assert_eq!(coll.len(), 4);
        assert!(!coll.abandon(t));
    }
}
