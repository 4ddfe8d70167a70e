//! Snapshot + change-notification contract between a state owner and its renderers

use tokio::sync::watch;

/// A value with exactly one writer and any number of readers.
///
/// The owner mutates through [`Observable::update`]; readers either take a
/// [`snapshot`](Observable::snapshot) or [`subscribe`](Observable::subscribe)
/// and redraw when the receiver reports a change.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Borrow the current value without cloning it
    pub fn borrow(&self) -> watch::Ref<'_, T> {
        self.tx.borrow()
    }

    /// Change-notification stream; the receiver starts at the current value
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Mutate in place. `f` returns whether anything changed; subscribers are
    /// only woken when it did.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.tx.send_if_modified(f)
    }
}

impl<T: Clone> Observable<T> {
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
