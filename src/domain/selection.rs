//! Active tab/section selection over a fixed, enumerated key set

use std::fmt::Debug;

use super::error::SelectionError;

/// A fixed set of selectable keys.
///
/// `ALL` must be non-empty; its first entry is the initial selection.
pub trait SelectionKey: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Stable identifier used by commands (`basics`, `lists`, ...)
    fn key(self) -> &'static str;

    /// Human-readable label
    fn label(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        let wanted = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.key().eq_ignore_ascii_case(wanted))
    }
}

/// Keys that map to exactly one view-producing function each
pub trait ViewMap: SelectionKey {
    /// State the producer reads
    type Props: ?Sized;
    type View;

    fn producer(self) -> fn(&Self::Props) -> Self::View;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSelection<K: SelectionKey> {
    active: K,
}

impl<K: SelectionKey> Default for ViewSelection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SelectionKey> ViewSelection<K> {
    pub fn new() -> Self {
        Self { active: K::ALL[0] }
    }

    pub fn active(&self) -> K {
        self.active
    }

    pub fn index(&self) -> usize {
        K::ALL
            .iter()
            .position(|key| *key == self.active)
            .unwrap_or(0)
    }

    /// Select by string identifier. Unknown keys leave the selection untouched.
    pub fn select(&mut self, key: &str) -> Result<K, SelectionError> {
        let next =
            K::from_key(key).ok_or_else(|| SelectionError::InvalidSelection(key.to_string()))?;
        self.active = next;
        Ok(next)
    }

    pub fn select_key(&mut self, key: K) {
        self.active = key;
    }

    /// Select by position in `K::ALL`
    pub fn select_index(&mut self, index: usize) -> Result<K, SelectionError> {
        let next = K::ALL
            .get(index)
            .copied()
            .ok_or_else(|| SelectionError::InvalidSelection(format!("#{}", index + 1)))?;
        self.active = next;
        Ok(next)
    }

    pub fn cycle(&mut self, forward: bool) -> K {
        let len = K::ALL.len();
        let idx = self.index();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.active = K::ALL[next];
        self.active
    }
}

impl<K: ViewMap> ViewSelection<K> {
    pub fn current_view(&self, props: &K::Props) -> K::View {
        (self.active.producer())(props)
    }
}
