//! Mock dashboard data source with simulated latency

use std::time::Duration;

use crate::domain::{DashboardItem, DashboardSource, FetchError};

/// Returns the fixed four-card batch after `latency`
#[derive(Debug, Clone)]
pub struct MockDashboardSource {
    latency: Duration,
    fail: bool,
}

impl MockDashboardSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail: false,
        }
    }

    /// Every fetch settles with an error after the same latency
    pub fn failing(latency: Duration) -> Self {
        Self {
            latency,
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl DashboardSource for MockDashboardSource {
    async fn fetch_batch(&self) -> Result<Vec<DashboardItem>, FetchError> {
        tokio::time::sleep(self.latency).await;
        if self.fail {
            return Err(FetchError::Failed("simulated API error".to_string()));
        }
        Ok(mock_batch())
    }
}

pub fn mock_batch() -> Vec<DashboardItem> {
    vec![
        DashboardItem::new("1", "Total Sales", "This month", "$12,450", "#4CAF50"),
        DashboardItem::new("2", "New Users", "This week", "248", "#2196F3"),
        DashboardItem::new("3", "Orders", "Today", "42", "#FF9800"),
        DashboardItem::new("4", "Revenue", "This quarter", "$85,200", "#9C27B0"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_batch_ids_unique() {
        let batch = mock_batch();
        let mut ids: Vec<&str> = batch.iter().map(|item| item.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), batch.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let source = MockDashboardSource::new(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        let batch = source.fetch_batch().await.unwrap();
        assert_eq!(batch.len(), 4);
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_source() {
        let source = MockDashboardSource::failing(Duration::from_millis(10));
        assert!(matches!(
            source.fetch_batch().await,
            Err(FetchError::Failed(_))
        ));
    }
}
