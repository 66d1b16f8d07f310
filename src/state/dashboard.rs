//! Dashboard State
//!
//! Reactive state behind the monitoring view, replaced wholesale by each
//! successful poll cycle.

use leptos::*;
use std::collections::HashMap;

/// Notice shown while the backend cannot be reached
pub const CONNECTING_NOTICE: &str = "Connecting to backend...";

/// State for the monitoring view, created per activation
#[derive(Clone)]
pub struct DashboardState {
    /// Latest statistics snapshot from the API
    pub stats: RwSignal<Option<Stats>>,
    /// Most recent transactions, replaced as a whole each cycle
    pub transactions: RwSignal<Vec<Transaction>>,
    /// True until the first cycle lands
    pub loading: RwSignal<bool>,
    /// Connectivity notice, None while the backend answers
    pub error: RwSignal<Option<String>>,
    /// Timestamp of the last successful refresh
    pub last_refresh: RwSignal<Option<i64>>,
}

/// Aggregate statistics from the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Stats {
    pub total_transactions: u64,
    pub fraud_count: u64,
    pub fraud_percentage: f64,
    #[serde(default)]
    pub daily_stats: Vec<DailyStat>,
}

/// One day of fraud history
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DailyStat {
    pub date: String,
    pub fraud_count: u64,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A scored transaction from the live feed
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub is_fraud: bool,
    /// Model confidence in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub transaction_data: TransactionData,
}

/// Raw fields of a scored transaction
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TransactionData {
    #[serde(default)]
    pub amount: f64,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            stats: create_rw_signal(None),
            transactions: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            error: create_rw_signal(None),
            last_refresh: create_rw_signal(None),
        }
    }

    /// Replace the displayed data with the result of one poll cycle
    pub fn apply_snapshot(&self, stats: Stats, transactions: Vec<Transaction>) {
        self.stats.set(Some(stats));
        self.transactions.set(transactions);
        self.error.set(None);
        self.loading.set(false);
        self.last_refresh
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Keep the displayed data but flag the backend as unreachable
    pub fn mark_unreachable(&self) {
        self.error.set(Some(CONNECTING_NOTICE.to_string()));
    }

    /// Mean model confidence over the visible feed, as a percentage
    pub fn average_confidence(&self) -> Option<f64> {
        let feed = self.transactions.get();
        if feed.is_empty() {
            return None;
        }
        let sum: f64 = feed.iter().map(|t| t.confidence).sum();
        Some(sum / feed.len() as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> Stats {
        Stats {
            total_transactions: 5000,
            fraud_count: 85,
            fraud_percentage: 1.7,
            daily_stats: vec![DailyStat {
                date: "2024-01-15".to_string(),
                fraud_count: 12,
                extra: HashMap::new(),
            }],
        }
    }

    fn sample_feed(count: usize) -> Vec<Transaction> {
        (0..count)
            .map(|i| Transaction {
                transaction_id: format!("tx-{:03}", i),
                is_fraud: i % 2 == 0,
                confidence: 0.5,
                timestamp: None,
                transaction_data: TransactionData::default(),
            })
            .collect()
    }

    #[test]
    fn test_apply_snapshot_replaces_everything() {
        let runtime = create_runtime();

        let state = DashboardState::new();
        state.error.set(Some(CONNECTING_NOTICE.to_string()));

        state.apply_snapshot(sample_stats(), sample_feed(2));

        let stats = state.stats.get_untracked().unwrap();
        assert_eq!(stats.total_transactions, 5000);
        assert_eq!(state.transactions.get_untracked().len(), 2);
        assert_eq!(state.error.get_untracked(), None);
        assert!(!state.loading.get_untracked());
        assert!(state.last_refresh.get_untracked().is_some());

        runtime.dispose();
    }

    #[test]
    fn test_mark_unreachable_keeps_data() {
        let runtime = create_runtime();

        let state = DashboardState::new();
        state.apply_snapshot(sample_stats(), sample_feed(20));

        state.mark_unreachable();

        assert!(state.stats.get_untracked().is_some());
        assert_eq!(state.transactions.get_untracked().len(), 20);
        assert_eq!(
            state.error.get_untracked().as_deref(),
            Some(CONNECTING_NOTICE)
        );

        runtime.dispose();
    }

    #[test]
    fn test_average_confidence_over_feed() {
        let runtime = create_runtime();

        let state = DashboardState::new();
        assert_eq!(state.average_confidence(), None);

        let mut feed = sample_feed(2);
        feed[0].confidence = 0.9;
        feed[1].confidence = 0.7;
        state.transactions.set(feed);

        let avg = state.average_confidence().unwrap();
        assert!((avg - 80.0).abs() < 1e-9);

        runtime.dispose();
    }

    #[test]
    fn test_transaction_parses_open_fields() {
        let json = r#"{
            "transaction_id": "tx-001",
            "is_fraud": true,
            "confidence": 0.93,
            "timestamp": "2024-01-15T10:30:00",
            "transaction_data": {"amount": 125.50, "merchant": "ACME", "country": "US"}
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_id, "tx-001");
        assert!(tx.is_fraud);
        assert_eq!(tx.transaction_data.amount, 125.5);
        assert_eq!(
            tx.transaction_data
                .fields
                .get("merchant")
                .and_then(|v| v.as_str()),
            Some("ACME")
        );
    }

    #[test]
    fn test_transaction_tolerates_missing_fields() {
        let json = r#"{"transaction_id": "tx-002", "is_fraud": false, "confidence": 0.12}"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.timestamp, None);
        assert_eq!(tx.transaction_data.amount, 0.0);
    }

    #[test]
    fn test_stats_parses_without_history() {
        let json = r#"{"total_transactions": 10, "fraud_count": 1, "fraud_percentage": 10.0}"#;

        let stats: Stats = serde_json::from_str(json).unwrap();
        assert!(stats.daily_stats.is_empty());
    }
}
