use serde::{Deserialize, Serialize};

/// One landed-tips snapshot as published by the upstream tip stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipRecord {
    pub time: String,
    pub landed_tips_25th_percentile: f64,
    pub landed_tips_50th_percentile: f64,
    pub landed_tips_75th_percentile: f64,
    pub landed_tips_95th_percentile: f64,
    pub landed_tips_99th_percentile: f64,
}

impl TipRecord {
    /// Decode a feed message, which always carries a JSON array of records.
    pub fn batch_from_slice(message: &[u8]) -> serde_json::Result<Vec<TipRecord>> {
        serde_json::from_slice(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_batch_in_feed_order() {
        let message = br#"[
            {"time":"2024-05-01 10:00:00+00:00","landed_tips_25th_percentile":1.0e-5,"landed_tips_50th_percentile":2.0e-5,"landed_tips_75th_percentile":3.5e-5,"landed_tips_95th_percentile":0.0001,"landed_tips_99th_percentile":0.00123},
            {"time":"2024-05-01 09:59:00+00:00","landed_tips_25th_percentile":1.0,"landed_tips_50th_percentile":2.0,"landed_tips_75th_percentile":3.0,"landed_tips_95th_percentile":4.0,"landed_tips_99th_percentile":5.0}
        ]"#;

        let batch = TipRecord::batch_from_slice(message).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].time, "2024-05-01 10:00:00+00:00");
        assert_eq!(batch[0].landed_tips_99th_percentile, 0.00123);
        assert_eq!(batch[1].time, "2024-05-01 09:59:00+00:00");
    }

    #[test]
    fn rejects_a_bare_object() {
        let message = br#"{"time":"T1","landed_tips_25th_percentile":1.0,"landed_tips_50th_percentile":2.0,"landed_tips_75th_percentile":3.0,"landed_tips_95th_percentile":4.0,"landed_tips_99th_percentile":5.0}"#;

        assert!(TipRecord::batch_from_slice(message).is_err());
    }

    #[test]
    fn rejects_missing_percentile() {
        let message = br#"[{"time":"T1","landed_tips_25th_percentile":1.0}]"#;

        assert!(TipRecord::batch_from_slice(message).is_err());
    }
}
