// Wire types exchanged with the analysis backend.
//
// Two endpoints are consumed:
// - `GET /api/getPage?task_id=..` returns a `ProgressPayload`
// - `POST /api/gachaLog` takes an `AnalysisRequest` and returns an
//   `AnalysisResponse`
//
// Deserialization is deliberately lenient: the backend omits `success` on
// rejections and older payloads lack `four_star_pulls`/`three_star_count`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::TaskId;

// ---------------------------------------------------------------------------
// Pool data
// ---------------------------------------------------------------------------

/// One high-rarity draw as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRecord {
    pub name: String,
    pub rank_type: String,
    pub item_type: String,
    pub time: String,
    /// Draws spent to reach this item, the item itself included.
    pub pulls: u32,
    pub avatar_url: String,
    pub pulls_before: u32,
    pub primogems_cost: u64,
    /// Limited banner result that landed on a standard-pool item.
    pub is_wai: bool,
}

/// Aggregate counters for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolStats {
    pub total_pulls: u64,
    pub total_primogems: u64,
    pub five_star_count: u64,
    pub four_star_count: u64,
    pub three_star_count: u64,
}

/// Everything the client knows about one gacha category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub name: String,
    /// Five-star records in draw order.
    #[serde(default)]
    pub pulls: Vec<PullRecord>,
    /// Four-star records in draw order.
    #[serde(default)]
    pub four_star_pulls: Vec<PullRecord>,
    #[serde(default)]
    pub stats: PoolStats,
}

impl Pool {
    /// An empty pool with the given display label.
    pub fn empty(name: impl Into<String>) -> Self {
        Pool {
            name: name.into(),
            ..Pool::default()
        }
    }
}

/// Wire mapping from category code to pool.
pub type PoolCollection = HashMap<String, Pool>;

// ---------------------------------------------------------------------------
// Analysis request / response
// ---------------------------------------------------------------------------

/// Body of `POST /api/gachaLog`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub task_id: TaskId,
}

/// Response of `POST /api/gachaLog`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    pub success: bool,
    pub data: Option<PoolCollection>,
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Split the response into accepted data or the backend's error message.
    ///
    /// `success: true` without `data` counts as a rejection. A blank error
    /// string is treated as absent.
    pub fn into_result(self) -> Result<PoolCollection, Option<String>> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.filter(|e| !e.trim().is_empty())),
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Response of `GET /api/getPage`. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressPayload {
    pub name: Option<String>,
    pub page: Option<String>,
}

impl ProgressPayload {
    /// A displayable status, or `None` when the payload carries no update.
    pub fn into_status(self) -> Option<ProgressStatus> {
        match (self.name, self.page) {
            (Some(label), Some(stage)) if !label.is_empty() && !stage.is_empty() => {
                Some(ProgressStatus { label, stage })
            }
            _ => None,
        }
    }
}

/// Human-readable progress of the backend job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStatus {
    /// Category currently being fetched.
    pub label: String,
    /// Page within that category.
    pub stage: String,
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.stage)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_success_response() {
        let json = r#"{
            "success": true,
            "data": {
                "301": {
                    "name": "A",
                    "pulls": [],
                    "stats": {"total_pulls": 10, "total_primogems": 1600, "five_star_count": 0, "four_star_count": 2}
                }
            }
        }"#;
        let resp: AnalysisResponse = serde_json::from_str(json).unwrap();
        let data = resp.into_result().unwrap();
        let pool = &data["301"];
        assert_eq!(pool.name, "A");
        assert_eq!(pool.stats.total_pulls, 10);
        assert_eq!(pool.stats.total_primogems, 1600);
        assert_eq!(pool.stats.four_star_count, 2);
        assert_eq!(pool.stats.three_star_count, 0);
        assert!(pool.four_star_pulls.is_empty());
    }

    #[test]
    fn parses_full_backend_pool_and_ignores_raw_data() {
        let json = r#"{
            "name": "Character",
            "pulls": [{
                "name": "Keqing", "rank_type": "5", "item_type": "Character",
                "time": "2024-01-02 03:04:05", "pulls": 77, "avatar_url": "https://x/y.png",
                "pulls_before": 77, "primogems_cost": 12320, "is_wai": true
            }],
            "four_star_pulls": [{"name": "Xiangling", "rank_type": "4", "pulls": 8}],
            "stats": {"total_pulls": 80, "total_primogems": 12800, "five_star_count": 1,
                      "four_star_count": 9, "three_star_count": 70},
            "raw_data": [{"id": "1"}]
        }"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.pulls.len(), 1);
        assert!(pool.pulls[0].is_wai);
        assert_eq!(pool.pulls[0].primogems_cost, 12320);
        assert_eq!(pool.four_star_pulls[0].pulls, 8);
        assert_eq!(pool.four_star_pulls[0].item_type, "");
        assert_eq!(pool.stats.three_star_count, 70);
    }

    #[test]
    fn rejection_without_success_field_carries_error() {
        let resp: AnalysisResponse =
            serde_json::from_str(r#"{"error": "link expired"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.into_result(), Err(Some("link expired".to_string())));
    }

    #[test]
    fn success_without_data_is_rejection() {
        let resp: AnalysisResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(resp.into_result(), Err(None));
    }

    #[test]
    fn blank_error_is_treated_as_absent() {
        let resp: AnalysisResponse =
            serde_json::from_str(r#"{"success": false, "error": "  "}"#).unwrap();
        assert_eq!(resp.into_result(), Err(None));
    }

    #[test]
    fn request_serializes_with_snake_case_task_id() {
        let req = AnalysisRequest {
            url: "https://example.com/log?x=1".into(),
            task_id: TaskId::from_string("task-1"),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"url": "https://example.com/log?x=1", "task_id": "task-1"})
        );
    }

    #[test]
    fn progress_with_both_fields_is_status() {
        let payload: ProgressPayload =
            serde_json::from_str(r#"{"name": "Weapon", "page": "page 3"}"#).unwrap();
        let status = payload.into_status().unwrap();
        assert_eq!(status.to_string(), "Weapon page 3");
    }

    #[test]
    fn progress_with_missing_or_empty_field_is_ignored() {
        for json in [
            r#"{}"#,
            r#"{"name": "Weapon"}"#,
            r#"{"page": "page 1"}"#,
            r#"{"name": "", "page": "page 1"}"#,
            r#"{"name": "Weapon", "page": ""}"#,
        ] {
            let payload: ProgressPayload = serde_json::from_str(json).unwrap();
            assert_eq!(payload.into_status(), None, "payload {json}");
        }
    }
}
