use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde::de::DeserializeOwned;
use tokio::time::{timeout, Duration};
use tower::ServiceExt; // for `oneshot`

use pink_room_rivalry::{
    rivalry::ScoreUpdate, EnteredSet, MatchRecord, RivalrySnapshot, Side,
};

use super::setup::{TestSetup, TABLE};

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Score `points` consecutive points for one side on the live scorer
    pub async fn score_points(&self, side: Side, points: u32) -> Option<ScoreUpdate> {
        let mut last = None;
        for _ in 0..points {
            last = Some(
                self.state
                    .scoring_service
                    .score_point(TABLE, side)
                    .await
                    .unwrap(),
            );
        }
        last
    }

    /// Play one set to `winner_points`-`loser_points`, interleaving points
    /// so the set is only decided by the final point
    pub async fn play_set(
        &self,
        winner: Side,
        winner_points: u32,
        loser_points: u32,
    ) -> ScoreUpdate {
        let shared = loser_points.min(winner_points - 1);
        for _ in 0..shared {
            self.score_points(winner, 1).await;
            self.score_points(winner.other(), 1).await;
        }
        self.score_points(winner, winner_points - shared)
            .await
            .unwrap()
    }

    /// Record a match through the quick entry service
    pub async fn quick_entry(&self, sets: &[(u32, u32)]) -> MatchRecord {
        let sets: Vec<EnteredSet> = sets.iter().map(|&(a, b)| EnteredSet::new(a, b)).collect();
        self.state
            .rivalry_service
            .submit_quick_entry(TABLE, &sets)
            .await
            .unwrap()
    }

    /// Wait until the live statistics have seen `total` matches
    pub async fn live_snapshot_with(&self, total: u32) -> RivalrySnapshot {
        let mut updates = self.live.subscribe();
        timeout(Duration::from_secs(1), async {
            loop {
                let snapshot = updates.borrow_and_update().clone();
                if snapshot.summary.total_matches == total {
                    return snapshot;
                }
                updates.changed().await.unwrap();
            }
        })
        .await
        .expect("live statistics did not refresh")
    }

    /// Send a request through the router and decode the JSON reply
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, T) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
