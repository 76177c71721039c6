use std::sync::Arc;

use pink_room_rivalry::{
    app,
    domain::Competitor,
    AppState, EventBus, InMemoryMatchRepository, LiveRivalry, RivalryService, RivalrySides,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const TABLE: &str = "pink-room-main";

pub struct TestSetup {
    pub state: AppState,
    pub event_bus: EventBus,
    pub live: LiveRivalry,
}

pub struct TestSetupBuilder {
    sides: RivalrySides,
    match_limit: usize,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            sides: RivalrySides::new(
                Competitor::new("bachi", "Bachi"),
                Competitor::new("crimebaker", "Crimebaker"),
            ),
            match_limit: 100,
        }
    }

    #[allow(dead_code)]
    pub fn with_sides(mut self, a: (&str, &str), b: (&str, &str)) -> Self {
        self.sides = RivalrySides::new(Competitor::new(a.0, a.1), Competitor::new(b.0, b.1));
        self
    }

    #[allow(dead_code)]
    pub fn with_match_limit(mut self, match_limit: usize) -> Self {
        self.match_limit = match_limit;
        self
    }

    pub async fn build(self) -> TestSetup {
        let event_bus = EventBus::new();
        let rivalry_service = Arc::new(
            RivalryService::builder(Arc::new(InMemoryMatchRepository::new()))
                .with_event_bus(event_bus.clone())
                .with_sides(self.sides)
                .with_match_limit(self.match_limit)
                .build(),
        );

        let live = LiveRivalry::spawn(Arc::clone(&rivalry_service), TABLE)
            .await
            .unwrap();

        TestSetup {
            state: AppState::new(rivalry_service),
            event_bus,
            live,
        }
    }
}

impl TestSetup {
    pub fn router(&self) -> axum::Router {
        app(self.state.clone())
    }
}
