//! Shared router state.

use std::sync::Arc;

use crate::adapters::broker::BoundedPublisher;
use crate::application::handlers::hrm::{GetReadingHandler, ListReadingsHandler, RecordReadingHandler};
use crate::application::handlers::peripheral::{
    AverageHeartRateHandler, BindPeripheralsHandler, BindingStatusHandler, ForwardLocationHandler,
    UnbindPeripheralsHandler,
};
use crate::application::handlers::player::{
    CreatePlayerHandler, GetPlayerHandler, ListPlayersHandler, UpdatePlayerHandler,
};
use crate::application::handlers::trail::{ListTrailsHandler, RegisterTrailHandler};
use crate::application::handlers::workout::{
    EndWorkoutHandler, GetWorkoutHandler, ListWorkoutsHandler, StartWorkoutHandler,
};
use crate::domain::foundation::Repository;
use crate::domain::hrm::{HrmBinding, HrmReading};
use crate::domain::peripheral::PeripheralLink;
use crate::domain::player::Player;
use crate::domain::telemetry::TopicNames;
use crate::domain::trail::Trail;
use crate::domain::workout::{Workout, DEFAULT_DEDUPE_WINDOW};
use crate::ports::{EventPublisher, PeripheralBinding, PlayerDirectory};

/// Repositories owned by this process.
#[derive(Clone)]
pub struct Stores {
    pub players: Arc<dyn Repository<Player>>,
    pub workouts: Arc<dyn Repository<Workout>>,
    pub links: Arc<dyn Repository<PeripheralLink>>,
    pub bindings: Arc<dyn Repository<HrmBinding>>,
    pub readings: Arc<dyn Repository<HrmReading>>,
    pub trails: Arc<dyn Repository<Trail>>,
}

/// Cloned into every request. Handlers are built on demand from it.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub player_directory: Arc<dyn PlayerDirectory>,
    pub peripherals: Arc<dyn PeripheralBinding>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub publisher: BoundedPublisher,
    pub topics: TopicNames,
    pub dedupe_window: usize,
}

impl AppState {
    pub fn new(
        stores: Stores,
        player_directory: Arc<dyn PlayerDirectory>,
        peripherals: Arc<dyn PeripheralBinding>,
        event_publisher: Arc<dyn EventPublisher>,
        publisher: BoundedPublisher,
        topics: TopicNames,
    ) -> Self {
        Self {
            stores,
            player_directory,
            peripherals,
            event_publisher,
            publisher,
            topics,
            dedupe_window: DEFAULT_DEDUPE_WINDOW,
        }
    }

    pub fn with_dedupe_window(mut self, dedupe_window: usize) -> Self {
        self.dedupe_window = dedupe_window;
        self
    }

    // ─── players ───────────────────────────────────────────────────────────

    pub fn create_player_handler(&self) -> CreatePlayerHandler {
        CreatePlayerHandler::new(self.stores.players.clone())
    }

    pub fn update_player_handler(&self) -> UpdatePlayerHandler {
        UpdatePlayerHandler::new(self.stores.players.clone())
    }

    pub fn get_player_handler(&self) -> GetPlayerHandler {
        GetPlayerHandler::new(self.stores.players.clone())
    }

    pub fn list_players_handler(&self) -> ListPlayersHandler {
        ListPlayersHandler::new(self.stores.players.clone())
    }

    // ─── workouts ──────────────────────────────────────────────────────────

    pub fn start_workout_handler(&self) -> StartWorkoutHandler {
        StartWorkoutHandler::new(
            self.stores.workouts.clone(),
            self.player_directory.clone(),
            self.peripherals.clone(),
            self.event_publisher.clone(),
        )
        .with_dedupe_window(self.dedupe_window)
    }

    pub fn end_workout_handler(&self) -> EndWorkoutHandler {
        EndWorkoutHandler::new(
            self.stores.workouts.clone(),
            self.peripherals.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_workout_handler(&self) -> GetWorkoutHandler {
        GetWorkoutHandler::new(self.stores.workouts.clone(), self.peripherals.clone())
    }

    pub fn list_workouts_handler(&self) -> ListWorkoutsHandler {
        ListWorkoutsHandler::new(self.stores.workouts.clone())
    }

    // ─── peripheral ────────────────────────────────────────────────────────

    pub fn bind_peripherals_handler(&self) -> BindPeripheralsHandler {
        BindPeripheralsHandler::new(
            self.stores.links.clone(),
            self.publisher.clone(),
            self.topics.clone(),
        )
    }

    pub fn unbind_peripherals_handler(&self) -> UnbindPeripheralsHandler {
        UnbindPeripheralsHandler::new(
            self.stores.links.clone(),
            self.stores.bindings.clone(),
            self.stores.readings.clone(),
        )
    }

    pub fn binding_status_handler(&self) -> BindingStatusHandler {
        BindingStatusHandler::new(self.stores.links.clone(), self.stores.bindings.clone())
    }

    pub fn average_heart_rate_handler(&self) -> AverageHeartRateHandler {
        AverageHeartRateHandler::new(self.stores.readings.clone())
    }

    pub fn forward_location_handler(&self) -> ForwardLocationHandler {
        ForwardLocationHandler::new(
            self.stores.links.clone(),
            self.publisher.clone(),
            self.topics.clone(),
        )
    }

    // ─── hrm ───────────────────────────────────────────────────────────────

    pub fn record_reading_handler(&self) -> RecordReadingHandler {
        RecordReadingHandler::new(
            self.stores.bindings.clone(),
            self.stores.readings.clone(),
            self.publisher.clone(),
            self.topics.clone(),
        )
    }

    pub fn get_reading_handler(&self) -> GetReadingHandler {
        GetReadingHandler::new(self.stores.readings.clone())
    }

    pub fn list_readings_handler(&self) -> ListReadingsHandler {
        ListReadingsHandler::new(self.stores.readings.clone())
    }

    // ─── trails ────────────────────────────────────────────────────────────

    pub fn register_trail_handler(&self) -> RegisterTrailHandler {
        RegisterTrailHandler::new(self.stores.trails.clone())
    }

    pub fn list_trails_handler(&self) -> ListTrailsHandler {
        ListTrailsHandler::new(self.stores.trails.clone())
    }
}
