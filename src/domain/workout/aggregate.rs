//! Workout aggregate entity.
//!
//! A workout is one training session of one player. It is created when the
//! session starts, folds telemetry from peripherals and the trail manager
//! while active, and becomes immutable once ended.
//!
//! # Ownership
//!
//! Workouts reference their player, trail and HRM by id only. HRM readings
//! and shelter reports are contributions keyed by workout id, never owned.

use serde::{Deserialize, Serialize};

use super::telemetry::{FoldOutcome, LocationFix, ShelterReport, WorkoutTelemetry};
use super::WorkoutKind;
use crate::domain::foundation::{
    DomainError, Distance, Entity, ErrorCode, HrmId, PlayerId, Timestamp, TrailId, WorkoutId,
};
use crate::domain::telemetry::{HeartRateSample, LocationSample, ShelterStatus};

/// Workout aggregate.
///
/// # Invariants
///
/// - `player_id` is never nil
/// - `distance` never decreases
/// - once `ended_at` is set, every mutator fails with `WorkoutEnded`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    player_id: PlayerId,
    trail_id: Option<TrailId>,
    kind: WorkoutKind,
    hardcore_mode: bool,
    hrm_id: Option<HrmId>,
    live_location: bool,
    created_at: Timestamp,
    ended_at: Option<Timestamp>,
    distance: Distance,
    telemetry: WorkoutTelemetry,
}

impl Workout {
    /// Starts a new workout.
    ///
    /// # Errors
    ///
    /// - `InvalidWorkout` if `player_id` is nil
    pub fn new(
        player_id: PlayerId,
        trail_id: Option<TrailId>,
        hardcore_mode: bool,
        kind: WorkoutKind,
    ) -> Result<Self, DomainError> {
        if player_id.is_nil() {
            return Err(DomainError::new(
                ErrorCode::InvalidWorkout,
                "Workout requires a player id",
            ));
        }
        Ok(Self::started(player_id, trail_id, hardcore_mode, kind))
    }

    /// Builds a workout from the legacy session shape (cardio flag, no trail).
    ///
    /// # Errors
    ///
    /// - `InvalidWorkoutSession` if `player_id` is nil
    pub fn from_legacy_session(
        player_id: PlayerId,
        hardcore_mode: bool,
        is_cardio: bool,
    ) -> Result<Self, DomainError> {
        if player_id.is_nil() {
            return Err(DomainError::new(
                ErrorCode::InvalidWorkoutSession,
                "Workout session requires a player id",
            ));
        }
        Ok(Self::started(
            player_id,
            None,
            hardcore_mode,
            WorkoutKind::from_cardio_flag(is_cardio),
        ))
    }

    fn started(
        player_id: PlayerId,
        trail_id: Option<TrailId>,
        hardcore_mode: bool,
        kind: WorkoutKind,
    ) -> Self {
        Self {
            id: WorkoutId::new(),
            player_id,
            trail_id,
            kind,
            hardcore_mode,
            hrm_id: None,
            live_location: false,
            created_at: Timestamp::now(),
            ended_at: None,
            distance: Distance::ZERO,
            telemetry: WorkoutTelemetry::default(),
        }
    }

    /// Records which peripherals were requested when the session was bound.
    pub fn with_peripherals(mut self, hrm_id: Option<HrmId>, live_location: bool) -> Self {
        self.hrm_id = hrm_id.filter(|id| !id.is_nil());
        self.live_location = live_location;
        self
    }

    /// Sets how many dedupe keys each telemetry stream remembers.
    pub fn with_dedupe_window(mut self, capacity: usize) -> Self {
        self.telemetry = WorkoutTelemetry::with_window(capacity);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn trail_id(&self) -> Option<TrailId> {
        self.trail_id
    }

    pub fn kind(&self) -> WorkoutKind {
        self.kind
    }

    pub fn hardcore_mode(&self) -> bool {
        self.hardcore_mode
    }

    pub fn hrm_id(&self) -> Option<HrmId> {
        self.hrm_id
    }

    pub fn live_location(&self) -> bool {
        self.live_location
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn ended_at(&self) -> Option<&Timestamp> {
        self.ended_at.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Cumulative distance covered.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn telemetry(&self) -> &WorkoutTelemetry {
        &self.telemetry
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Ends the workout.
    ///
    /// # Errors
    ///
    /// - `WorkoutEnded` if already ended
    /// - `ValidationFailed` if `at` precedes the start
    pub fn end(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.ensure_active()?;
        if at.is_before(&self.created_at) {
            return Err(DomainError::validation(
                "ended_at",
                "Workout cannot end before it started",
            ));
        }
        self.ended_at = Some(at);
        Ok(())
    }

    /// Folds a location fix.
    ///
    /// Distance accumulates only from fixes newer than the last one; older
    /// fixes are remembered for deduplication but do not move the player.
    pub fn record_location(&mut self, sample: &LocationSample) -> Result<FoldOutcome, DomainError> {
        self.ensure_active()?;
        self.ensure_own(sample.workout_id)?;
        let position = sample.position()?;

        let outcome = self.telemetry.location_keys.admit(sample.dedupe_key());
        if !outcome.is_applied() {
            return Ok(outcome);
        }

        match self.telemetry.last_location {
            Some(last) if sample.recorded_at.is_after(&last.recorded_at) => {
                let leg = last.position.distance_to(&position);
                self.distance = self.distance.saturating_add(leg);
                self.telemetry.last_location = Some(LocationFix {
                    position,
                    recorded_at: sample.recorded_at,
                });
            }
            Some(_) => {}
            None => {
                self.telemetry.last_location = Some(LocationFix {
                    position,
                    recorded_at: sample.recorded_at,
                });
            }
        }
        Ok(FoldOutcome::Applied)
    }

    /// Folds a heart-rate sample.
    ///
    /// # Errors
    ///
    /// - `WorkoutEnded` if ended
    /// - `Conflict` if the sample comes from a device other than the bound HRM
    pub fn record_heart_rate(
        &mut self,
        sample: &HeartRateSample,
    ) -> Result<FoldOutcome, DomainError> {
        self.ensure_active()?;
        self.ensure_own(sample.workout_id)?;
        if let Some(bound) = self.hrm_id {
            if bound != sample.hrm_id {
                return Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!("Workout {} is bound to HRM {}", self.id, bound),
                )
                .with_detail("hrm_id", sample.hrm_id.to_string()));
            }
        }

        let outcome = self.telemetry.heart_rate_keys.admit(sample.dedupe_key());
        if outcome.is_applied() {
            self.telemetry
                .heart_rate
                .record(sample.rate, sample.recorded_at);
        }
        Ok(outcome)
    }

    /// Folds a shelter report. Untimed reports always replace the current one.
    pub fn record_shelter_status(
        &mut self,
        status: &ShelterStatus,
    ) -> Result<FoldOutcome, DomainError> {
        self.ensure_active()?;
        self.ensure_own(status.workout_id)?;

        if let Some(key) = status.dedupe_key() {
            let outcome = self.telemetry.shelter_keys.admit(key);
            if !outcome.is_applied() {
                return Ok(outcome);
            }
            let newer = match self.telemetry.shelter.and_then(|s| s.observed_at) {
                Some(current) => status.observed_at.map_or(true, |at| at >= current),
                None => true,
            };
            if !newer {
                return Ok(FoldOutcome::Applied);
            }
        }

        self.telemetry.shelter = Some(ShelterReport {
            available: status.available,
            distance: status.distance,
            observed_at: status.observed_at,
        });
        Ok(FoldOutcome::Applied)
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::WorkoutEnded,
                format!("Workout {} has already ended", self.id),
            ))
        }
    }

    fn ensure_own(&self, workout_id: WorkoutId) -> Result<(), DomainError> {
        if workout_id == self.id {
            Ok(())
        } else {
            Err(DomainError::validation(
                "workout_id",
                format!("Sample for workout {} folded into {}", workout_id, self.id),
            ))
        }
    }
}

impl Entity for Workout {
    type Id = WorkoutId;
    const KIND: &'static str = "Workout";

    fn id(&self) -> WorkoutId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Coordinates, ShelterId};

    fn ts(ms: i64) -> Timestamp {
        Timestamp::from_unix_millis(ms)
    }

    fn workout() -> Workout {
        Workout::new(PlayerId::new(), None, false, WorkoutKind::Cardio).unwrap()
    }

    fn fix(w: &Workout, lat: f64, ms: i64) -> LocationSample {
        LocationSample::new(w.id(), Coordinates::new(lat, 0.0).unwrap(), ts(ms))
    }

    // Construction

    #[test]
    fn new_workout_has_zero_distance_and_no_end() {
        let w = workout();
        assert_eq!(w.distance(), Distance::ZERO);
        assert!(w.ended_at().is_none());
        assert!(w.is_active());
    }

    #[test]
    fn nil_player_is_invalid_workout() {
        let err = Workout::new(PlayerId::nil(), None, false, WorkoutKind::Cardio).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWorkout);
    }

    #[test]
    fn nil_player_is_invalid_legacy_session() {
        let err = Workout::from_legacy_session(PlayerId::nil(), true, true).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWorkoutSession);
    }

    #[test]
    fn legacy_session_maps_cardio_flag() {
        let w = Workout::from_legacy_session(PlayerId::new(), true, false).unwrap();
        assert_eq!(w.kind(), WorkoutKind::Physical);
        assert!(w.hardcore_mode());
        assert!(w.trail_id().is_none());
    }

    #[test]
    fn nil_hrm_is_not_recorded_as_bound() {
        let w = workout().with_peripherals(Some(HrmId::nil()), true);
        assert!(w.hrm_id().is_none());
        assert!(w.live_location());
    }

    // Ending

    #[test]
    fn end_sets_end_time_once() {
        let mut w = workout();
        let at = w.created_at().plus_secs(60);
        w.end(at).unwrap();
        assert_eq!(w.ended_at(), Some(&at));
        let err = w.end(at.plus_secs(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkoutEnded);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut w = workout();
        let at = w.created_at().plus_secs(-10);
        assert!(w.end(at).is_err());
        assert!(w.is_active());
    }

    #[test]
    fn ended_workout_rejects_telemetry() {
        let mut w = workout();
        w.end(w.created_at().plus_secs(1)).unwrap();
        let err = w.record_location(&fix(&w, 1.0, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkoutEnded);
    }

    // Location folding

    #[test]
    fn distance_accumulates_between_newer_fixes() {
        let mut w = workout();
        w.record_location(&fix(&w, 0.0, 1_000)).unwrap();
        assert_eq!(w.distance(), Distance::ZERO);
        w.record_location(&fix(&w, 0.01, 2_000)).unwrap();
        let d = w.distance().meters();
        assert!(d > 1_000.0 && d < 1_200.0, "got {}", d);
    }

    #[test]
    fn redelivered_fix_does_not_double_count() {
        let mut w = workout();
        w.record_location(&fix(&w, 0.0, 1_000)).unwrap();
        let second = fix(&w, 0.01, 2_000);
        assert_eq!(w.record_location(&second).unwrap(), FoldOutcome::Applied);
        let after_first = w.distance();
        assert_eq!(w.record_location(&second).unwrap(), FoldOutcome::Duplicate);
        assert_eq!(w.distance(), after_first);
    }

    #[test]
    fn older_fix_does_not_move_the_player() {
        let mut w = workout();
        w.record_location(&fix(&w, 0.0, 2_000)).unwrap();
        w.record_location(&fix(&w, 1.0, 1_000)).unwrap();
        assert_eq!(w.distance(), Distance::ZERO);
        assert_eq!(
            w.telemetry().last_location().unwrap().recorded_at,
            ts(2_000)
        );
    }

    #[test]
    fn fix_for_other_workout_is_rejected() {
        let mut w = workout();
        let other = LocationSample::new(WorkoutId::new(), Coordinates::new(0.0, 0.0).unwrap(), ts(1));
        assert!(w.record_location(&other).is_err());
    }

    // Heart-rate folding

    #[test]
    fn heart_rate_latest_follows_timestamp_not_arrival() {
        let hrm = HrmId::new();
        let mut w = workout().with_peripherals(Some(hrm), false);
        for (rate, ms) in [(130, 3_000), (110, 1_000), (120, 2_000)] {
            let s = HeartRateSample::new(w.id(), hrm, rate, ts(ms));
            assert!(w.record_heart_rate(&s).unwrap().is_applied());
        }
        assert_eq!(w.telemetry().heart_rate().latest(), Some(130));
        assert_eq!(w.telemetry().heart_rate().average(), Some(120));
    }

    #[test]
    fn heart_rate_from_other_device_conflicts() {
        let mut w = workout().with_peripherals(Some(HrmId::new()), false);
        let s = HeartRateSample::new(w.id(), HrmId::new(), 100, ts(1));
        assert_eq!(w.record_heart_rate(&s).unwrap_err().code, ErrorCode::Conflict);
    }

    #[test]
    fn duplicate_heart_rate_is_ignored() {
        let hrm = HrmId::new();
        let mut w = workout().with_peripherals(Some(hrm), false);
        let s = HeartRateSample::new(w.id(), hrm, 100, ts(1)).with_seq(1);
        w.record_heart_rate(&s).unwrap();
        assert_eq!(w.record_heart_rate(&s).unwrap(), FoldOutcome::Duplicate);
        assert_eq!(w.telemetry().heart_rate().count(), 1);
    }

    // Shelter folding

    #[test]
    fn newer_shelter_report_replaces_older() {
        let mut w = workout();
        let id = w.id();
        let late = ShelterStatus::derive(id, Some(ShelterId::new()), Distance::from_meters(5.0), Some(ts(2_000)));
        let early = ShelterStatus::derive(id, None, Distance::UNREACHABLE, Some(ts(1_000)));
        w.record_shelter_status(&late).unwrap();
        w.record_shelter_status(&early).unwrap();
        let report = w.telemetry().shelter().unwrap();
        assert!(!report.available);
        assert_eq!(report.distance, Distance::from_meters(5.0));
    }

    #[test]
    fn untimed_shelter_report_always_replaces() {
        let mut w = workout();
        let id = w.id();
        w.record_shelter_status(&ShelterStatus::derive(id, Some(ShelterId::new()), Distance::from_meters(5.0), Some(ts(9_000))))
            .unwrap();
        w.record_shelter_status(&ShelterStatus::derive(id, None, Distance::UNREACHABLE, None))
            .unwrap();
        assert!(w.telemetry().shelter().unwrap().available);
    }
}
