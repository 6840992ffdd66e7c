use serde::Serialize;

use crate::challenge::{ChallengeDef, ChallengeProgress};
use crate::error::Result;
use crate::grading::grade;
use crate::intensity::select_intensity;
use crate::simulation::{advance, SimulationState};
use crate::stats::ChallengeResult;

/// Lifecycle phase of a session. A session that does not exist yet is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Running,
    ChallengeActive,
    ChallengeCompleted,
}

/// A challenge attached to a session together with its progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveChallenge {
    pub definition: ChallengeDef,
    pub progress: ChallengeProgress,
}

/// What a tick did to challenge bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No challenge attached
    Free,
    InProgress,
    /// This tick reached the total duration and produced a grade
    Completed(ChallengeResult),
    /// Challenge already graded; only the heart rate moved
    Frozen,
    /// Session is paused and ignored the tick
    Paused,
}

/// One user's simulation plus challenge state machine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    #[serde(flatten)]
    pub simulation: SimulationState,
    phase: Phase,
    challenge: Option<ActiveChallenge>,
    paused: bool,
}

impl Session {
    /// Create a running session seeded at rest
    pub fn new() -> Self {
        Self {
            simulation: SimulationState::new(),
            phase: Phase::Running,
            challenge: None,
            paused: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn challenge(&self) -> Option<&ActiveChallenge> {
        self.challenge.as_ref()
    }

    /// Owned copy of the current state, detached from further ticks
    pub fn snapshot(&self) -> Session {
        self.clone()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Attach a challenge, restarting progress even if one was already graded.
    ///
    /// An invalid definition is rejected and leaves the session untouched.
    pub fn attach_challenge(&mut self, definition: ChallengeDef) -> Result<()> {
        definition.validate()?;
        self.challenge = Some(ActiveChallenge {
            definition,
            progress: ChallengeProgress::default(),
        });
        self.phase = Phase::ChallengeActive;
        Ok(())
    }

    /// Drop any attached challenge and return to free running.
    pub fn detach(&mut self) {
        self.challenge = None;
        self.phase = Phase::Running;
    }

    /// Route an intensity request; phase is unaffected.
    pub fn set_intensity(&mut self, requested: &str) {
        select_intensity(&mut self.simulation, requested);
    }

    /// Apply `delta_ms` of elapsed time.
    ///
    /// The tick that crosses the total duration accrues its full delta before
    /// grading; afterwards progress is frozen while the heart rate keeps moving.
    pub fn tick(&mut self, delta_ms: f64) -> Result<TickOutcome> {
        if self.paused {
            return Ok(TickOutcome::Paused);
        }

        advance(&mut self.simulation, delta_ms);
        self.simulation
            .history
            .push(self.simulation.current_heart_rate);

        let Some(active) = self.challenge.as_mut() else {
            return Ok(TickOutcome::Free);
        };
        if active.progress.completed {
            return Ok(TickOutcome::Frozen);
        }

        let dt = delta_ms.max(0.0) / 1000.0;
        let elapsed_time = active.progress.elapsed_time + dt;
        let time_in_zone = if self.simulation.zone == active.definition.target_zone {
            active.progress.time_in_zone + dt
        } else {
            active.progress.time_in_zone
        };

        if elapsed_time < active.definition.total_duration {
            active.progress.elapsed_time = elapsed_time;
            active.progress.time_in_zone = time_in_zone;
            return Ok(TickOutcome::InProgress);
        }

        // progress is only committed once grading succeeds
        let letter = grade(time_in_zone, active.definition.goal_duration)?;
        active.progress = ChallengeProgress {
            elapsed_time,
            time_in_zone,
            completed: true,
            grade: Some(letter),
        };
        self.phase = Phase::ChallengeCompleted;

        Ok(TickOutcome::Completed(ChallengeResult {
            challenge_id: active.definition.id.clone(),
            time_achieved: time_in_zone,
            grade: letter,
        }))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::test_challenge;
    use crate::error::ThumpError;
    use crate::grading::Grade;
    use crate::intensity::Intensity;
    use crate::simulation::HISTORY_CAPACITY;
    use crate::zone::Zone;
    use assert_matches::assert_matches;

    fn run_until_complete(session: &mut Session, delta_ms: f64) -> ChallengeResult {
        for _ in 0..100_000 {
            if let TickOutcome::Completed(result) = session.tick(delta_ms).unwrap() {
                return result;
            }
        }
        panic!("challenge never completed");
    }

    #[test]
    fn test_new_session_is_running_at_rest() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.simulation.current_heart_rate, 70.0);
        assert_eq!(session.simulation.zone, Zone::Resting);
        assert_eq!(session.simulation.history.to_vec(), vec![70.0]);
        assert!(session.challenge().is_none());
    }

    #[test]
    fn test_cardio_scenario_grades_once_and_freezes() {
        let mut session = Session::new();
        session.attach_challenge(test_challenge(Zone::Cardio, 60.0, 90.0)).unwrap();
        session.set_intensity("jog");
        assert_eq!(session.phase(), Phase::ChallengeActive);

        let result = run_until_complete(&mut session, 100.0);
        let progress = session.challenge().unwrap().progress.clone();

        assert_eq!(session.phase(), Phase::ChallengeCompleted);
        assert!(progress.completed);
        assert!(progress.elapsed_time >= 90.0);
        assert_eq!(
            progress.grade,
            Some(grade(progress.time_in_zone, 60.0).unwrap())
        );
        assert_eq!(result.grade, progress.grade.unwrap());
        assert_eq!(result.time_achieved, progress.time_in_zone);
        // jog reaches cardio within a couple of seconds and stays there
        assert_eq!(result.grade, Grade::A);

        for _ in 0..50 {
            assert_eq!(session.tick(100.0).unwrap(), TickOutcome::Frozen);
        }
        let after = session.challenge().unwrap().progress.clone();
        assert_eq!(after, progress);
    }

    #[test]
    fn test_rest_never_reaches_cardio() {
        let mut session = Session::new();
        session.attach_challenge(test_challenge(Zone::Cardio, 60.0, 90.0)).unwrap();

        let result = run_until_complete(&mut session, 100.0);
        assert_eq!(result.grade, Grade::F);
        assert_eq!(result.time_achieved, 0.0);
    }

    #[test]
    fn test_crossing_tick_accrues_full_delta() {
        let mut session = Session::new();
        session.simulation.current_heart_rate = 135.0;
        session.simulation.target_heart_rate = 135.0;
        session.attach_challenge(test_challenge(Zone::Cardio, 1.0, 1.0)).unwrap();

        assert_eq!(session.tick(600.0).unwrap(), TickOutcome::InProgress);
        let outcome = session.tick(600.0).unwrap();
        assert_matches!(outcome, TickOutcome::Completed(_));

        let progress = &session.challenge().unwrap().progress;
        assert!((progress.elapsed_time - 1.2).abs() < 1e-12);
        assert!((progress.time_in_zone - 1.2).abs() < 1e-12);
        assert_eq!(progress.grade, Some(Grade::A));
    }

    #[test]
    fn test_reattach_restarts_progress() {
        let mut session = Session::new();
        session.attach_challenge(test_challenge(Zone::Resting, 1.0, 2.0)).unwrap();
        run_until_complete(&mut session, 500.0);
        assert_eq!(session.phase(), Phase::ChallengeCompleted);

        session.attach_challenge(test_challenge(Zone::Resting, 1.0, 2.0)).unwrap();
        assert_eq!(session.phase(), Phase::ChallengeActive);
        assert_eq!(
            session.challenge().unwrap().progress,
            ChallengeProgress::default()
        );
    }

    #[test]
    fn test_detach_returns_to_running() {
        let mut session = Session::new();
        session.attach_challenge(test_challenge(Zone::Cardio, 60.0, 90.0)).unwrap();
        session.detach();
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.challenge().is_none());
        assert_eq!(session.tick(100.0).unwrap(), TickOutcome::Free);
    }

    #[test]
    fn test_intensity_does_not_change_phase_or_zone() {
        let mut session = Session::new();
        session.attach_challenge(test_challenge(Zone::Peak, 30.0, 120.0)).unwrap();
        session.set_intensity("sprint");
        assert_eq!(session.phase(), Phase::ChallengeActive);
        assert_eq!(session.simulation.intensity, Intensity::Sprint);
        assert_eq!(session.simulation.zone, Zone::Resting);
        assert_eq!(session.simulation.heart_rate_velocity, 0.0);

        session.set_intensity("invalid");
        assert_eq!(session.simulation.intensity, Intensity::Sprint);
        assert_eq!(session.simulation.target_heart_rate, 175.0);
    }

    #[test]
    fn test_negative_delta_accrues_nothing() {
        let mut session = Session::new();
        session.attach_challenge(test_challenge(Zone::Resting, 10.0, 20.0)).unwrap();
        session.tick(-500.0).unwrap();
        let progress = &session.challenge().unwrap().progress;
        assert_eq!(progress.elapsed_time, 0.0);
        assert_eq!(progress.time_in_zone, 0.0);
        assert_eq!(session.simulation.current_heart_rate, 70.0);
    }

    #[test]
    fn test_history_keeps_most_recent_samples() {
        let mut session = Session::new();
        session.set_intensity("sprint");
        for _ in 0..(HISTORY_CAPACITY + 40) {
            session.tick(100.0).unwrap();
        }
        let history = session.simulation.history.to_vec();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(
            history.last().copied(),
            Some(session.simulation.current_heart_rate)
        );
        assert!(history.windows(2).all(|w| w[0] <= w[1]));
        assert!(history[0] > 70.0);
    }

    #[test]
    fn test_paused_session_ignores_ticks() {
        let mut session = Session::new();
        session.set_intensity("sprint");
        session.pause();
        assert_eq!(session.tick(1_000.0).unwrap(), TickOutcome::Paused);
        assert_eq!(session.simulation.current_heart_rate, 70.0);
        assert_eq!(session.simulation.history.len(), 1);

        session.resume();
        session.tick(1_000.0).unwrap();
        assert!(session.simulation.current_heart_rate > 70.0);
    }

    #[test]
    fn test_invalid_challenge_is_rejected_on_attach() {
        let mut session = Session::new();
        assert_matches!(
            session.attach_challenge(test_challenge(Zone::Resting, 0.0, 0.5)),
            Err(ThumpError::InvalidChallenge { .. })
        );
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.challenge().is_none());
        assert_eq!(session.tick(1_000.0).unwrap(), TickOutcome::Free);
    }

    #[test]
    fn test_failed_grading_leaves_progress_untouched() {
        let mut session = Session::new();
        session.challenge = Some(ActiveChallenge {
            definition: test_challenge(Zone::Resting, 0.0, 0.5),
            progress: ChallengeProgress::default(),
        });
        session.phase = Phase::ChallengeActive;

        for _ in 0..2 {
            assert_matches!(
                session.tick(1_000.0),
                Err(ThumpError::InvalidGoalDuration(_))
            );
        }
        let progress = &session.challenge().unwrap().progress;
        assert_eq!(progress, &ChallengeProgress::default());
        assert_eq!(session.phase(), Phase::ChallengeActive);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut session = Session::new();
        session.set_intensity("jog");
        let before = session.snapshot();
        session.tick(1_000.0).unwrap();
        assert_eq!(before.simulation.current_heart_rate, 70.0);
        assert_ne!(before, session);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut session = Session::new();
        session.attach_challenge(test_challenge(Zone::Cardio, 60.0, 90.0)).unwrap();
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["phase"], "challenge_active");
        assert_eq!(value["current_heart_rate"], 70.0);
        assert_eq!(value["zone"], "resting");
        assert_eq!(value["challenge"]["definition"]["target_zone"], "cardio");
        assert_eq!(value["challenge"]["progress"]["grade"], serde_json::Value::Null);
    }
}
