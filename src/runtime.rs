//! Event pacing for the terminal front-end.
//!
//! Terminal input arrives on a channel; `Runner` interleaves it with
//! simulation ticks that carry the real time elapsed since the previous tick.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

#[derive(Clone, Debug, PartialEq)]
pub enum ThumpEvent {
    Key(KeyEvent),
    Resize,
    /// Advance the simulation by this many milliseconds
    Tick { elapsed_ms: f64 },
}

/// Forward crossterm key and resize events from a reader thread
pub fn terminal_events() -> Receiver<ThumpEvent> {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || loop {
        let forwarded = match event::read() {
            Ok(CtEvent::Key(key)) => tx.send(ThumpEvent::Key(key)),
            Ok(CtEvent::Resize(_, _)) => tx.send(ThumpEvent::Resize),
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!("terminal event reader stopped: {}", e);
                break;
            }
        };
        if forwarded.is_err() {
            break;
        }
    });

    rx
}

/// Paces ticks at a fixed interval while passing input through.
///
/// Input never postpones a due tick: the wait is always the time left until
/// the next tick, so a held key cannot stall the heart rate.
pub struct Runner {
    events: Receiver<ThumpEvent>,
    interval: Duration,
    last_tick: Instant,
}

impl Runner {
    pub fn new(events: Receiver<ThumpEvent>, interval: Duration) -> Self {
        Self {
            events,
            interval,
            last_tick: Instant::now(),
        }
    }

    /// Next input event, or a tick once the interval has run out
    pub fn step(&mut self) -> ThumpEvent {
        let waited = self.last_tick.elapsed();
        if let Some(remaining) = self.interval.checked_sub(waited) {
            match self.events.recv_timeout(remaining) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Timeout) => {}
                // no more input; keep ticking on schedule
                Err(RecvTimeoutError::Disconnected) => std::thread::sleep(remaining),
            }
        }
        self.tick()
    }

    fn tick(&mut self) -> ThumpEvent {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        ThumpEvent::Tick {
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(c: char) -> ThumpEvent {
        ThumpEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn step_ticks_with_measured_elapsed_time() {
        let (_tx, rx) = mpsc::channel();
        let mut runner = Runner::new(rx, Duration::from_millis(20));

        match runner.step() {
            ThumpEvent::Tick { elapsed_ms } => assert!(elapsed_ms >= 20.0, "{elapsed_ms}"),
            other => panic!("expected tick, got {other:?}"),
        }
    }

    #[test]
    fn step_passes_through_input() {
        let (tx, rx) = mpsc::channel();
        tx.send(ThumpEvent::Resize).unwrap();
        let mut runner = Runner::new(rx, Duration::from_secs(5));

        assert_eq!(runner.step(), ThumpEvent::Resize);
    }

    #[test]
    fn queued_input_does_not_postpone_a_due_tick() {
        let (tx, rx) = mpsc::channel();
        let mut runner = Runner::new(rx, Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(15));
        for _ in 0..5 {
            tx.send(key('2')).unwrap();
        }

        assert_matches::assert_matches!(runner.step(), ThumpEvent::Tick { .. });
        assert_eq!(runner.step(), key('2'));
    }

    #[test]
    fn closed_input_keeps_ticking() {
        let (tx, rx) = mpsc::channel::<ThumpEvent>();
        drop(tx);
        let mut runner = Runner::new(rx, Duration::from_millis(5));

        for _ in 0..3 {
            match runner.step() {
                ThumpEvent::Tick { elapsed_ms } => assert!(elapsed_ms >= 5.0, "{elapsed_ms}"),
                other => panic!("expected tick, got {other:?}"),
            }
        }
    }
}
