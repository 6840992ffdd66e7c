//! Request/response adapter speaking JSON lines.
//!
//! One request object per input line, one response object per output line.
//! Every response carries `"ok"`; failures add `"error"` and never end the loop.

use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::insights::GradeInsights;
use crate::service::SessionService;
use crate::session::TickOutcome;
use crate::stats::ResultsDb;
use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Start {
        session: String,
        #[serde(default)]
        user: Option<String>,
    },
    SetChallenge {
        session: String,
        challenge_id: String,
    },
    SetIntensity {
        session: String,
        /// Absent and unknown tokens keep the previous intensity
        #[serde(default)]
        intensity: String,
    },
    Tick {
        session: String,
        delta_ms: f64,
    },
    Snapshot {
        session: String,
    },
    Detach {
        session: String,
    },
    Stop {
        session: String,
    },
    Resume {
        session: String,
    },
    End {
        session: String,
    },
    Challenges,
    GradeInsights,
    Results {
        #[serde(default)]
        user: Option<String>,
    },
}

fn outcome_name(outcome: &TickOutcome) -> &'static str {
    match outcome {
        TickOutcome::Free => "free",
        TickOutcome::InProgress => "in_progress",
        TickOutcome::Completed(_) => "completed",
        TickOutcome::Frozen => "frozen",
        TickOutcome::Paused => "paused",
    }
}

pub struct ProtocolHandler<S: SessionStore> {
    service: SessionService<S, ResultsDb>,
    insights: GradeInsights,
    default_user: String,
}

impl<S: SessionStore> ProtocolHandler<S> {
    pub fn new(
        service: SessionService<S, ResultsDb>,
        insights: GradeInsights,
        default_user: impl Into<String>,
    ) -> Self {
        Self {
            service,
            insights,
            default_user: default_user.into(),
        }
    }

    pub fn service(&self) -> &SessionService<S, ResultsDb> {
        &self.service
    }

    /// Handle one request line and produce one response value
    pub fn handle_line(&mut self, line: &str) -> Value {
        let request = match serde_json::from_str::<Request>(line) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("rejected request line: {}", e);
                return json!({ "ok": false, "error": format!("bad request: {e}") });
            }
        };

        match self.handle(request) {
            Ok(value) => value,
            Err(e) => json!({ "ok": false, "error": e.to_string() }),
        }
    }

    pub fn handle(&mut self, request: Request) -> Result<Value> {
        let value = match request {
            Request::Start { session, user } => {
                let user = user.unwrap_or_else(|| self.default_user.clone());
                let snapshot = self.service.start(&session, &user)?;
                json!({ "ok": true, "session": snapshot })
            }
            Request::SetChallenge {
                session,
                challenge_id,
            } => {
                let snapshot = self.service.attach_challenge(&session, &challenge_id)?;
                json!({ "ok": true, "session": snapshot })
            }
            Request::SetIntensity { session, intensity } => {
                let snapshot = self.service.set_intensity(&session, &intensity)?;
                json!({ "ok": true, "session": snapshot })
            }
            Request::Tick { session, delta_ms } => {
                let (outcome, snapshot) = self.service.tick(&session, delta_ms)?;
                let mut value = json!({
                    "ok": true,
                    "outcome": outcome_name(&outcome),
                    "session": snapshot,
                });
                if let TickOutcome::Completed(result) = &outcome {
                    value["result"] = serde_json::to_value(result)?;
                    value["insight"] = serde_json::to_value(self.insights.get(result.grade))?;
                }
                value
            }
            Request::Snapshot { session } => {
                json!({ "ok": true, "session": self.service.snapshot(&session)? })
            }
            Request::Detach { session } => {
                json!({ "ok": true, "session": self.service.detach(&session)? })
            }
            Request::Stop { session } => {
                json!({ "ok": true, "session": self.service.stop(&session)? })
            }
            Request::Resume { session } => {
                json!({ "ok": true, "session": self.service.resume(&session)? })
            }
            Request::End { session } => {
                self.service.end(&session)?;
                json!({ "ok": true })
            }
            Request::Challenges => {
                json!({ "ok": true, "challenges": self.service.catalog() })
            }
            Request::GradeInsights => {
                json!({ "ok": true, "grade_insights": &self.insights })
            }
            Request::Results { user } => {
                let user = user.unwrap_or_else(|| self.default_user.clone());
                let results = self.service.sink().results_for(&user)?;
                json!({ "ok": true, "results": results })
            }
        };
        Ok(value)
    }

    /// Serve requests until the input closes
    pub fn serve<Rd: BufRead, W: Write>(&mut self, input: Rd, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line);
            serde_json::to_writer(&mut output, &response)?;
            writeln!(output)?;
            output.flush()?;
        }
        tracing::info!(
            remaining_sessions = self.service.session_count(),
            "request stream closed"
        );
        Ok(())
    }
}
