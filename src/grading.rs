use serde::{Deserialize, Serialize};

use crate::error::{Result, ThumpError};

/// Letter grade for a completed challenge
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn parse(letter: &str) -> Option<Self> {
        match letter {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            "F" => Some(Grade::F),
            _ => None,
        }
    }

    /// Grade points on a 4.0 scale (A = 4 down to F = 0)
    pub fn points(self) -> f64 {
        match self {
            Grade::A => 4.0,
            Grade::B => 3.0,
            Grade::C => 2.0,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }

    /// Nearest letter for an average of grade points
    pub fn from_points(points: f64) -> Self {
        if points >= 3.5 {
            Grade::A
        } else if points >= 2.5 {
            Grade::B
        } else if points >= 1.5 {
            Grade::C
        } else if points >= 0.5 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Time in zone as a percentage of the goal. Not capped.
pub fn percentage(time_in_zone: f64, goal_duration: f64) -> Result<f64> {
    if !goal_duration.is_finite() || goal_duration <= 0.0 {
        return Err(ThumpError::InvalidGoalDuration(goal_duration));
    }
    Ok((time_in_zone / goal_duration) * 100.0)
}

/// Percentage capped at 100 for display
pub fn display_percentage(time_in_zone: f64, goal_duration: f64) -> Result<f64> {
    Ok(percentage(time_in_zone, goal_duration)?.min(100.0))
}

/// Grade accumulated zone time against the goal, highest threshold first.
pub fn grade(time_in_zone: f64, goal_duration: f64) -> Result<Grade> {
    let pct = percentage(time_in_zone, goal_duration)?;
    let letter = if pct >= 100.0 {
        Grade::A
    } else if pct >= 85.0 {
        Grade::B
    } else if pct >= 70.0 {
        Grade::C
    } else if pct >= 60.0 {
        Grade::D
    } else {
        Grade::F
    };
    Ok(letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade(60.0, 100.0).unwrap(), Grade::D);
        assert_eq!(grade(59.999, 100.0).unwrap(), Grade::F);
        assert_eq!(grade(70.0, 100.0).unwrap(), Grade::C);
        assert_eq!(grade(85.0, 100.0).unwrap(), Grade::B);
        assert_eq!(grade(100.0, 100.0).unwrap(), Grade::A);
    }

    #[test]
    fn test_over_achievement_caps_at_a() {
        assert_eq!(grade(150.0, 100.0).unwrap(), Grade::A);
        assert_eq!(percentage(150.0, 100.0).unwrap(), 150.0);
        assert_eq!(display_percentage(150.0, 100.0).unwrap(), 100.0);
    }

    #[test]
    fn test_zero_time_is_f() {
        assert_eq!(grade(0.0, 60.0).unwrap(), Grade::F);
    }

    #[test]
    fn test_non_positive_goal_is_a_fault() {
        assert_matches!(grade(10.0, 0.0), Err(ThumpError::InvalidGoalDuration(_)));
        assert_matches!(grade(10.0, -5.0), Err(ThumpError::InvalidGoalDuration(_)));
        assert_matches!(grade(10.0, f64::NAN), Err(ThumpError::InvalidGoalDuration(_)));
    }

    #[test]
    fn test_regrading_is_idempotent() {
        let first = grade(47.3, 60.0).unwrap();
        let second = grade(47.3, 60.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_and_display() {
        for letter in Grade::ALL {
            assert_eq!(Grade::parse(&letter.to_string()), Some(letter));
        }
        assert_eq!(Grade::parse("E"), None);
        assert!(Grade::A < Grade::F);
    }

    #[test]
    fn test_points_round_trip_through_letters() {
        for letter in Grade::ALL {
            assert_eq!(Grade::from_points(letter.points()), letter);
        }
        assert_eq!(Grade::from_points(3.5), Grade::A);
        assert_eq!(Grade::from_points(3.49), Grade::B);
        assert_eq!(Grade::from_points(0.49), Grade::F);
    }
}
