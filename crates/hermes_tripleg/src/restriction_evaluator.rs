use jiff::tz::TimeZone;
use serde::Serialize;
use tracing::trace;

use crate::{
    datetime::time_domain::TimeDomain,
    graph::{Access, AccessRestriction, AccessType, ComplexRestriction, GraphId, RestrictionType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionVerdict {
    Allowed,
    Restricted,
    /// The request has no date time, so the time window was not evaluated.
    AllowedNoDateTime,
    CenterTurnLane,
}

/// Evaluation of one access restriction for one lane of an edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneRestrictionCheck {
    pub lane: u32,
    pub restriction_type: AccessType,
    pub modes: u16,
    pub verdict: Option<RestrictionVerdict>,
}

/// Evaluation of a lane restriction spanning several edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexRestrictionCheck {
    pub restriction_type: RestrictionType,
    pub modes: u16,
    pub vias: Vec<GraphId>,
    pub verdict: Option<RestrictionVerdict>,
}

/// Evaluates conditional restrictions for the cost model's access mode at
/// one point in time. Results are informational and never change the path.
#[derive(Debug, Clone)]
pub struct RestrictionEvaluator {
    local_time: Option<i64>,
    time_zone: Option<TimeZone>,
    access_mode: Access,
}

impl RestrictionEvaluator {
    pub fn new(local_time: Option<i64>, time_zone: Option<TimeZone>, access_mode: Access) -> Self {
        RestrictionEvaluator {
            local_time,
            time_zone,
            access_mode,
        }
    }

    /// `None` when there is no time to evaluate against.
    pub fn is_active(&self, domain: TimeDomain) -> Option<bool> {
        let local_time = self.local_time?;
        let time_zone = self.time_zone.as_ref()?;
        Some(domain.is_active(local_time, time_zone))
    }

    fn timed_verdict(
        &self,
        allowed_in_window: bool,
        domain: TimeDomain,
        modes: Access,
    ) -> Option<RestrictionVerdict> {
        if self.local_time.is_none() {
            return Some(RestrictionVerdict::AllowedNoDateTime);
        }

        let verdict = if !self.is_active(domain)? {
            RestrictionVerdict::Allowed
        } else if allowed_in_window == modes.intersects(self.access_mode) {
            RestrictionVerdict::Allowed
        } else {
            RestrictionVerdict::Restricted
        };
        Some(verdict)
    }

    /// Checks `restriction` against every lane of a `|` separated lane list
    /// whose bit is set in the restriction's lane mask.
    pub fn lane_checks(
        &self,
        restriction: &AccessRestriction,
        lanes: &str,
    ) -> Vec<LaneRestrictionCheck> {
        let mut checks = Vec::new();

        for token in lanes.split('|') {
            let Ok(lane) = token.trim().parse::<u32>() else {
                trace!(token, "Skipping lane token");
                continue;
            };
            if !restriction.applies_to_lane(lane) {
                continue;
            }

            let verdict = match restriction.access_type {
                AccessType::CenterLane => Some(RestrictionVerdict::CenterTurnLane),
                AccessType::LaneTimedAllowed => {
                    self.timed_verdict(true, restriction.time_domain(), restriction.modes)
                }
                AccessType::LaneTimedDenied => {
                    self.timed_verdict(false, restriction.time_domain(), restriction.modes)
                }
                AccessType::LaneAllowed | AccessType::LaneDenied => None,
                _ => continue,
            };

            trace!(
                lane,
                restriction_type = ?restriction.access_type,
                modes = restriction.modes.bits(),
                ?verdict,
                "Lane restriction"
            );
            checks.push(LaneRestrictionCheck {
                lane,
                restriction_type: restriction.access_type,
                modes: restriction.modes.bits(),
                verdict,
            });

            if restriction.access_type == AccessType::CenterLane {
                break;
            }
        }

        checks
    }

    pub fn complex_check(&self, restriction: &ComplexRestriction) -> ComplexRestrictionCheck {
        let verdict = match restriction.restriction_type {
            RestrictionType::LaneRestriction => Some(self.lane_restriction_verdict(restriction)),
            _ => None,
        };

        let vias: Vec<GraphId> = restriction.vias().collect();
        trace!(
            restriction_type = ?restriction.restriction_type,
            vias = vias.len(),
            ?verdict,
            "Complex restriction"
        );

        ComplexRestrictionCheck {
            restriction_type: restriction.restriction_type,
            modes: restriction.modes.bits(),
            vias,
            verdict,
        }
    }

    fn lane_restriction_verdict(&self, restriction: &ComplexRestriction) -> RestrictionVerdict {
        if self.local_time.is_none() {
            return RestrictionVerdict::AllowedNoDateTime;
        }
        if !restriction.modes.intersects(self.access_mode) {
            return RestrictionVerdict::Allowed;
        }

        // Without a time domain the restriction always applies.
        let domain = restriction.time_domain.unwrap_or_default();
        match self.is_active(domain) {
            Some(true) => RestrictionVerdict::Restricted,
            _ => RestrictionVerdict::Allowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{Weekday, date};

    use super::*;

    fn wednesday_8am() -> i64 {
        date(2024, 6, 12)
            .at(8, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp()
            .as_second()
    }

    fn morning_rush() -> TimeDomain {
        TimeDomain::builder()
            .with_weekdays(&[Weekday::Wednesday])
            .with_begin_time(7, 0)
            .with_end_time(9, 0)
            .build()
    }

    fn lane_restriction(access_type: AccessType, lanes: u64) -> AccessRestriction {
        AccessRestriction {
            edge_index: 0,
            access_type,
            modes: Access::AUTO,
            value: morning_rush().value(),
            lanes,
        }
    }

    fn evaluator(local_time: Option<i64>) -> RestrictionEvaluator {
        RestrictionEvaluator::new(local_time, Some(TimeZone::UTC), Access::AUTO)
    }

    #[test]
    fn test_timed_denied_active_restricts_flagged_lanes() {
        let restriction = lane_restriction(AccessType::LaneTimedDenied, 0b0110);
        let checks = evaluator(Some(wednesday_8am())).lane_checks(&restriction, "0|1|2|3");

        let lanes: Vec<u32> = checks.iter().map(|c| c.lane).collect();
        assert_eq!(lanes, vec![1, 2]);
        assert!(
            checks
                .iter()
                .all(|c| c.verdict == Some(RestrictionVerdict::Restricted))
        );
    }

    #[test]
    fn test_timed_allowed_outside_window_is_allowed() {
        let restriction = lane_restriction(AccessType::LaneTimedAllowed, 0b1);
        let noon = wednesday_8am() + 4 * 3600;
        let checks = evaluator(Some(noon)).lane_checks(&restriction, "0");

        assert_eq!(checks[0].verdict, Some(RestrictionVerdict::Allowed));
    }

    #[test]
    fn test_timed_allowed_active_for_other_mode_is_restricted() {
        let restriction = lane_restriction(AccessType::LaneTimedAllowed, 0b1);
        let evaluator = RestrictionEvaluator::new(
            Some(wednesday_8am()),
            Some(TimeZone::UTC),
            Access::BICYCLE,
        );

        let checks = evaluator.lane_checks(&restriction, "0");
        assert_eq!(checks[0].verdict, Some(RestrictionVerdict::Restricted));
    }

    #[test]
    fn test_without_date_time_nothing_is_evaluated() {
        for access_type in [AccessType::LaneTimedAllowed, AccessType::LaneTimedDenied] {
            let restriction = lane_restriction(access_type, 0b11);
            let checks = evaluator(None).lane_checks(&restriction, "0|1");

            assert_eq!(checks.len(), 2);
            assert!(
                checks
                    .iter()
                    .all(|c| c.verdict == Some(RestrictionVerdict::AllowedNoDateTime))
            );
        }

        let complex = ComplexRestriction {
            from_id: GraphId::new(0, 1, 0),
            to_id: GraphId::new(0, 1, 2),
            restriction_type: RestrictionType::LaneRestriction,
            modes: Access::AUTO,
            vias: vec![GraphId::new(0, 1, 1)],
            time_domain: Some(morning_rush()),
        };
        assert_eq!(
            evaluator(None).complex_check(&complex).verdict,
            Some(RestrictionVerdict::AllowedNoDateTime)
        );
    }

    #[test]
    fn test_center_lane_stops_at_first_flagged_lane() {
        let restriction = lane_restriction(AccessType::CenterLane, 0b1100);
        let checks = evaluator(None).lane_checks(&restriction, "1|2|3|x");

        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].lane, 2);
        assert_eq!(checks[0].verdict, Some(RestrictionVerdict::CenterTurnLane));
    }

    #[test]
    fn test_untimed_lane_restriction_is_informational() {
        let restriction = lane_restriction(AccessType::LaneDenied, 0b1);
        let checks = evaluator(Some(wednesday_8am())).lane_checks(&restriction, "0|zz|1");

        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].verdict, None);
    }

    #[test]
    fn test_complex_lane_restriction() {
        let vias = vec![GraphId::new(0, 1, 4), GraphId::new(0, 1, 5)];
        let mut complex = ComplexRestriction {
            from_id: GraphId::new(0, 1, 3),
            to_id: GraphId::new(0, 1, 6),
            restriction_type: RestrictionType::LaneRestriction,
            modes: Access::AUTO,
            vias: vias.clone(),
            time_domain: Some(morning_rush()),
        };

        let check = evaluator(Some(wednesday_8am())).complex_check(&complex);
        assert_eq!(check.verdict, Some(RestrictionVerdict::Restricted));
        assert_eq!(check.vias, vias);

        complex.modes = Access::TRUCK;
        let check = evaluator(Some(wednesday_8am())).complex_check(&complex);
        assert_eq!(check.verdict, Some(RestrictionVerdict::Allowed));

        complex.restriction_type = RestrictionType::ComplexLane;
        let check = evaluator(Some(wednesday_8am())).complex_check(&complex);
        assert_eq!(check.verdict, None);
        assert_eq!(check.vias.len(), 2);
    }
}
