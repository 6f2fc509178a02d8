use geo::Point;
use serde::Serialize;
use smallvec::SmallVec;

use crate::{
    attributes_controller::{Attribute, AttributesController},
    constants::UNKNOWN_TRAFFIC_SPEED,
    geometry::{point_along_segment, segment_length},
    graph::TrafficSpeed,
};

/// Per segment samples aligned with the leg shape: sample `i` describes the
/// segment from shape point `i` to `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShapeAttributes {
    /// Milliseconds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time: Vec<u32>,
    /// Decimeters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub length: Vec<u32>,
    /// Decimeters per second.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub speed: Vec<u32>,
}

impl ShapeAttributes {
    /// Empty sample for the break between two disjoint edge shapes.
    pub fn push_gap(&mut self, controller: &AttributesController) {
        if controller.is_enabled(Attribute::ShapeAttributesTime) {
            self.time.push(0);
        }
        if controller.is_enabled(Attribute::ShapeAttributesLength) {
            self.length.push(0);
        }
        if controller.is_enabled(Attribute::ShapeAttributesSpeed) {
            self.speed.push(0);
        }
    }
}

/// Part of an edge covered by the leg.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSection {
    /// Edge length in meters.
    pub length: f64,
    pub source_pct: f64,
    pub target_pct: f64,
    /// Seconds spent on the section.
    pub seconds: f64,
}

impl EdgeSection {
    /// Average speed over the section in meters per second.
    pub fn speed(&self) -> f64 {
        if self.seconds <= 0.0 {
            return 0.0;
        }
        self.length * (self.target_pct - self.source_pct) / self.seconds
    }
}

/// Position along the edge up to which `speed` (m/s) applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBreakpoint {
    pub position: f64,
    pub speed: f64,
}

/// Breakpoints of a section, cut at the live traffic sections when `traffic`
/// is given. The last breakpoint always reaches the end of the section.
pub fn speed_breakpoints(
    section: &EdgeSection,
    traffic: Option<&TrafficSpeed>,
) -> SmallVec<[SpeedBreakpoint; 3]> {
    let speed = section.speed();
    let mut breakpoints: SmallVec<[SpeedBreakpoint; 3]> = SmallVec::new();

    // Traffic speeds may have changed since the path was computed, so every
    // section uses the speed derived from the path's own time.
    if let Some(traffic) = traffic.filter(|traffic| traffic.breakpoint1 > 0) {
        breakpoints.push(SpeedBreakpoint {
            position: traffic.breakpoint1 as f64 / 255.0,
            speed,
        });
        if traffic.breakpoint2 > 0 {
            breakpoints.push(SpeedBreakpoint {
                position: traffic.breakpoint2 as f64 / 255.0,
                speed,
            });
            if traffic.speed3 != UNKNOWN_TRAFFIC_SPEED {
                breakpoints.push(SpeedBreakpoint {
                    position: 1.0,
                    speed,
                });
            }
        }
    }

    if breakpoints
        .last()
        .is_none_or(|last| last.position < section.target_pct)
    {
        breakpoints.push(SpeedBreakpoint {
            position: section.target_pct,
            speed,
        });
    }
    breakpoints
}

/// Emits one sample per segment of `shape[shape_begin..]`, inserting a shape
/// point wherever a speed breakpoint falls inside a segment.
pub fn cut_shape_attributes(
    controller: &AttributesController,
    shape: &mut Vec<Point<f64>>,
    shape_begin: usize,
    section: &EdgeSection,
    breakpoints: &[SpeedBreakpoint],
    attributes: &mut ShapeAttributes,
) {
    if breakpoints.is_empty() {
        return;
    }

    let emit_time = controller.is_enabled(Attribute::ShapeAttributesTime);
    let emit_length = controller.is_enabled(Attribute::ShapeAttributesLength);
    let emit_speed = controller.is_enabled(Attribute::ShapeAttributesSpeed);

    let mut along = section.source_pct;
    let mut cursor = breakpoints
        .iter()
        .position(|breakpoint| along <= breakpoint.position)
        .unwrap_or(breakpoints.len() - 1);

    let mut i = shape_begin + 1;
    while i < shape.len() {
        let mut distance = segment_length(shape[i - 1], shape[i]);
        let mut next_along = if section.length > 0.0 {
            along + distance / section.length
        } else {
            along
        };

        let breakpoint = breakpoints[cursor];
        let mut shift = 0;
        if next_along > breakpoint.position && cursor + 1 < breakpoints.len() {
            let coef = (breakpoint.position - along) / (next_along - along);
            let point = point_along_segment(shape[i - 1], shape[i], coef);
            shape.insert(i, point);
            next_along = breakpoint.position;
            distance *= coef;
            shift = 1;
        }
        along = next_along;

        let time = if breakpoint.speed > 0.0 {
            distance / breakpoint.speed
        } else {
            0.0
        };

        if emit_time {
            attributes.time.push(round(time * 1000.0));
        }
        if emit_length {
            attributes.length.push(round(distance * 10.0));
        }
        if emit_speed {
            let speed = if time > 0.0 { distance * 10.0 / time } else { 0.0 };
            attributes.speed.push(round(speed));
        }

        cursor += shift;
        i += 1;
    }
}

fn round(value: f64) -> u32 {
    (value + 0.5) as u32
}
