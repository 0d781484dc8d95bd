//! Static pitch markings
//!
//! Reference geometry is laid out on the 120x80 pitch and scaled per axis
//! for other dimensions. Radii scale with the x axis so circles stay round.

use serde::Serialize;

use crate::pitch::{PitchDimensions, Position, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::style::Color;
use crate::surface::Element;

const PENALTY_AREA_DEPTH: f64 = 14.6;
const PENALTY_AREA_Y: f64 = 22.3;
const PENALTY_AREA_SPAN: f64 = 35.3;
const GOAL_AREA_DEPTH: f64 = 4.9;
const GOAL_AREA_Y: f64 = 32.0;
const GOAL_AREA_SPAN: f64 = 16.0;
const CENTER_CIRCLE_RADIUS: f64 = 9.1;
const SPOT_RADIUS: f64 = 0.33;
const PENALTY_SPOT_X: f64 = 9.7;
const PENALTY_ARC_DIAMETER: f64 = 16.2;

/// Which pitch feature a primitive draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkingKind {
    Boundary,
    LeftPenaltyArea,
    RightPenaltyArea,
    CenterLine,
    LeftGoalArea,
    RightGoalArea,
    CenterCircle,
    KickoffSpot,
    LeftPenaltySpot,
    RightPenaltySpot,
    LeftPenaltyArc,
    RightPenaltyArc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchMarking {
    pub kind: MarkingKind,
    pub element: Element,
}

/// Build the fixed marking set for `dims`, in draw order
pub fn build_markings(dims: &PitchDimensions) -> Vec<PitchMarking> {
    let sx = dims.width / DEFAULT_WIDTH;
    let sy = dims.height / DEFAULT_HEIGHT;
    let w = dims.width;
    let h = dims.height;
    let center = dims.center();

    let rect = |x: f64, y: f64, width: f64, height: f64, stroke: Color| Element::Rect {
        origin: Position::new(x, y),
        width,
        height,
        stroke,
        fill: None,
    };
    let spot = |c: Position| Element::Circle {
        center: c,
        radius: SPOT_RADIUS * sx,
        stroke: Color::BLACK,
        fill: Some(Color::BLACK),
    };
    let arc = |c: Position, theta1: f64, theta2: f64| Element::Arc {
        center: c,
        width: PENALTY_ARC_DIAMETER * sx,
        height: PENALTY_ARC_DIAMETER * sx,
        theta1,
        theta2,
        stroke: Color::BLACK,
    };

    let left_spot = Position::new(PENALTY_SPOT_X * sx, center.y);
    let right_spot = Position::new(w - PENALTY_SPOT_X * sx, center.y);

    let penalty_depth = PENALTY_AREA_DEPTH * sx;
    let goal_depth = GOAL_AREA_DEPTH * sx;

    vec![
        PitchMarking { kind: MarkingKind::Boundary, element: rect(0.0, 0.0, w, h, Color::GREY) },
        PitchMarking {
            kind: MarkingKind::LeftPenaltyArea,
            element: rect(
                0.0,
                PENALTY_AREA_Y * sy,
                penalty_depth,
                PENALTY_AREA_SPAN * sy,
                Color::BLACK,
            ),
        },
        PitchMarking {
            kind: MarkingKind::RightPenaltyArea,
            element: rect(
                w - penalty_depth,
                PENALTY_AREA_Y * sy,
                penalty_depth,
                PENALTY_AREA_SPAN * sy,
                Color::BLACK,
            ),
        },
        PitchMarking {
            kind: MarkingKind::CenterLine,
            element: Element::Connector {
                start: Position::new(center.x, 0.0),
                end: Position::new(center.x, h),
                color: Color::BLACK,
            },
        },
        PitchMarking {
            kind: MarkingKind::LeftGoalArea,
            element: rect(0.0, GOAL_AREA_Y * sy, goal_depth, GOAL_AREA_SPAN * sy, Color::BLACK),
        },
        PitchMarking {
            kind: MarkingKind::RightGoalArea,
            element: rect(
                w - goal_depth,
                GOAL_AREA_Y * sy,
                goal_depth,
                GOAL_AREA_SPAN * sy,
                Color::BLACK,
            ),
        },
        PitchMarking {
            kind: MarkingKind::CenterCircle,
            element: Element::Circle {
                center,
                radius: CENTER_CIRCLE_RADIUS * sx,
                stroke: Color::BLACK,
                fill: None,
            },
        },
        PitchMarking { kind: MarkingKind::KickoffSpot, element: spot(center) },
        PitchMarking { kind: MarkingKind::LeftPenaltySpot, element: spot(left_spot) },
        PitchMarking { kind: MarkingKind::RightPenaltySpot, element: spot(right_spot) },
        // Arcs bulge out of the penalty area towards the center
        PitchMarking { kind: MarkingKind::LeftPenaltyArc, element: arc(left_spot, 310.0, 50.0) },
        PitchMarking {
            kind: MarkingKind::RightPenaltyArc,
            element: arc(right_spot, 130.0, 230.0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ElementKind;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn find(markings: &[PitchMarking], kind: MarkingKind) -> &Element {
        &markings.iter().find(|m| m.kind == kind).unwrap().element
    }

    #[test]
    fn test_marking_set_is_fixed() {
        let markings = build_markings(&PitchDimensions::default());
        assert_eq!(markings.len(), 12);

        let count = |k: ElementKind| markings.iter().filter(|m| m.element.kind() == k).count();
        assert_eq!(count(ElementKind::Rect), 5);
        assert_eq!(count(ElementKind::Connector), 1);
        assert_eq!(count(ElementKind::Circle), 4);
        assert_eq!(count(ElementKind::Arc), 2);
    }

    #[test]
    fn test_default_right_penalty_area() {
        let markings = build_markings(&PitchDimensions::default());
        match find(&markings, MarkingKind::RightPenaltyArea) {
            Element::Rect { origin, width, height, fill, .. } => {
                assert!(approx(origin.x, 105.4));
                assert!(approx(origin.y, 22.3));
                assert!(approx(*width, 14.6));
                assert!(approx(*height, 35.3));
                assert!(fill.is_none());
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_default_spots_and_arcs() {
        let markings = build_markings(&PitchDimensions::default());
        match find(&markings, MarkingKind::RightPenaltySpot) {
            Element::Circle { center, radius, fill, .. } => {
                assert!(approx(center.x, 110.3));
                assert!(approx(center.y, 40.0));
                assert!(approx(*radius, 0.33));
                assert!(fill.is_some());
            }
            other => panic!("unexpected element {:?}", other),
        }
        match find(&markings, MarkingKind::LeftPenaltyArc) {
            Element::Arc { center, width, theta1, theta2, .. } => {
                assert!(approx(center.x, 9.7));
                assert!(approx(*width, 16.2));
                assert_eq!((*theta1, *theta2), (310.0, 50.0));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_markings_scale_with_dimensions() {
        let dims = PitchDimensions::new(105.0, 68.0).unwrap();
        let markings = build_markings(&dims);
        assert_eq!(markings.len(), 12);

        match find(&markings, MarkingKind::CenterLine) {
            Element::Connector { start, end, .. } => {
                assert!(approx(start.x, 52.5));
                assert!(approx(end.y, 68.0));
            }
            other => panic!("unexpected element {:?}", other),
        }
        match find(&markings, MarkingKind::RightGoalArea) {
            Element::Rect { origin, width, .. } => {
                assert!(approx(origin.x + width, 105.0));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }
}
