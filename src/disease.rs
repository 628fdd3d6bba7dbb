//! Water-stress driven disease assignment, control advice and yield loss.

use serde::Serialize;

/// Wheat diseases tied to season-to-date water stress windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    FusariumHeadBlight,
    LeafBlotch,
    PowderyMildew,
    Rust,
}

/// Irrigation adjustment recommended for the current stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    NoAction,
    Irrigate,
    ReduceIrrigation,
}

struct DiseaseRule {
    disease: Disease,
    scarcity: (f64, f64),
    excess: (f64, f64),
}

impl DiseaseRule {
    fn matches(&self, scarcity: f64, excess: f64) -> bool {
        scarcity >= self.scarcity.0
            && scarcity <= self.scarcity.1
            && excess >= self.excess.0
            && excess <= self.excess.1
    }
}

/// Rules are checked in order; the first match wins.
const DISEASE_RULES: &[DiseaseRule] = &[
    DiseaseRule {
        disease: Disease::FusariumHeadBlight,
        scarcity: (300.0, 350.0),
        excess: (600.0, 650.0),
    },
    DiseaseRule {
        disease: Disease::LeafBlotch,
        scarcity: (250.0, 300.0),
        excess: (550.0, 600.0),
    },
    DiseaseRule {
        disease: Disease::PowderyMildew,
        scarcity: (200.0, 250.0),
        excess: (500.0, 550.0),
    },
    DiseaseRule {
        disease: Disease::Rust,
        scarcity: (200.0, 250.0),
        excess: (450.0, 500.0),
    },
];

fn rule_for(disease: Disease) -> &'static DiseaseRule {
    match disease {
        Disease::FusariumHeadBlight => &DISEASE_RULES[0],
        Disease::LeafBlotch => &DISEASE_RULES[1],
        Disease::PowderyMildew => &DISEASE_RULES[2],
        Disease::Rust => &DISEASE_RULES[3],
    }
}

/// Disease label, control advice and sickness flag for one day.
///
/// `is_sick` follows the control action, not the disease label: a crop
/// whose stress sits inside a disease window gets `no_action` advice and
/// reads as healthy until the stress leaves the window again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiseaseAssessment {
    pub disease: Option<Disease>,
    pub control: ControlAction,
    pub is_sick: bool,
}

/// Assess today's stress totals against the disease windows.
pub fn assess(scarcity: f64, excess: f64) -> DiseaseAssessment {
    let disease = DISEASE_RULES
        .iter()
        .find(|rule| rule.matches(scarcity, excess))
        .map(|rule| rule.disease);
    let control = control_for(disease, scarcity, excess);
    DiseaseAssessment { disease, control, is_sick: control != ControlAction::NoAction }
}

/// Control advice for a known disease against today's stress totals.
pub fn control_for(disease: Option<Disease>, scarcity: f64, excess: f64) -> ControlAction {
    let rule = match disease {
        Some(disease) => rule_for(disease),
        None => return ControlAction::NoAction,
    };
    if scarcity < rule.scarcity.0 {
        ControlAction::Irrigate
    } else if excess > rule.excess.1 {
        ControlAction::ReduceIrrigation
    } else {
        ControlAction::NoAction
    }
}

/// Harvest remaining after the season's water stress, floored at zero.
pub fn yield_effect(previous: f64, accumulated_excess: f64, accumulated_scarcity: f64) -> f64 {
    (previous - accumulated_excess - accumulated_scarcity).max(0.0)
}
