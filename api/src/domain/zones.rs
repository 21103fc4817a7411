//! Risk-zone reference data
//!
//! Fixed, named regions used to flag forest-overlap risk. The table is
//! immutable reference data loaded once per process and shared without
//! locking; zones are never user-created.
//!
//! Elliptical source regions (the protected areas) are stored as the
//! bounding boxes of their original centre-plus-radius definitions, since
//! containment is an axis-aligned bounding-box test either way.

use serde::Serialize;

use crate::domain::entities::BoundaryPoint;
use crate::domain::geometry::BoundingBox;

/// Land classification of a risk zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneClass {
    Forest,
    Protected,
    Agricultural,
    Water,
}

impl std::fmt::Display for ZoneClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneClass::Forest => write!(f, "forest"),
            ZoneClass::Protected => write!(f, "protected"),
            ZoneClass::Agricultural => write!(f, "agricultural"),
            ZoneClass::Water => write!(f, "water"),
        }
    }
}

/// A fixed reference region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskZone {
    pub name: &'static str,
    pub class: ZoneClass,
    pub bounds: BoundingBox,
    /// Whether overlap with this zone drives the high-risk determination
    pub high_risk: bool,
}

impl RiskZone {
    pub fn contains(&self, point: &BoundaryPoint) -> bool {
        self.bounds.contains(point)
    }
}

/// The process-wide zone table
static ZONES: [RiskZone; 5] = [
    RiskZone {
        name: "Upper Lofa forest block A",
        class: ZoneClass::Forest,
        bounds: BoundingBox::new(6.425, 6.44, -9.39, -9.375),
        high_risk: true,
    },
    RiskZone {
        name: "Upper Lofa forest block B",
        class: ZoneClass::Forest,
        bounds: BoundingBox::new(6.415, 6.435, -9.375, -9.35),
        high_risk: true,
    },
    RiskZone {
        name: "Sapo National Park",
        class: ZoneClass::Protected,
        bounds: BoundingBox::new(5.0, 6.0, -9.0, -8.0),
        high_risk: false,
    },
    RiskZone {
        name: "East Nimba Nature Reserve",
        class: ZoneClass::Protected,
        bounds: BoundingBox::new(7.3, 7.9, -8.8, -8.2),
        high_risk: false,
    },
    RiskZone {
        name: "Grebo National Forest",
        class: ZoneClass::Protected,
        bounds: BoundingBox::new(4.1, 4.9, -8.2, -7.4),
        high_risk: false,
    },
];

/// All reference zones
pub fn all_zones() -> &'static [RiskZone] {
    &ZONES
}

/// The zones whose overlap triggers the high-risk determination
pub fn high_risk_zones() -> impl Iterator<Item = &'static RiskZone> {
    ZONES.iter().filter(|z| z.high_risk)
}

/// First zone containing the point, if any
pub fn find_zone<'a>(
    point: &BoundaryPoint,
    zones: impl IntoIterator<Item = &'a RiskZone>,
) -> Option<&'a RiskZone> {
    zones.into_iter().find(|z| z.contains(point))
}
