//! # Solar-system body table
//!
//! Static data for every body the planet calculator knows: J2000 mean elements with
//! secular rates, the empirical magnitude law, and display style. The table is keyed by
//! the closed [`Body`] enum and matched exhaustively, so adding a body is a compile-time
//! change.
//!
//! Elements are degrees / AU, rates per Julian century. The Earth's own elements
//! ([`EARTH`], Earth–Moon barycenter) are only used to move the origin to the Earth when
//! geocentric positions are requested.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::AstronomicalUnit;
use crate::orbit_type::{OrbitalElements, Secular};

/// Broad classification of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Planet,
    DwarfPlanet,
    Asteroid,
}

/// Bodies handled by [`planet_positions`](crate::ephemeris::planets::planet_positions), in
/// output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Ceres,
    Pallas,
    Juno,
}

/// `m = base + slope · log10(d² [/ phase])`, with `d` the distance in AU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeLaw {
    pub base: f64,
    pub slope: f64,
    /// Divide `d²` by the phase value (inner planets).
    pub phase_dependent: bool,
}

impl MagnitudeLaw {
    /// Apparent magnitude for a distance (AU) and a phase value in `[0, 1]`.
    ///
    /// A phase-dependent law at phase value `0` gives `+∞` (unlit disk).
    pub fn apparent_magnitude(&self, distance: AstronomicalUnit, phase_value: f64) -> f64 {
        let mut x = distance * distance;
        if self.phase_dependent {
            x /= phase_value;
        }
        self.base + self.slope * x.log10()
    }
}

/// Everything the crate knows about one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyData {
    pub name: &'static str,
    pub kind: BodyKind,
    pub elements: OrbitalElements,
    pub magnitude: MagnitudeLaw,
    /// Outer bodies are always reported with a "Full" phase.
    pub always_full: bool,
    /// Display color, `#RRGGBB`.
    pub color: &'static str,
    pub symbol: &'static str,
    /// Mean diameter (km), where tabulated.
    pub diameter_km: Option<f64>,
    /// Sidereal orbital period (years), where tabulated.
    pub orbital_period_years: Option<f64>,
    /// Short caption for info panels.
    pub description: Option<&'static str>,
}

const DEFAULT_COLOR: &str = "#FFFFFF";

/// Earth–Moon barycenter mean elements.
pub const EARTH: OrbitalElements = OrbitalElements {
    semi_major_axis: Secular::fixed(1.000_002_61),
    eccentricity: Secular::new(0.016_711_23, -0.000_043_92),
    inclination: Secular::new(-0.000_015_31, -0.012_946_68),
    ascending_node_longitude: Secular::fixed(0.0),
    perihelion_longitude: Secular::new(102.937_681_93, 0.323_273_64),
    mean_longitude: Secular::new(100.464_571_66, 35_999.372_449_81),
};

static MERCURY: BodyData = BodyData {
    name: "Mercury",
    kind: BodyKind::Planet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(0.387_098),
        eccentricity: Secular::new(0.205_635, 0.000_020),
        inclination: Secular::fixed(7.004_986),
        ascending_node_longitude: Secular::new(48.330_893, -0.125_234),
        perihelion_longitude: Secular::new(77.456_119, 0.158_902),
        mean_longitude: Secular::new(252.250_906, 149_472.674_635),
    },
    magnitude: MagnitudeLaw {
        base: -0.42,
        slope: 3.80,
        phase_dependent: true,
    },
    always_full: false,
    color: "#A0A0A0",
    symbol: "☿",
    diameter_km: Some(4_879.0),
    orbital_period_years: Some(0.241),
    description: Some("Closest planet to the Sun"),
};

static VENUS: BodyData = BodyData {
    name: "Venus",
    kind: BodyKind::Planet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(0.723_330),
        eccentricity: Secular::new(0.006_773, -0.000_042),
        inclination: Secular::fixed(3.394_662),
        ascending_node_longitude: Secular::new(76.679_920, -0.278_008),
        perihelion_longitude: Secular::new(131.563_707, 0.048_646),
        mean_longitude: Secular::new(181.979_801, 58_517.815_676),
    },
    magnitude: MagnitudeLaw {
        base: -4.40,
        slope: 0.09,
        phase_dependent: true,
    },
    always_full: false,
    color: "#FFF8DC",
    symbol: "♀",
    diameter_km: None,
    orbital_period_years: None,
    description: None,
};

static MARS: BodyData = BodyData {
    name: "Mars",
    kind: BodyKind::Planet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(1.523_688),
        eccentricity: Secular::new(0.093_405, 0.000_092),
        inclination: Secular::fixed(1.849_726),
        ascending_node_longitude: Secular::new(49.558_093, -0.295_025),
        perihelion_longitude: Secular::new(336.060_234, 0.439_292),
        mean_longitude: Secular::new(355.433_275, 19_140.299_331),
    },
    magnitude: MagnitudeLaw {
        base: -1.52,
        slope: 1.60,
        phase_dependent: false,
    },
    always_full: false,
    color: "#CD5C5C",
    symbol: "♂",
    diameter_km: None,
    orbital_period_years: None,
    description: None,
};

static JUPITER: BodyData = BodyData {
    name: "Jupiter",
    kind: BodyKind::Planet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(5.202_887),
        eccentricity: Secular::new(0.048_498, -0.000_016),
        inclination: Secular::fixed(1.303_270),
        ascending_node_longitude: Secular::new(100.464_441, -0.176_174),
        perihelion_longitude: Secular::new(14.331_309, 0.215_581),
        mean_longitude: Secular::new(34.351_484, 3_034.905_700),
    },
    magnitude: MagnitudeLaw {
        base: -9.40,
        slope: 0.50,
        phase_dependent: false,
    },
    always_full: false,
    color: "#DAA520",
    symbol: "♃",
    diameter_km: Some(142_984.0),
    orbital_period_years: Some(11.86),
    description: Some("Largest planet, gas giant with Great Red Spot"),
};

static SATURN: BodyData = BodyData {
    name: "Saturn",
    kind: BodyKind::Planet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(9.536_676),
        eccentricity: Secular::new(0.055_546, -0.000_034),
        inclination: Secular::fixed(2.488_878),
        ascending_node_longitude: Secular::new(113.665_524, -0.256_745),
        perihelion_longitude: Secular::new(93.056_787, 0.565_314),
        mean_longitude: Secular::new(50.077_471, 1_222.113_850),
    },
    // ring contribution ignored
    magnitude: MagnitudeLaw {
        base: -8.88,
        slope: 0.44,
        phase_dependent: false,
    },
    always_full: false,
    color: "#F0E68C",
    symbol: "♄",
    diameter_km: None,
    orbital_period_years: None,
    description: None,
};

static URANUS: BodyData = BodyData {
    name: "Uranus",
    kind: BodyKind::Planet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(19.189_916),
        eccentricity: Secular::new(0.047_318, 0.000_007),
        inclination: Secular::fixed(0.773_196),
        ascending_node_longitude: Secular::new(74.005_947, 0.521_127),
        perihelion_longitude: Secular::new(173.005_159, 1.486_379),
        mean_longitude: Secular::new(314.055_005, 428.466_998),
    },
    magnitude: MagnitudeLaw {
        base: 5.52,
        slope: 0.31,
        phase_dependent: false,
    },
    always_full: true,
    color: "#4FD0E0",
    symbol: "⛢",
    diameter_km: None,
    orbital_period_years: None,
    description: None,
};

static NEPTUNE: BodyData = BodyData {
    name: "Neptune",
    kind: BodyKind::Planet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(30.069_923),
        eccentricity: Secular::new(0.008_606, 0.000_002),
        inclination: Secular::fixed(1.770_042),
        ascending_node_longitude: Secular::new(131.784_057, -0.006_173),
        perihelion_longitude: Secular::new(48.123_691, 1.426_294),
        mean_longitude: Secular::new(304.348_665, 218.485_952),
    },
    magnitude: MagnitudeLaw {
        base: 7.84,
        slope: 0.0,
        phase_dependent: false,
    },
    always_full: true,
    color: "#4169E1",
    symbol: "♆",
    diameter_km: Some(49_244.0),
    orbital_period_years: Some(164.8),
    description: Some("Ice giant, furthest major planet"),
};

static PLUTO: BodyData = BodyData {
    name: "Pluto",
    kind: BodyKind::DwarfPlanet,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(39.482_116_75),
        eccentricity: Secular::new(0.248_827_30, 0.000_064_65),
        inclination: Secular::fixed(17.140_012_06),
        ascending_node_longitude: Secular::new(110.303_936_84, -0.011_834_82),
        perihelion_longitude: Secular::new(224.068_916_29, 0.040_629_42),
        mean_longitude: Secular::new(238.928_81, 145.180_42),
    },
    magnitude: MagnitudeLaw {
        base: 15.1,
        slope: 0.04,
        phase_dependent: false,
    },
    always_full: true,
    color: DEFAULT_COLOR,
    symbol: "♇",
    diameter_km: Some(2_376.0),
    orbital_period_years: Some(248.1),
    description: Some("Dwarf planet in the Kuiper Belt"),
};

static CERES: BodyData = BodyData {
    name: "Ceres",
    kind: BodyKind::Asteroid,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(2.767_734_31),
        eccentricity: Secular::fixed(0.076_009_02),
        inclination: Secular::fixed(10.593_409_79),
        ascending_node_longitude: Secular::fixed(80.393_198_72),
        perihelion_longitude: Secular::fixed(72.589_810_84),
        mean_longitude: Secular::new(352.230_52, 214.149_98),
    },
    magnitude: MagnitudeLaw {
        base: 3.36,
        slope: 0.12,
        phase_dependent: false,
    },
    always_full: true,
    color: DEFAULT_COLOR,
    symbol: "⚳",
    diameter_km: Some(940.0),
    orbital_period_years: Some(4.61),
    description: Some("Largest asteroid, now classified as dwarf planet"),
};

static PALLAS: BodyData = BodyData {
    name: "Pallas",
    kind: BodyKind::Asteroid,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(2.772_869_64),
        eccentricity: Secular::fixed(0.231_382_98),
        inclination: Secular::fixed(34.840_967_18),
        ascending_node_longitude: Secular::fixed(173.096_900_41),
        perihelion_longitude: Secular::fixed(310.149_967_69),
        mean_longitude: Secular::new(249.161_39, 162.640_53),
    },
    magnitude: MagnitudeLaw {
        base: 4.13,
        slope: 0.11,
        phase_dependent: false,
    },
    always_full: true,
    color: DEFAULT_COLOR,
    symbol: "⚴",
    diameter_km: Some(512.0),
    orbital_period_years: Some(4.62),
    description: Some("Second largest asteroid"),
};

static JUNO: BodyData = BodyData {
    name: "Juno",
    kind: BodyKind::Asteroid,
    elements: OrbitalElements {
        semi_major_axis: Secular::fixed(2.668_658_14),
        eccentricity: Secular::fixed(0.256_955_79),
        inclination: Secular::fixed(12.981_454_18),
        ascending_node_longitude: Secular::fixed(169.876_705_05),
        perihelion_longitude: Secular::fixed(248.181_496_89),
        mean_longitude: Secular::new(13.046_95, 225.513_10),
    },
    magnitude: MagnitudeLaw {
        base: 5.33,
        slope: 0.21,
        phase_dependent: false,
    },
    always_full: true,
    color: DEFAULT_COLOR,
    symbol: "⚵",
    diameter_km: Some(246.0),
    orbital_period_years: Some(4.36),
    description: Some("Third asteroid discovered, highly elongated"),
};

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Ceres,
        Body::Pallas,
        Body::Juno,
    ];

    pub fn data(&self) -> &'static BodyData {
        match self {
            Body::Mercury => &MERCURY,
            Body::Venus => &VENUS,
            Body::Mars => &MARS,
            Body::Jupiter => &JUPITER,
            Body::Saturn => &SATURN,
            Body::Uranus => &URANUS,
            Body::Neptune => &NEPTUNE,
            Body::Pluto => &PLUTO,
            Body::Ceres => &CERES,
            Body::Pallas => &PALLAS,
            Body::Juno => &JUNO,
        }
    }

    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn kind(&self) -> BodyKind {
        self.data().kind
    }

    pub fn elements(&self) -> &'static OrbitalElements {
        &self.data().elements
    }

    pub fn color(&self) -> &'static str {
        self.data().color
    }

    pub fn symbol(&self) -> &'static str {
        self.data().symbol
    }

    pub fn diameter_km(&self) -> Option<f64> {
        self.data().diameter_km
    }

    pub fn orbital_period_years(&self) -> Option<f64> {
        self.data().orbital_period_years
    }

    pub fn description(&self) -> Option<&'static str> {
        self.data().description
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker size in pixels for an apparent magnitude: brighter bodies are drawn larger,
/// never under 4 px.
pub fn display_size(magnitude: f64) -> f64 {
    (10.0 - 1.5 * magnitude).max(4.0)
}
