//! The Vedic classifier: a nine-layer priority hierarchy over the day's
//! lunar context.
//!
//! Layers are evaluated top to bottom, first match wins:
//! L1 eclipse near new/full moon → MEGA RED; L2 tithi 29/30 → STOP and
//! tithi 1 → INWARD; L4 Saturn on the Moon → BUILD; L6 node proximity or
//! unsupported malefic nakshatra → SLOW; L7 supported benefic nakshatra →
//! GO; L8 weaker forms → MILD GO; L9 → NEUTRAL. A full-moon tag is
//! appended cosmetically (never to a terminal veto) when tithi is 15.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use muhurta_aspects::{AspectConfig, AspectInfo, AspectType, find_aspects};
use muhurta_core::{Body, BodyPositions, EphemerisPort, GeoLocation, angular_distance};
use muhurta_vedic::{
    Nakshatra, NakshatraGuna, TithiPosition, illumination_percent, moon_sun_elongation,
    nakshatra_from_longitude, rashi_from_longitude, tithi_from_elongation,
};

use crate::error::ClassifyError;
use crate::result::{ClassificationResult, DayClassifier};

/// Moon within this many degrees of a node is eclipse-grade proximity.
const NODE_ORB_DEG: f64 = 12.0;

/// Illumination floor for the GO layers.
const BRIGHT_MOON_PERCENT: f64 = 50.0;

/// Illumination that lets a benefic nakshatra go without aspect support.
const VERY_BRIGHT_MOON_PERCENT: f64 = 80.0;

/// The Vedic labels in severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VedicClass {
    MegaRed,
    Stop,
    Inward,
    Build,
    Slow,
    Go,
    MildGo,
    Neutral,
}

impl VedicClass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MegaRed => "MEGA RED",
            Self::Stop => "STOP",
            Self::Inward => "INWARD",
            Self::Build => "BUILD",
            Self::Slow => "SLOW",
            Self::Go => "GO",
            Self::MildGo => "MILD GO",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Terminal vetoes never take the cosmetic full-moon tag.
    pub const fn is_terminal_veto(self) -> bool {
        matches!(self, Self::MegaRed | Self::Stop)
    }
}

impl Display for VedicClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Vedic classifier configuration.
///
/// Eclipse dates come from the caller: the position port is not asked to
/// compute eclipses, the upstream almanac layer is.
#[derive(Debug, Clone, Default)]
pub struct VedicConfig {
    pub aspect_config: AspectConfig,
    pub eclipse_dates: Vec<NaiveDate>,
}

/// Everything the layer ladder looks at for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct VedicDayContext {
    pub tithi: TithiPosition,
    pub moon_nakshatra: Nakshatra,
    pub illumination_percent: f64,
    /// Moon-to-node separation, whichever node is nearer.
    pub node_distance_deg: f64,
    /// Saturn conjunct/opposite the Moon within orb.
    pub saturn_moon_contact: bool,
    /// Saturn square the Moon within orb.
    pub saturn_moon_square: bool,
    /// Moon in Makara or Kumbha.
    pub moon_in_saturn_sign: bool,
    /// Jupiter harmonious aspect to the Moon.
    pub jupiter_support: bool,
    /// Venus harmonious aspect to the Moon.
    pub venus_support: bool,
    /// An eclipse falls on or adjacent to this date.
    pub eclipse_nearby: bool,
}

impl VedicDayContext {
    /// Build the context from a position snapshot and its aspect set.
    pub fn from_positions(
        positions: &BodyPositions,
        aspects: &[AspectInfo],
        instant: chrono::NaiveDateTime,
        eclipse_nearby: bool,
    ) -> Result<Self, ClassifyError> {
        let moon = positions.require(Body::Moon, instant)?;
        let elongation = moon_sun_elongation(positions, instant)?;

        let node_distance_deg = [Body::Rahu, Body::Ketu]
            .iter()
            .filter_map(|&node| positions.get(node))
            .map(|p| angular_distance(moon.longitude_deg, p.longitude_deg))
            .fold(f64::INFINITY, f64::min);

        let moon_aspect = |other: Body, pred: fn(AspectType) -> bool| {
            aspects
                .iter()
                .any(|a| a.is_pair(Body::Moon, other) && pred(a.aspect_type))
        };

        Ok(Self {
            tithi: tithi_from_elongation(elongation),
            moon_nakshatra: nakshatra_from_longitude(moon.longitude_deg),
            illumination_percent: illumination_percent(elongation),
            node_distance_deg,
            saturn_moon_contact: moon_aspect(Body::Saturn, |t| {
                matches!(t, AspectType::Conjunction | AspectType::Opposition)
            }),
            saturn_moon_square: moon_aspect(Body::Saturn, |t| t == AspectType::Square),
            moon_in_saturn_sign: rashi_from_longitude(moon.longitude_deg).is_saturn_sign(),
            jupiter_support: moon_aspect(Body::Jupiter, AspectType::is_harmonious),
            venus_support: moon_aspect(Body::Venus, AspectType::is_harmonious),
            eclipse_nearby,
        })
    }

    fn has_benefic_support(&self) -> bool {
        self.jupiter_support || self.venus_support
    }
}

/// Green subtype tag for GO days, derived from the nakshatra guna.
fn green_subtype(guna: NakshatraGuna) -> &'static str {
    match guna {
        NakshatraGuna::Benefic => "deep green",
        NakshatraGuna::Neutral => "light green",
        NakshatraGuna::Malefic => "guarded green",
    }
}

/// Run the nine-layer ladder over a day context.
pub fn vedic_from_context(
    date: NaiveDate,
    ctx: &VedicDayContext,
) -> ClassificationResult<VedicClass> {
    let guna = ctx.moon_nakshatra.guna();
    let near_syzygy = ctx.tithi.is_purnima() || ctx.tithi.is_amavasya() || ctx.tithi.number == 1;

    let (class, layer, reason, mut tags): (VedicClass, &str, String, Vec<String>) =
        if ctx.eclipse_nearby && near_syzygy {
            (
                VedicClass::MegaRed,
                "L1",
                "eclipse within orb of new/full moon".to_string(),
                vec![],
            )
        } else if ctx.tithi.number == 29 || ctx.tithi.number == 30 {
            (
                VedicClass::Stop,
                "L2",
                format!("dark-moon tithi {}", ctx.tithi.number),
                vec![],
            )
        } else if ctx.tithi.number == 1 {
            (
                VedicClass::Inward,
                "L2",
                "tithi 1: new cycle, turn inward".to_string(),
                vec![],
            )
        } else if ctx.saturn_moon_contact
            || (ctx.moon_in_saturn_sign && !ctx.has_benefic_support())
        {
            let reason = if ctx.saturn_moon_contact {
                "Saturn contacts the Moon".to_string()
            } else {
                "Moon in Saturn's sign without benefic support".to_string()
            };
            (VedicClass::Build, "L4", reason, vec![])
        } else if ctx.node_distance_deg <= NODE_ORB_DEG {
            (
                VedicClass::Slow,
                "L6",
                format!("Moon {:.1}° from a lunar node", ctx.node_distance_deg),
                vec![],
            )
        } else if ctx.saturn_moon_square && guna == NakshatraGuna::Malefic {
            (
                VedicClass::Slow,
                "L6",
                "Saturn square on a malefic nakshatra".to_string(),
                vec![],
            )
        } else if guna == NakshatraGuna::Malefic && !ctx.has_benefic_support() {
            (
                VedicClass::Slow,
                "L6",
                format!("{} unsupported", ctx.moon_nakshatra.name()),
                vec![],
            )
        } else if guna == NakshatraGuna::Benefic
            && ctx.jupiter_support
            && ctx.illumination_percent > BRIGHT_MOON_PERCENT
        {
            (
                VedicClass::Go,
                "L7",
                format!("{} with Jupiter support, bright moon", ctx.moon_nakshatra.name()),
                vec![green_subtype(guna).to_string()],
            )
        } else if guna == NakshatraGuna::Benefic
            && ctx.venus_support
            && ctx.illumination_percent > BRIGHT_MOON_PERCENT
        {
            (
                VedicClass::Go,
                "L7",
                format!("{} with Venus support, bright moon", ctx.moon_nakshatra.name()),
                vec![green_subtype(guna).to_string()],
            )
        } else if guna == NakshatraGuna::Benefic
            && ctx.illumination_percent > VERY_BRIGHT_MOON_PERCENT
        {
            (
                VedicClass::Go,
                "L7",
                format!("{} under a very bright moon", ctx.moon_nakshatra.name()),
                vec![green_subtype(guna).to_string()],
            )
        } else if guna == NakshatraGuna::Benefic
            && ctx.illumination_percent > BRIGHT_MOON_PERCENT
        {
            (
                VedicClass::MildGo,
                "L8",
                format!("{} bright but unsupported", ctx.moon_nakshatra.name()),
                vec![],
            )
        } else if guna == NakshatraGuna::Neutral
            && ctx.has_benefic_support()
            && ctx.illumination_percent > BRIGHT_MOON_PERCENT
        {
            (
                VedicClass::MildGo,
                "L8",
                format!("{} with benefic support", ctx.moon_nakshatra.name()),
                vec![],
            )
        } else {
            (VedicClass::Neutral, "L9", "no governing signal".to_string(), vec![])
        };

    if ctx.tithi.is_purnima() && !class.is_terminal_veto() {
        tags.push("full moon".to_string());
    }

    // Score mirrors label ordering for threshold-free consumers.
    let score = match class {
        VedicClass::MegaRed => -5.0,
        VedicClass::Stop => -3.0,
        VedicClass::Inward => -1.0,
        VedicClass::Build => 0.5,
        VedicClass::Slow => -2.0,
        VedicClass::Go => 3.0,
        VedicClass::MildGo => 1.5,
        VedicClass::Neutral => 0.0,
    };

    ClassificationResult::new(date, class, score, reason)
        .with_detail("layer", json!(layer))
        .with_detail("tithi", json!(ctx.tithi.number))
        .with_detail("nakshatra", json!(ctx.moon_nakshatra.name()))
        .with_detail("illumination_percent", json!(ctx.illumination_percent))
        .with_detail("tags", json!(tags))
}

/// Date-driven Vedic classification against an ephemeris port.
pub struct VedicClassifier<'a, P: EphemerisPort> {
    port: &'a P,
    location: GeoLocation,
    config: VedicConfig,
}

impl<'a, P: EphemerisPort> VedicClassifier<'a, P> {
    pub fn new(port: &'a P, location: GeoLocation, config: VedicConfig) -> Self {
        Self {
            port,
            location,
            config,
        }
    }

    fn eclipse_nearby(&self, date: NaiveDate) -> bool {
        self.config
            .eclipse_dates
            .iter()
            .any(|&e| (e - date).num_days().abs() <= 1)
    }
}

impl<P: EphemerisPort> DayClassifier for VedicClassifier<'_, P> {
    type Label = VedicClass;

    fn system_name(&self) -> &'static str {
        "vedic"
    }

    fn classify(&self, date: NaiveDate) -> Result<ClassificationResult<VedicClass>, ClassifyError> {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| muhurta_core::CoreError::InvalidInput("invalid date".into()))?;
        let positions = self.port.positions(noon, &self.location)?;
        let aspects = find_aspects(&positions, None, &self.config.aspect_config);
        let ctx = VedicDayContext::from_positions(
            &positions,
            &aspects,
            noon,
            self.eclipse_nearby(date),
        )?;
        Ok(vedic_from_context(date, &ctx))
    }
}
