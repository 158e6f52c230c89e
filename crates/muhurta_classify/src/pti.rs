//! The PTI classifier: a priority ladder over one day's aspect set.
//!
//! Terminal labels: PTI Worst, PTI Slow, Normal, PTI Go, PTI Best.
//! No inter-day state; each day classifies independently. Evaluation is
//! first-match-wins:
//!
//! 1. deal-breaker → Worst
//! 2. any of eight "Best" signals → Best
//! 3. score ≤ −6 → Worst
//! 4. score ≥ 3 → Go
//! 5. 1.5 ≤ score < 3 with an applying enhancement → Go, else Normal
//! 6. −2 ≤ score < 1.5 → Normal
//! 7. score < −2 → Slow
//! 8. settled Normal + T-square + score < −1 → escalate to Slow

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use muhurta_aspects::{
    AspectConfig, AspectInfo, PatternKind, StrengthTier, check_deal_breakers, detect_patterns,
    find_aspects, find_cinderella_aspects, find_super_aspects, find_super_parallels,
    find_transcendent_links, is_enhancement, score_day,
};
use muhurta_core::{EphemerisPort, GeoLocation};

use crate::error::ClassifyError;
use crate::result::{ClassificationResult, DayClassifier};

/// Score thresholds of the ladder.
const SEVERELY_NEGATIVE: f64 = -6.0;
const GO_THRESHOLD: f64 = 3.0;
const BORDERLINE_GO: f64 = 1.5;
const NORMAL_FLOOR: f64 = -2.0;
const STRONG_SLOW: f64 = -4.0;
const TSQUARE_ESCALATION_CEILING: f64 = -1.0;

/// Best-signal thresholds.
const BEST_PEAK_WINDOW_DAYS: f64 = 1.5;
const BEST_BASE_SCORE: f64 = 3.0;
const BEST_SUPPORTED_SCORE: f64 = 5.0;
const BEST_RAW_SCORE: f64 = 10.0;
const BEST_RAW_ENHANCEMENTS: usize = 4;

/// The five PTI labels, worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PtiClass {
    Worst,
    Slow,
    Normal,
    Go,
    Best,
}

impl PtiClass {
    /// Canonical display label. Emoji decoration is presentation-layer
    /// only and never appears here.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Worst => "PTI Worst",
            Self::Slow => "PTI Slow",
            Self::Normal => "Normal",
            Self::Go => "PTI Go",
            Self::Best => "PTI Best",
        }
    }
}

impl Display for PtiClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// PTI classifier configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PtiConfig {
    pub aspect_config: AspectConfig,
}

/// Check the eight Best signals in priority order. Any match suffices;
/// the returned string names the matched signal for the reason field.
fn best_signal(aspects: &[AspectInfo], score: f64) -> Option<String> {
    let supers = find_super_aspects(aspects);
    let transcendent = find_transcendent_links(aspects);

    // (a) a tight super aspect applying and peaking inside the window
    if score >= BEST_BASE_SCORE {
        if let Some(sa) = supers.iter().find(|a| {
            a.strength_tier == StrengthTier::Tight
                && a.is_applying
                && a.days_to_peak.is_some_and(|d| d <= BEST_PEAK_WINDOW_DAYS)
        }) {
            return Some(format!("super aspect peaking within 1.5 days: {sa}"));
        }
    }

    // (b) two tight super aspects
    let tight_supers = supers
        .iter()
        .filter(|a| a.strength_tier == StrengthTier::Tight)
        .count();
    if tight_supers >= 2 && score >= BEST_BASE_SCORE {
        return Some(format!("{tight_supers} tight super aspects"));
    }

    // (c) close-or-tighter super aspect with transcendent support
    let close_supers = supers
        .iter()
        .filter(|a| a.strength_tier.is_tight_or_close())
        .count();
    if close_supers >= 1 && !transcendent.is_empty() && score >= BEST_SUPPORTED_SCORE {
        return Some("close super aspect with transcendent support".to_string());
    }

    // (d) grand trine with two strong legs
    if score >= BEST_BASE_SCORE {
        let patterns = detect_patterns(aspects);
        if let Some(gt) = patterns
            .iter()
            .find(|p| p.kind == PatternKind::GrandTrine && p.tight_or_close_legs >= 2)
        {
            return Some(format!(
                "grand trine ({}/{}/{}) with {} strong legs",
                gt.bodies[0], gt.bodies[1], gt.bodies[2], gt.tight_or_close_legs
            ));
        }
    }

    // (e) tight Cinderella aspect with transcendent support
    let cinderellas = find_cinderella_aspects(aspects);
    if score >= BEST_SUPPORTED_SCORE
        && !transcendent.is_empty()
        && cinderellas
            .iter()
            .any(|a| a.strength_tier == StrengthTier::Tight)
    {
        return Some("tight Cinderella aspect with transcendent support".to_string());
    }

    // (f) three transcendent links
    if transcendent.len() >= 3 && score >= BEST_SUPPORTED_SCORE {
        return Some(format!("{} transcendent links", transcendent.len()));
    }

    // (g) two super parallels
    let super_parallels = find_super_parallels(aspects);
    if super_parallels.len() >= 2 && score >= BEST_SUPPORTED_SCORE {
        return Some(format!("{} super parallels", super_parallels.len()));
    }

    // (h) raw score with broad enhancement support
    let enhancements = aspects.iter().filter(|a| is_enhancement(a)).count();
    if score >= BEST_RAW_SCORE && enhancements >= BEST_RAW_ENHANCEMENTS {
        return Some(format!(
            "score {score:.2} with {enhancements} enhancements"
        ));
    }

    None
}

/// Classify one day's aspect set. Pure: the ladder sees only the aspect
/// set, never the ephemeris.
pub fn pti_from_aspects(date: NaiveDate, aspects: &[AspectInfo]) -> ClassificationResult<PtiClass> {
    let day_score = score_day(aspects);
    let score = day_score.score;
    let factors = json!(day_score.factors);

    // 1. Deal-breaker veto bypasses all scoring.
    let finding = check_deal_breakers(aspects);
    if finding.has_deal_breaker {
        log::debug!("{date}: deal-breaker veto: {}", finding.reasons.join("; "));
        return ClassificationResult::new(
            date,
            PtiClass::Worst,
            score,
            format!("deal-breaker: {}", finding.reasons.join("; ")),
        )
        .with_detail("deal_breakers", json!(finding.reasons))
        .with_detail("factors", factors);
    }

    // 2. Best signals.
    if let Some(signal) = best_signal(aspects, score) {
        return ClassificationResult::new(date, PtiClass::Best, score, signal.clone())
            .with_detail("best_signal", json!(signal))
            .with_detail("factors", factors);
    }

    // 3. Severely negative.
    if score <= SEVERELY_NEGATIVE {
        return ClassificationResult::new(
            date,
            PtiClass::Worst,
            score,
            format!("severely negative score {score:.2}"),
        )
        .with_detail("factors", factors);
    }

    // 4. Clean Go.
    if score >= GO_THRESHOLD {
        return ClassificationResult::new(
            date,
            PtiClass::Go,
            score,
            format!("score {score:.2} at or above go threshold"),
        )
        .with_detail("factors", factors);
    }

    // 5. Borderline band: an applying enhancement tips it to Go.
    if score >= BORDERLINE_GO {
        let has_applying_enhancement = aspects.iter().any(|a| {
            a.is_applying && is_enhancement(a) && a.strength_tier != StrengthTier::Wide
        });
        if has_applying_enhancement {
            return ClassificationResult::new(
                date,
                PtiClass::Go,
                score,
                format!("borderline score {score:.2} with applying enhancement"),
            )
            .with_detail("factors", factors);
        }
        return ClassificationResult::new(
            date,
            PtiClass::Normal,
            score,
            format!("borderline score {score:.2} without applying enhancement"),
        )
        .with_detail("factors", factors);
    }

    // 6/7. Normal band, then the two slow sub-bands.
    let (class, reason) = if score >= NORMAL_FLOOR {
        (PtiClass::Normal, format!("score {score:.2} in normal band"))
    } else if score > STRONG_SLOW {
        (PtiClass::Slow, format!("mildly slow score {score:.2}"))
    } else {
        (PtiClass::Slow, format!("strongly slow score {score:.2}"))
    };

    // 8. Escalate a settled Normal when a T-square leans on a sub-par day.
    if class == PtiClass::Normal && score < TSQUARE_ESCALATION_CEILING {
        let has_t_square = detect_patterns(aspects)
            .iter()
            .any(|p| p.kind == PatternKind::TSquare);
        if has_t_square {
            return ClassificationResult::new(
                date,
                PtiClass::Slow,
                score,
                format!("T-square pressure on score {score:.2}"),
            )
            .with_detail("factors", factors);
        }
    }

    ClassificationResult::new(date, class, score, reason).with_detail("factors", factors)
}

/// Date-driven PTI classification against an ephemeris port.
///
/// Aspects are measured at local noon with explicit next-day positions
/// for applying detection.
pub struct PtiClassifier<'a, P: EphemerisPort> {
    port: &'a P,
    location: GeoLocation,
    config: PtiConfig,
}

impl<'a, P: EphemerisPort> PtiClassifier<'a, P> {
    pub fn new(port: &'a P, location: GeoLocation, config: PtiConfig) -> Self {
        Self {
            port,
            location,
            config,
        }
    }

    fn aspects_for(&self, date: NaiveDate) -> Result<Vec<AspectInfo>, ClassifyError> {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| muhurta_core::CoreError::InvalidInput("invalid date".into()))?;
        let today = self.port.positions(noon, &self.location)?;
        let tomorrow = self
            .port
            .positions(noon + chrono::Duration::days(1), &self.location)?;
        Ok(find_aspects(&today, Some(&tomorrow), &self.config.aspect_config))
    }
}

impl<P: EphemerisPort> DayClassifier for PtiClassifier<'_, P> {
    type Label = PtiClass;

    fn system_name(&self) -> &'static str {
        "pti"
    }

    fn classify(&self, date: NaiveDate) -> Result<ClassificationResult<PtiClass>, ClassifyError> {
        let aspects = self.aspects_for(date)?;
        Ok(pti_from_aspects(date, &aspects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muhurta_aspects::{AspectType, CoordinateType};
    use muhurta_core::Body;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    fn aspect(
        a: Body,
        b: Body,
        aspect_type: AspectType,
        orb: f64,
        applying: bool,
        days_to_peak: Option<f64>,
    ) -> AspectInfo {
        AspectInfo {
            body_a: a,
            body_b: b,
            aspect_type,
            orb_deg: orb,
            is_applying: applying,
            strength_tier: StrengthTier::from_orb(orb),
            coordinate_type: if matches!(
                aspect_type,
                AspectType::Parallel | AspectType::Contraparallel
            ) {
                CoordinateType::Declination
            } else {
                CoordinateType::Longitude
            },
            days_to_peak,
        }
    }

    /// A benefic spread worth well over the go threshold.
    fn strong_benefic_day() -> Vec<AspectInfo> {
        vec![
            aspect(Body::Venus, Body::Jupiter, AspectType::Trine, 0.2, true, Some(0.5)),
            aspect(Body::Sun, Body::Venus, AspectType::Sextile, 0.3, true, Some(0.8)),
            aspect(Body::Sun, Body::Jupiter, AspectType::Trine, 0.4, true, Some(1.0)),
        ]
    }

    #[test]
    fn deal_breaker_forces_worst_regardless_of_score() {
        let mut aspects = strong_benefic_day();
        aspects.push(aspect(
            Body::Saturn,
            Body::Mars,
            AspectType::Square,
            0.3,
            true,
            Some(1.0),
        ));
        let result = pti_from_aspects(date(), &aspects);
        assert_eq!(result.classification, PtiClass::Worst);
        assert!(result.reason.contains("deal-breaker"));
        let breakers = result.details.get("deal_breakers").unwrap();
        assert!(!breakers.as_array().unwrap().is_empty());
    }

    #[test]
    fn peaking_super_aspect_is_best() {
        // Venus trine Jupiter tight, applying, peaks in 0.5 days; the
        // supporting aspects push the score over 3.
        let result = pti_from_aspects(date(), &strong_benefic_day());
        assert_eq!(result.classification, PtiClass::Best);
        assert!(result.details.contains_key("best_signal"));
    }

    #[test]
    fn plain_positive_day_is_go() {
        // Sun/Venus/Moon harmony with no super pairs: score ≥ 3
        // without any Best signal.
        let aspects = vec![
            aspect(Body::Sun, Body::Venus, AspectType::Sextile, 0.2, true, Some(2.0)),
            aspect(Body::Sun, Body::Moon, AspectType::Trine, 0.1, true, Some(0.2)),
            aspect(Body::Moon, Body::Venus, AspectType::Sextile, 0.4, true, Some(0.3)),
            aspect(Body::Mercury, Body::Venus, AspectType::Conjunction, 0.3, false, None),
        ];
        let result = pti_from_aspects(date(), &aspects);
        assert_eq!(result.classification, PtiClass::Go, "score {}", result.score);
    }

    #[test]
    fn severely_negative_is_worst() {
        let aspects = vec![
            aspect(Body::Mars, Body::Saturn, AspectType::Square, 2.5, false, None),
            aspect(Body::Saturn, Body::Sun, AspectType::Opposition, 2.2, false, None),
            aspect(Body::Mars, Body::Pluto, AspectType::Square, 2.4, false, None),
            aspect(Body::Sun, Body::Pluto, AspectType::Opposition, 2.8, false, None),
            aspect(Body::Mars, Body::Rahu, AspectType::Square, 2.3, false, None),
        ];
        let result = pti_from_aspects(date(), &aspects);
        // All separating, moderate-wide: no veto, but the pile-up lands
        // at or below -6.
        assert!(result.score <= -6.0, "score {}", result.score);
        assert_eq!(result.classification, PtiClass::Worst);
        assert!(result.reason.contains("severely negative"));
    }

    #[test]
    fn borderline_with_applying_enhancement_goes() {
        // Sun sextile Venus close applying: 1.0 * (2/3) * 1.15 ≈ 0.77 —
        // need ~1.5 total, add a medium-term harmonious pair.
        let aspects = vec![
            aspect(Body::Sun, Body::Venus, AspectType::Sextile, 0.6, true, Some(1.0)),
            aspect(Body::Mars, Body::Jupiter, AspectType::Trine, 0.4, false, None),
        ];
        let result = pti_from_aspects(date(), &aspects);
        assert!(
            (BORDERLINE_GO..GO_THRESHOLD).contains(&result.score),
            "score {} outside borderline band",
            result.score
        );
        assert_eq!(result.classification, PtiClass::Go);
    }

    #[test]
    fn borderline_without_applying_enhancement_is_normal() {
        let aspects = vec![
            aspect(Body::Sun, Body::Venus, AspectType::Sextile, 0.6, false, None),
            aspect(Body::Mars, Body::Jupiter, AspectType::Trine, 0.4, false, None),
            aspect(Body::Mercury, Body::Mars, AspectType::Trine, 1.2, false, None),
        ];
        let result = pti_from_aspects(date(), &aspects);
        assert!(
            (BORDERLINE_GO..GO_THRESHOLD).contains(&result.score),
            "score {} outside borderline band",
            result.score
        );
        assert_eq!(result.classification, PtiClass::Normal);
    }

    #[test]
    fn quiet_day_is_normal() {
        let result = pti_from_aspects(date(), &[]);
        assert_eq!(result.classification, PtiClass::Normal);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn negative_day_is_slow() {
        let aspects = vec![aspect(
            Body::Mars,
            Body::Saturn,
            AspectType::Square,
            1.2,
            false,
            None,
        )];
        let result = pti_from_aspects(date(), &aspects);
        assert!(result.score < -2.0);
        assert_eq!(result.classification, PtiClass::Slow);
    }

    #[test]
    fn t_square_escalates_weak_normal() {
        // T-square with Moon apex: Sun opp Saturn, Moon square both.
        // Moon damping keeps the total inside (-2, -1).
        let aspects = vec![
            aspect(Body::Sun, Body::Saturn, AspectType::Opposition, 1.5, false, None),
            aspect(Body::Moon, Body::Sun, AspectType::Square, 1.5, false, None),
            aspect(Body::Moon, Body::Saturn, AspectType::Square, 1.8, false, None),
        ];
        let result = pti_from_aspects(date(), &aspects);
        assert!(
            result.score < -1.0 && result.score >= -2.0,
            "score {} outside escalation band",
            result.score
        );
        assert_eq!(result.classification, PtiClass::Slow);
        assert!(result.reason.contains("T-square"));
    }

    #[test]
    fn classification_is_deterministic() {
        let aspects = strong_benefic_day();
        assert_eq!(
            pti_from_aspects(date(), &aspects),
            pti_from_aspects(date(), &aspects)
        );
    }
}
