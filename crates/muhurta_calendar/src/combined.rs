//! The combined calendar: three classifier streams merged into one
//! signal per date.
//!
//! Each source label is bucketed good/bad/neutral through its own
//! table; bucket membership is never shared across sources. Precedence,
//! first match wins: all three good → OMNI; PTI and Vedic both
//! favorable (Personal ignored) → DOUBLE GO; two good → GOOD; three
//! bad → CAUTION; two bad → SLOW; otherwise NEUTRAL.
//!
//! [`is_double_go`] is the one shared predicate for the DOUBLE GO
//! signal. The analyzer and the retro-tagger both call it; legacy
//! string labels go through [`parse_pti_label`]/[`parse_vedic_label`]
//! first so both paths compare the same enums.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use muhurta_classify::{PersonalQuality, PtiClass, VedicClass};

/// Composite classification, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinedClass {
    Omni,
    DoubleGo,
    Good,
    Caution,
    Slow,
    Neutral,
}

impl CombinedClass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Omni => "OMNI",
            Self::DoubleGo => "DOUBLE GO",
            Self::Good => "GOOD",
            Self::Caution => "CAUTION",
            Self::Slow => "SLOW",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl Display for CombinedClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Good,
    Bad,
    Neutral,
}

fn bucket_personal(quality: PersonalQuality) -> Bucket {
    match quality {
        PersonalQuality::Power | PersonalQuality::Supportive => Bucket::Good,
        PersonalQuality::Avoid => Bucket::Bad,
        PersonalQuality::Neutral | PersonalQuality::Aware => Bucket::Neutral,
    }
}

fn bucket_pti(class: PtiClass) -> Bucket {
    match class {
        PtiClass::Best | PtiClass::Go => Bucket::Good,
        PtiClass::Worst | PtiClass::Slow => Bucket::Bad,
        PtiClass::Normal => Bucket::Neutral,
    }
}

fn bucket_vedic(class: VedicClass) -> Bucket {
    match class {
        VedicClass::Go | VedicClass::MildGo => Bucket::Good,
        VedicClass::MegaRed | VedicClass::Stop | VedicClass::Slow => Bucket::Bad,
        VedicClass::Inward | VedicClass::Build | VedicClass::Neutral => Bucket::Neutral,
    }
}

/// The one Double Go predicate. Both the analyzer and the retro-tagger
/// must call this; reimplementing it desynchronizes the calendar from
/// the tag.
pub fn is_double_go(pti: PtiClass, vedic: VedicClass) -> bool {
    matches!(pti, PtiClass::Best | PtiClass::Go)
        && matches!(vedic, VedicClass::Go | VedicClass::Build)
}

/// Uppercase, drop everything but ASCII alphanumerics and single
/// spaces. Handles emoji-decorated legacy labels.
fn normalize_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else if ch.is_whitespace() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

/// Parse a legacy PTI display label. Substring match against the fixed
/// allow-list, worst first so "PTI WORST" is not read as a Go-like.
pub fn parse_pti_label(raw: &str) -> Option<PtiClass> {
    let norm = normalize_label(raw);
    if norm.contains("PTI WORST") {
        Some(PtiClass::Worst)
    } else if norm.contains("PTI SLOW") {
        Some(PtiClass::Slow)
    } else if norm.contains("PTI BEST") {
        Some(PtiClass::Best)
    } else if norm.contains("PTI GO") {
        Some(PtiClass::Go)
    } else if norm == "NORMAL" {
        Some(PtiClass::Normal)
    } else {
        None
    }
}

/// Parse a legacy Vedic display label. Exact match only.
pub fn parse_vedic_label(raw: &str) -> Option<VedicClass> {
    match normalize_label(raw).as_str() {
        "MEGA RED" => Some(VedicClass::MegaRed),
        "STOP" => Some(VedicClass::Stop),
        "INWARD" => Some(VedicClass::Inward),
        "BUILD" => Some(VedicClass::Build),
        "SLOW" => Some(VedicClass::Slow),
        "GO" => Some(VedicClass::Go),
        "MILD GO" => Some(VedicClass::MildGo),
        "NEUTRAL" => Some(VedicClass::Neutral),
        _ => None,
    }
}

/// Double Go over legacy display strings: parse, then the shared
/// predicate. Unparseable labels are never favorable.
pub fn is_double_go_labels(pti_label: &str, vedic_label: &str) -> bool {
    match (parse_pti_label(pti_label), parse_vedic_label(vedic_label)) {
        (Some(pti), Some(vedic)) => is_double_go(pti, vedic),
        _ => false,
    }
}

/// Per-source labels behind one combined verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemBreakdown {
    pub personal: PersonalQuality,
    pub pti: PtiClass,
    pub vedic: VedicClass,
}

/// One date of the combined calendar. Always recomputable from the
/// three source sequences; never stored apart from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult {
    pub date: NaiveDate,
    pub classification: CombinedClass,
    pub is_double_go: bool,
    pub breakdown: SystemBreakdown,
}

fn classify_one(breakdown: SystemBreakdown) -> CombinedResult {
    let buckets = [
        bucket_personal(breakdown.personal),
        bucket_pti(breakdown.pti),
        bucket_vedic(breakdown.vedic),
    ];
    let good = buckets.iter().filter(|&&b| b == Bucket::Good).count();
    let bad = buckets.iter().filter(|&&b| b == Bucket::Bad).count();
    let double_go = is_double_go(breakdown.pti, breakdown.vedic);

    let classification = if good == 3 {
        CombinedClass::Omni
    } else if double_go {
        CombinedClass::DoubleGo
    } else if good == 2 {
        CombinedClass::Good
    } else if bad == 3 {
        CombinedClass::Caution
    } else if bad == 2 {
        CombinedClass::Slow
    } else {
        CombinedClass::Neutral
    };

    CombinedResult {
        date: NaiveDate::default(),
        classification,
        is_double_go: double_go,
        breakdown,
    }
}

/// Merge three date-indexed label maps over the union of their dates.
///
/// A date missing from one source takes that source's neutral label
/// before bucketing; the gap itself stays visible in the source
/// calendar.
pub fn analyze(
    personal: &BTreeMap<NaiveDate, PersonalQuality>,
    pti: &BTreeMap<NaiveDate, PtiClass>,
    vedic: &BTreeMap<NaiveDate, VedicClass>,
) -> Vec<CombinedResult> {
    let dates: BTreeSet<NaiveDate> = personal
        .keys()
        .chain(pti.keys())
        .chain(vedic.keys())
        .copied()
        .collect();

    dates
        .into_iter()
        .map(|date| {
            let breakdown = SystemBreakdown {
                personal: personal
                    .get(&date)
                    .copied()
                    .unwrap_or(PersonalQuality::Neutral),
                pti: pti.get(&date).copied().unwrap_or(PtiClass::Normal),
                vedic: vedic.get(&date).copied().unwrap_or(VedicClass::Neutral),
            };
            CombinedResult {
                date,
                ..classify_one(breakdown)
            }
        })
        .collect()
}

/// Recompute the Double Go tag on already-built results from their
/// breakdowns. Same predicate as [`analyze`], so retagging is a no-op
/// unless the results were imported from a foreign snapshot.
pub fn retag_double_go(results: &mut [CombinedResult]) {
    for result in results {
        result.is_double_go = is_double_go(result.breakdown.pti, result.breakdown.vedic);
    }
}
