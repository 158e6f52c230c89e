use std::error::Error;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};

use muhurta_calendar::{analyze, label_map, snapshot};
use muhurta_classify::{
    BirdClassifier, BirdConfig, DayClassifier, PersonalClassifier, PersonalConfig, PtiClassifier,
    PtiConfig, VedicClassifier, VedicConfig,
};
use muhurta_core::{EphemerisPort, FixedEphemeris, GeoLocation};
use muhurta_transits::{ScanConfig, all_targets, scan, scanner};
use muhurta_vedic::compute_birth_chart;

#[derive(Parser)]
#[command(name = "muhurta", about = "Multi-calendar timing classification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RangeArgs {
    /// First date of the range (YYYY-MM-DD)
    #[arg(long)]
    start: String,
    /// Number of days to classify
    #[arg(long, default_value = "30")]
    days: u32,
}

#[derive(Args)]
struct PlaceArgs {
    /// Latitude in degrees
    #[arg(long, default_value = "0.0")]
    lat: f64,
    /// Longitude in degrees
    #[arg(long, default_value = "0.0")]
    lon: f64,
}

#[derive(Args)]
struct BirthArgs {
    /// Birth instant (YYYY-MM-DDThh:mm)
    #[arg(long)]
    birth: String,
    /// Natal ascendant longitude in degrees
    #[arg(long)]
    ascendant: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// PTI collective calendar for a date range
    Pti {
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        place: PlaceArgs,
    },
    /// Vedic collective calendar for a date range
    Vedic {
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        place: PlaceArgs,
        /// Eclipse dates to honor (YYYY-MM-DD, repeatable)
        #[arg(long = "eclipse")]
        eclipses: Vec<String>,
    },
    /// Personal transit calendar against a natal chart
    Personal {
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        place: PlaceArgs,
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Panch Pakshi bird periods for one date
    Birds {
        /// Date to schedule (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        place: PlaceArgs,
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Combined three-source calendar
    Combined {
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        place: PlaceArgs,
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Micro-transit scan over natal points
    Transits {
        /// Scan start (YYYY-MM-DDThh:mm)
        #[arg(long)]
        start: String,
        /// Scan end (YYYY-MM-DDThh:mm)
        #[arg(long)]
        end: String,
        #[command(flatten)]
        place: PlaceArgs,
        #[command(flatten)]
        birth: BirthArgs,
        /// Restrict to one registered scanner
        #[arg(long)]
        scanner: Option<String>,
        /// Orb override in degrees
        #[arg(long)]
        orb: Option<f64>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn Error>> {
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?)
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime, Box<dyn Error>> {
    Ok(NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")?)
}

fn location(place: &PlaceArgs) -> Result<GeoLocation, Box<dyn Error>> {
    Ok(GeoLocation::new(place.lat, place.lon)?)
}

/// Demo port: linear motion from a fixed thirteen-body snapshot. A
/// deployment swaps in a real provider behind the same trait.
fn demo_port(anchor: NaiveDate) -> Result<FixedEphemeris, Box<dyn Error>> {
    let midnight = anchor
        .and_hms_opt(0, 0, 0)
        .ok_or("invalid anchor date")?;
    Ok(FixedEphemeris::demo(midnight))
}

fn chart_from(
    port: &FixedEphemeris,
    location: &GeoLocation,
    birth: &BirthArgs,
) -> Result<muhurta_vedic::BirthChart, Box<dyn Error>> {
    let instant = parse_instant(&birth.birth)?;
    let positions = port.positions(instant, location)?;
    Ok(compute_birth_chart(&positions, birth.ascendant, instant)?)
}

fn print_calendar<C: DayClassifier>(
    classifier: &C,
    start: NaiveDate,
    days: u32,
) -> Result<(), Box<dyn Error>> {
    let outcomes = muhurta_calendar::generate(classifier, start, days);
    let results: Vec<_> = outcomes.iter().filter_map(|o| o.as_result()).cloned().collect();
    println!("{}", serde_json::to_string_pretty(&snapshot(&results))?);
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pti { range, place } => {
            let start = parse_date(&range.start)?;
            let port = demo_port(start)?;
            let loc = location(&place)?;
            let classifier = PtiClassifier::new(&port, loc, PtiConfig::default());
            print_calendar(&classifier, start, range.days)?;
        }

        Commands::Vedic {
            range,
            place,
            eclipses,
        } => {
            let start = parse_date(&range.start)?;
            let port = demo_port(start)?;
            let loc = location(&place)?;
            let eclipse_dates = eclipses
                .iter()
                .map(|raw| parse_date(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let config = VedicConfig {
                eclipse_dates,
                ..VedicConfig::default()
            };
            let classifier = VedicClassifier::new(&port, loc, config);
            print_calendar(&classifier, start, range.days)?;
        }

        Commands::Personal {
            range,
            place,
            birth,
        } => {
            let start = parse_date(&range.start)?;
            let port = demo_port(start)?;
            let loc = location(&place)?;
            let chart = chart_from(&port, &loc, &birth)?;
            let classifier = PersonalClassifier::new(&port, loc, PersonalConfig { chart });
            print_calendar(&classifier, start, range.days)?;
        }

        Commands::Birds { date, place, birth } => {
            let date = parse_date(&date)?;
            let port = demo_port(date)?;
            let loc = location(&place)?;
            let chart = chart_from(&port, &loc, &birth)?;
            let classifier = BirdClassifier::new(&port, loc, BirdConfig::from_chart(&chart));
            let schedule = classifier.schedule(date)?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }

        Commands::Combined {
            range,
            place,
            birth,
        } => {
            let start = parse_date(&range.start)?;
            let port = demo_port(start)?;
            let loc = location(&place)?;
            let chart = chart_from(&port, &loc, &birth)?;

            let personal = PersonalClassifier::new(&port, loc, PersonalConfig { chart });
            let pti = PtiClassifier::new(&port, loc, PtiConfig::default());
            let vedic = VedicClassifier::new(&port, loc, VedicConfig::default());

            let personal_map = label_map(&muhurta_calendar::generate(&personal, start, range.days));
            let pti_map = label_map(&muhurta_calendar::generate(&pti, start, range.days));
            let vedic_map = label_map(&muhurta_calendar::generate(&vedic, start, range.days));

            let results = analyze(&personal_map, &pti_map, &vedic_map);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        Commands::Transits {
            start,
            end,
            place,
            birth,
            scanner: scanner_name,
            orb,
        } => {
            let start = parse_instant(&start)?;
            let end = parse_instant(&end)?;
            let port = demo_port(start.date())?;
            let loc = location(&place)?;
            let chart = chart_from(&port, &loc, &birth)?;
            let targets = match scanner_name {
                Some(name) => vec![scanner(&name)?.target(&chart, orb)],
                None => all_targets(&chart),
            };
            let events = scan(&port, &loc, start, end, &targets, &ScanConfig::default())?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
