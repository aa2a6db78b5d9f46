use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use kundali::rectification::render_table;
use kundali::time::{julian_day_from_local, julian_day_to_local};
use kundali::vedic::nakshatra::annotate_chart_nakshatras;
use kundali::vedic::vargas::{calculate, derive_varga_chart, SUPPORTED_VARGAS};
use kundali::vedic::{vimshottari_timeline, DashaPeriod};
use kundali::{
    Body, CancelToken, Chart, ChartBuilder, EphemerisProvider, EphemerisSettings, Event, GeoLocation,
    RectificationEngine, RectificationRequest, SignPosition, SweepOptions,
};
use kundali_config::{load_rectify_config, RectifyConfig};

#[derive(Parser)]
#[command(name = "rectify", about = "Vedic charts, dashas and birth-time rectification")]
struct Cli {
    /// Config file (defaults to configs/kundali.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Swiss Ephemeris data directory
    #[arg(long, global = true)]
    ephemeris_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct Place {
    /// Latitude in decimal degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in decimal degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// Local UTC offset in hours (e.g. 5.5)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: f64,
}

impl Place {
    fn location(&self) -> anyhow::Result<GeoLocation> {
        Ok(GeoLocation::new(self.lat, self.lon)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// D1 chart with optional vargas and nakshatras
    Chart {
        /// Local birth date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Local birth time (HH:MM:SS)
        #[arg(long)]
        time: NaiveTime,
        #[command(flatten)]
        place: Place,
        /// Divisional charts to add (repeatable)
        #[arg(long = "varga")]
        vargas: Vec<u8>,
        /// Show nakshatra and pada for every point
        #[arg(long)]
        nakshatras: bool,
        #[arg(long)]
        json: bool,
    },
    /// Vimshottari Major and Sub periods
    Dasha {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        time: NaiveTime,
        #[command(flatten)]
        place: Place,
        /// Include Sub periods
        #[arg(long)]
        subs: bool,
        #[arg(long)]
        json: bool,
    },
    /// Place one sidereal longitude in divisional charts
    Varga {
        /// Sidereal longitude in degrees
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
        /// Divisor; all supported vargas when omitted
        #[arg(long)]
        divisor: Option<u8>,
    },
    /// Search a window for the best-fitting birth time
    Rectify {
        /// Window start, local (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        start: NaiveDateTime,
        /// Window end, local (YYYY-MM-DDTHH:MM:SS); may fall on the next day
        #[arg(long)]
        end: NaiveDateTime,
        #[command(flatten)]
        place: Place,
        /// Life event as kind:YYYY-MM-DD[THH:MM] (repeatable)
        #[arg(long = "event", required = true)]
        events: Vec<Event>,
        /// Seconds between candidates
        #[arg(long)]
        step: Option<u32>,
        /// Candidates to print
        #[arg(long)]
        top: Option<usize>,
        #[arg(long)]
        workers: Option<usize>,
        /// Stop the search after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_rectify_config(cli.config.as_deref())?;
    if cli.ephemeris_path.is_some() {
        config.ephemeris_path = cli.ephemeris_path;
    }
    let settings = EphemerisSettings {
        ayanamsa: config.ayanamsa.clone(),
        house_system: config.house_system.clone(),
    };

    match cli.command {
        Commands::Chart { date, time, place, vargas, nakshatras, json } => {
            let builder = ChartBuilder::with_settings(open_provider(&config)?, settings);
            let jd = julian_day_from_local(date.and_time(time), place.utc_offset)?;
            let chart = builder.build(jd, place.location()?)?;
            print_chart(&chart, &vargas, nakshatras, json)
        }
        Commands::Dasha { date, time, place, subs, json } => {
            let builder = ChartBuilder::with_settings(open_provider(&config)?, settings);
            let jd = julian_day_from_local(date.and_time(time), place.utc_offset)?;
            let chart = builder.build(jd, place.location()?)?;
            let moon = chart
                .get(Body::Moon)
                .ok_or_else(|| anyhow::anyhow!("chart has no Moon position"))?;
            let timeline = vimshottari_timeline(jd, moon.longitude);
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
                return Ok(());
            }
            for major in &timeline {
                print_period(major, place.utc_offset, "")?;
                if subs {
                    for sub in &major.children {
                        print_period(sub, place.utc_offset, "    ")?;
                    }
                }
            }
            Ok(())
        }
        Commands::Varga { longitude, divisor } => {
            let position = SignPosition::checked_from_longitude(longitude)?;
            let specs: Vec<u8> = match divisor {
                Some(d) => vec![d],
                None => SUPPORTED_VARGAS.iter().map(|spec| spec.divisor).collect(),
            };
            for d in specs {
                let result = calculate(d, position)
                    .ok_or_else(|| anyhow::anyhow!("D{} is not a supported divisional chart", d))?;
                println!(
                    "D{:<3} {:<12} {:>7.3}  {}",
                    d,
                    result.sign_name(),
                    result.longitude,
                    result.descriptor.unwrap_or("")
                );
            }
            Ok(())
        }
        Commands::Rectify {
            start,
            end,
            place,
            events,
            step,
            top,
            workers,
            timeout,
            json,
        } => {
            let request = RectificationRequest::new(start, end, place.location()?, place.utc_offset, events)
                .with_step(step.unwrap_or(config.step_seconds));
            let options = SweepOptions {
                cancel: match timeout.or(config.timeout_seconds) {
                    Some(secs) => CancelToken::with_timeout(Duration::from_secs(secs)),
                    None => CancelToken::new(),
                },
                workers: workers.or(config.workers),
            };
            let top = top.unwrap_or(config.top_n);

            log::info!(
                "Sweeping {} to {} every {}s ({} instants)",
                request.start,
                request.end,
                request.step_seconds,
                request.instant_count()
            );
            let engine = RectificationEngine::with_settings(open_provider(&config)?, settings);
            let report = engine.sweep(&request, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.candidates.is_empty() {
                println!("No candidate birth time scored above zero.");
            } else {
                print!("{}", render_table(&report.candidates, top));
            }
            if report.cancelled {
                log::warn!("Search stopped early; results cover {} instants", report.evaluated);
            }
            Ok(())
        }
    }
}

#[cfg(feature = "swisseph")]
fn open_provider(config: &RectifyConfig) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    let adapter = kundali::ephemeris::SwissEphemerisAdapter::new(config.ephemeris_path.clone())?;
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn open_provider(_config: &RectifyConfig) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    anyhow::bail!("no ephemeris backend: rebuild with `--features swisseph`")
}

fn print_chart(chart: &Chart, vargas: &[u8], nakshatras: bool, json: bool) -> anyhow::Result<()> {
    let varga_charts = vargas
        .iter()
        .map(|&d| derive_varga_chart(chart, d).ok_or_else(|| anyhow::anyhow!("D{} is not a supported divisional chart", d)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let placements = annotate_chart_nakshatras(chart);

    if json {
        let value = serde_json::json!({
            "chart": chart,
            "vargas": varga_charts,
            "nakshatras": if nakshatras { Some(&placements) } else { None },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for point in chart.points() {
        let position = point.sign_position();
        let mut line = format!(
            "{:<10} {:>8.3}  {:<12} {:>6.3}{}",
            point.body.name(),
            point.longitude,
            position.sign_name(),
            position.longitude_in_sign,
            if point.is_retrograde() { " R" } else { "" }
        );
        if nakshatras {
            if let Some(p) = placements.get(&point.body) {
                line.push_str(&format!("  {} pada {}", p.nakshatra_name, p.pada));
            }
        }
        println!("{}", line);
    }

    for varga in &varga_charts {
        println!();
        println!("D{} {}", varga.divisor, varga.label);
        for (body, result) in &varga.positions {
            println!(
                "  {:<10} {:<12} {}",
                body.name(),
                result.sign_name(),
                result.descriptor.unwrap_or("")
            );
        }
    }
    Ok(())
}

fn print_period(period: &DashaPeriod, utc_offset: f64, indent: &str) -> anyhow::Result<()> {
    let start: NaiveDateTime = julian_day_to_local(period.start_jd, utc_offset)?;
    let end: NaiveDateTime = julian_day_to_local(period.end_jd, utc_offset)?;
    println!(
        "{}{:<8} {}  ->  {}",
        indent,
        period.lord.name(),
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn rectify_window_may_cross_midnight() {
        let cli = Cli::try_parse_from([
            "rectify",
            "rectify",
            "--start",
            "1990-05-16T23:50:00",
            "--end",
            "1990-05-17T00:10:00",
            "--lat",
            "9.93",
            "--lon",
            "76.27",
            "--utc-offset",
            "5.5",
            "--event",
            "marriage:2015-06-20",
        ])
        .unwrap();

        let Commands::Rectify { start, end, place, events, .. } = cli.command else {
            panic!("parsed the wrong subcommand");
        };
        assert_eq!(end - start, Duration::minutes(20));

        let request = RectificationRequest::new(start, end, place.location().unwrap(), place.utc_offset, events);
        assert!(request.validate().is_ok());
        assert_eq!(request.instant_count(), 121);
    }

    #[test]
    fn varga_rejects_non_finite_longitude() {
        for raw in ["NaN", "inf", "-inf"] {
            let cli = Cli::try_parse_from(["rectify", "varga", raw]).unwrap();
            let Commands::Varga { longitude, .. } = cli.command else {
                panic!("parsed the wrong subcommand");
            };
            let err = SignPosition::checked_from_longitude(longitude).unwrap_err();
            assert!(err.is_invalid_input());
        }

        let cli = Cli::try_parse_from(["rectify", "varga", "--divisor", "9", "-15"]).unwrap();
        assert!(matches!(cli.command, Commands::Varga { longitude, divisor: Some(9) } if longitude == -15.0));
    }
}
