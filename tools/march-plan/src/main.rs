//! march-plan: compute a march schedule from a plan file and an HGT tile.
//!
//! Usage:
//!   march-plan --plan plan.json --hgt S35W059.hgt --ndvi ndvi/S35W059.hgt \
//!       --output schedule.json --h-hour 05:30

mod config;

use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use march_core::config::MarchPlan;
use march_core::enums::EventKind;
use march_fetch::{fetch_samples, FetchConfig, GridSampler};
use march_sim::report::{format_clock, format_duration, parse_h_hour};
use march_sim::{plan_march, PlanOutput};
use march_terrain::hgt::{load_hgt, load_ndvi};
use march_terrain::{build_route, densify};

use crate::config::Config;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_report(out: &PlanOutput) {
    let summary = &out.summary;
    let h_hour = summary.h_hour.as_deref().and_then(parse_h_hour);
    let at = |minutes: f64| {
        h_hour
            .and_then(|h| format_clock(h, minutes))
            .unwrap_or_else(|| format!("H+{}", format_duration(minutes)))
    };

    println!("Distance: {:.2} km", summary.distance_km);
    println!("Duration: {}", summary.duration_label);
    if let Some(end) = &summary.end_clock {
        println!("Last tail clears the end at {end}");
    }

    for series in &summary.series {
        println!("\n{} (starts {}, {})", series.name, at(series.start_time), series.duration_label);
        for c in &series.columns {
            println!(
                "  {:<16} start {}  moving {}  halted {}  avg {:.1} km/h",
                c.name,
                at(c.start_time),
                format_duration(c.movement_minutes),
                format_duration(c.halt_minutes),
                c.average_speed_kmh,
            );
        }
    }

    for timeline in &out.timelines {
        if timeline.events.is_empty() {
            continue;
        }
        println!("\n{} / {}", timeline.series, timeline.column);
        for e in &timeline.events {
            match e.kind {
                EventKind::Pc => println!(
                    "  {:>8.2} km  {:<10} head {}  tail {}",
                    e.distance / 1000.0,
                    e.label,
                    at(e.time),
                    at(e.tail_time)
                ),
                EventKind::Halt => println!(
                    "  {:>8.2} km  {:<10} {} to {}",
                    e.distance / 1000.0,
                    e.label,
                    at(e.time),
                    at(e.tail_time)
                ),
            }
        }
    }

    for column in &out.observations {
        if column.observations.is_empty() {
            continue;
        }
        println!("\n{} / {} observations", column.series, column.column);
        for o in &column.observations {
            println!("  {:>8.2} km  {}", o.distance() / 1000.0, o.describe());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.json_logs);
    info!(config = ?config, "march-plan starting");

    let text = fs::read_to_string(&config.plan).with_context(|| format!("reading {}", config.plan.display()))?;
    let mut plan = MarchPlan::from_json(&text).with_context(|| format!("parsing {}", config.plan.display()))?;
    if config.h_hour.is_some() {
        plan.h_hour = config.h_hour.clone();
    }
    if plan.route.len() < 2 {
        bail!("plan route needs at least 2 points, got {}", plan.route.len());
    }

    let grid = load_hgt(&config.hgt).with_context(|| format!("loading {}", config.hgt.display()))?;
    let mut sampler = GridSampler::new(grid);
    if let Some(path) = &config.ndvi {
        let ndvi = load_ndvi(path).with_context(|| format!("loading NDVI {}", path.display()))?;
        sampler = sampler.with_ndvi(ndvi);
    }
    if let Some(vegetation) = config.vegetation {
        sampler = sampler.with_fallback_vegetation(vegetation);
    }

    let points = densify(&plan.route, config.max_spacing);
    info!(vertices = plan.route.len(), samples = points.len(), "sampling route");

    let fetch_config = FetchConfig {
        max_concurrency: config.concurrency,
        ..FetchConfig::default()
    };
    let outcome = fetch_samples(&sampler, &points, &fetch_config).await;
    if !outcome.failed.is_empty() {
        warn!(
            failed = outcome.failed.len(),
            total = points.len(),
            "some route points have no terrain data"
        );
    }

    let route = build_route(&outcome.samples).context("profiling route")?;
    if !route.quality().meets_threshold() {
        warn!(
            valid_percent = route.quality().valid_percent,
            "elevation coverage is low; the schedule may be unreliable"
        );
    }

    let output = plan_march(&route, &plan).context("planning march")?;

    let json = serde_json::to_string_pretty(&output)?;
    if config.output.as_os_str() == "-" {
        io::stdout().write_all(json.as_bytes())?;
    } else {
        print_report(&output);
        fs::write(&config.output, json).with_context(|| format!("writing {}", config.output.display()))?;
        info!(path = %config.output.display(), "schedule written");
    }

    Ok(())
}
