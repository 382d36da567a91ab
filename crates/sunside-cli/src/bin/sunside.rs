//! Which side of the plane gets the sun?
//!
//! Usage:
//!   sunside --from JFK --to LAX --depart 2024-07-22T08:00 --duration 5.5

use anyhow::{Context, Result};
use clap::Parser;
use sunside_cli::{output, AirportCatalog, Config, SpaEphemeris, PlanRequest};
use sunside_core::{analyze_flight, SeatPreference};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Origin IATA code or "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    from: String,

    /// Destination IATA code or "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    to: String,

    /// Departure, local to the origin airport (YYYY-MM-DDTHH:MM) or RFC 3339
    #[arg(long)]
    depart: String,

    /// Flight duration in hours (estimated from distance when omitted)
    #[arg(long)]
    duration: Option<f64>,

    /// Sampling interval in minutes (defaults to SUNSIDE_INTERVAL_MINUTES or 10)
    #[arg(long)]
    interval: Option<f64>,

    /// Seat preference: sun or shade
    #[arg(long, default_value = "sun")]
    prefer: SeatPreference,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Only list sunrise and sunset events
    #[arg(long, conflicts_with = "json")]
    events_only: bool,
}

fn main() -> Result<()> {
    let config = Config::from_env();

    let json_logs = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_logs = (!config.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber::registry()
        .with(json_logs)
        .with(text_logs)
        .with(
            EnvFilter::from_default_env()
                .add_directive("sunside_cli=info".parse()?)
                .add_directive("sunside_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let catalog = match &config.airports_path {
        Some(path) => AirportCatalog::from_path(path)
            .with_context(|| format!("loading airports from {}", path.display()))?,
        None => AirportCatalog::embedded().context("loading embedded airport catalog")?,
    };

    let request = PlanRequest {
        from: args.from,
        to: args.to,
        depart: args.depart,
        duration_hours: args.duration,
        preference: args.prefer,
    };
    let plan = request
        .resolve(&catalog, &config)
        .context("invalid flight")?;

    tracing::info!("Analyzing {} -> {}", plan.origin, plan.destination);
    let report = analyze_flight(&plan.query, &config.sampling(args.interval), &SpaEphemeris)
        .context("sun analysis failed")?;

    if args.json {
        println!("{}", report.to_json()?);
    } else if args.events_only {
        print!("{}", output::render_events(&report.events, plan.origin.timezone()));
    } else {
        print!("{}", output::render_report(&plan, &report));
    }

    Ok(())
}
