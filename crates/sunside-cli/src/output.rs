//! Plain-text rendering of a flight report.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sunside_core::{FlightReport, Recommendation, SeatPreference, SunEvent};

use crate::plan::FlightPlan;

fn format_instant(instant: DateTime<Utc>, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => format!(
            "{} ({})",
            instant.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
            instant.format("%H:%M UTC")
        ),
        None => instant.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}

fn seat_line(report: &FlightReport) -> String {
    let sunny = report.classification.recommendation;
    match (report.preference, report.seat) {
        (_, Recommendation::NotVisible) => "Any seat: the sun stays below the horizon".to_string(),
        (_, Recommendation::Neither) => {
            "Either side: the sun is mostly ahead or behind".to_string()
        }
        (SeatPreference::SeekSun, seat) => format!("Sit on the {} for the sun", seat),
        (SeatPreference::AvoidSun, seat) => {
            format!("Sit on the {} to stay out of the sun ({} side is sunny)", seat, sunny)
        }
    }
}

/// Event lines, one per sunrise or sunset, times shown in `tz` when known.
pub fn render_events(events: &[SunEvent], tz: Option<Tz>) -> String {
    if events.is_empty() {
        return "No sunrise or sunset during the flight\n".to_string();
    }
    let mut out = String::new();
    for event in events {
        let _ = writeln!(
            out,
            "{:<8} {}  sun {} at {}",
            event.kind.to_string(),
            format_instant(event.time, tz),
            event.relative_position,
            event.position
        );
    }
    out
}

/// Full human-readable report.
pub fn render_report(plan: &FlightPlan, report: &FlightReport) -> String {
    let origin_tz = plan.origin.timezone();
    let destination_tz = plan.destination.timezone();

    let mut out = String::new();
    let _ = writeln!(out, "{} -> {}", plan.origin, plan.destination);
    let _ = writeln!(out, "  Depart   {}", format_instant(report.departure, origin_tz));
    let _ = writeln!(out, "  Arrive   {}", format_instant(report.arrival, destination_tz));
    let estimated = if plan.duration_estimated { ", estimated" } else { "" };
    let _ = writeln!(
        out,
        "  Distance {:.0} km, {:.2} h{}",
        report.distance_km, plan.query.duration_hours, estimated
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", seat_line(report));
    let _ = writeln!(out, "  {}", report.classification.summary_text);
    let _ = writeln!(out);
    out.push_str(&render_events(&report.events, origin_tz));
    out
}
