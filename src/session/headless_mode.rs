//! Headless mode execution
//!
//! Prints analytics to the console instead of drawing the dashboard.

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::analytics::report::shift_display_name;
use crate::analytics::{AnalyticsFilter, AnalyticsReport, AnalyticsSource, CategoryCount};
use crate::network::NetworkClient;
use std::error::Error;
use std::fmt::Write;

/// Fetch one report and print it, as text or as JSON.
pub async fn run_analytics_once(
    source: &dyn AnalyticsSource,
    network_client: &NetworkClient,
    filter: &AnalyticsFilter,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    filter.validate()?;

    let (report, _attempts) = network_client
        .fetch_report(source, filter)
        .await
        .map_err(|(e, _)| e)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Runs the refresh worker and logs its events until Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("watch", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                if let Some(report) = &event.report {
                    print!("{}", format_report(report));
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}

/// Plain-text rendering of a report, one section per chart.
pub fn format_report(report: &AnalyticsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total placements: {}", report.total());

    write_section(&mut out, "Departments", &report.department_stats, |c| {
        c.label().to_string()
    });
    write_section(&mut out, "Specialties", &report.specialty_stats, |c| {
        c.label().to_string()
    });
    write_section(&mut out, "Shifts", &report.shift_stats, |c| {
        shift_display_name(c.label()).to_string()
    });
    write_section(&mut out, "Employment status", &report.status_stats, |c| {
        c.label().to_string()
    });

    if let (Some(first), Some(last)) = (report.time_series.first(), report.time_series.last()) {
        let _ = writeln!(out, "Placements {} to {}:", first.date, last.date);
        if let Some(busiest) = report.busiest_day() {
            let _ = writeln!(out, "  busiest day {} ({})", busiest.date, busiest.count);
        }
    }
    out
}

fn write_section(
    out: &mut String,
    title: &str,
    counts: &[CategoryCount],
    label: impl Fn(&CategoryCount) -> String,
) {
    if counts.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for count in counts {
        let _ = writeln!(out, "  {:<24} {:>6}", label(count), count.count);
    }
}
