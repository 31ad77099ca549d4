//! # Conductor-Line Configurator CLI
//!
//! Terminal front end for the line_core engine.
//!
//! ```text
//! line_cli                    # interactive demo session
//! line_cli session.json       # derive results for a saved session
//! line_cli --send URL ...     # also submit the configuration to a relay
//! ```

mod transport;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use line_core::derived::{derive, DerivedValues};
use line_core::errors::{ConfigError, ConfigResult};
use line_core::form::PowerGroup;
use line_core::session::Session;
use line_core::submission::{Overlay, SendRequest, Submitter};

use crate::transport::RelayTransport;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_string(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    let mut input = String::new();
    let _ = io::stdin().lock().read_line(&mut input);
    input.trim().to_string()
}

/// The CLI has no modal to manage; the capability is still injected
struct NoOverlay;

impl Overlay for NoOverlay {
    fn open(&mut self, _handle: &str) {}
    fn close(&mut self, _handle: &str) {}
}

fn load_session(path: &str) -> ConfigResult<Session> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::invalid_input("session", path, e.to_string()))?;
    serde_json::from_str(&json)
        .map_err(|e| ConfigError::serialization(format!("cannot parse {path}: {e}")))
}

fn demo_session() -> Session {
    println!("Line Configurator CLI");
    println!("=====================");
    println!();

    let voltage = prompt_f64("Nominal voltage (V) [380]: ", 380.0);
    let distance = prompt_f64("Total line distance (m) [100]: ", 100.0);
    let machines = prompt_f64("Number of machines [1]: ", 1.0).max(1.0) as u32;

    let mut session = Session::new();
    {
        let form = session.form_mut();
        form.voltage = Some(voltage);
        form.total_distance = Some(distance);
        form.number_and_type_of_machines_to_feed = Some(machines);
    }

    for index in 0..machines as usize {
        let kw = prompt_f64(&format!("Grua {} hoist power (kW) [30]: ", index + 1), 30.0);
        if index > 0 {
            session.add_grua();
        }
        let mut hoist = PowerGroup::default();
        hoist.set_kw(Some(kw));
        if let Some(grua) = session.grua_mut(index) {
            grua.set_service("elevacion", hoist);
        }
    }

    session
}

fn fmt_count<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn print_panel(session: &Session, derived: &DerivedValues) {
    println!();
    println!("═══════════════════════════════════════");
    println!("  LINE CONFIGURATION RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Voltage:  {} V", fmt_count(session.form.voltage));
    println!("  Distance: {} m", fmt_count(session.form.total_distance));
    println!("  Gruas:    {}", session.gruas.len());
    println!();
    println!("Sizing:");
    println!("  Total power:    {:.0} W", derived.total_power_watts);
    println!("  Total current:  {:.2} A", derived.total_power_amps);
    println!("  Line rating:    {}", fmt_count(derived.line_rating));
    println!();
    println!("Accessories per grua:");
    for (index, rating) in derived.rating_by_grua.iter().enumerate() {
        println!(
            "  Grua {}: rating {}, socket {}, drag arm {}",
            index + 1,
            fmt_count(*rating),
            fmt_count(derived.socket_refs[index].as_deref()),
            fmt_count(derived.drag_arm_refs[index].as_deref()),
        );
    }
    println!();
    println!("Line hardware:");
    println!("  SO-4 supports:      {}", fmt_count(derived.support_count));
    println!("  SU-5001 guides:     {}", fmt_count(derived.sliding_guide_count));
    println!("  EMP-4 splices:      {}", fmt_count(derived.splice_count));
    println!("  End feed:           {}", fmt_count(derived.end_feed_ref.as_deref()));
    println!();
    println!("Voltage drop:");
    match (derived.voltage_drop_volts, derived.voltage_drop_percent) {
        (Some(volts), Some(percent)) => {
            println!("  Drop: {volts:.2} V ({percent:.2}%)");
        }
        _ => println!("  Drop: -"),
    }
    if let Some(verdict) = derived.voltage_drop_verdict {
        println!("  {verdict}");
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  FORM: {}",
        if derived.form_complete { "COMPLETE" } else { "INCOMPLETE" }
    );
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output (for API use):");
    if let Ok(json) = serde_json::to_string_pretty(derived) {
        println!("{}", json);
    }
}

fn submit(session: &Session, derived: &DerivedValues, endpoint: &str) -> ConfigResult<()> {
    let name = prompt_string("Contact name: ");
    let location = prompt_string("Province / country: ");
    let email = prompt_string("Email: ");

    let mut extra = serde_json::Map::new();
    extra.insert(
        "form".to_string(),
        serde_json::to_value(&session.form)
            .map_err(|e| ConfigError::serialization(e.to_string()))?,
    );
    extra.insert(
        "results".to_string(),
        serde_json::to_value(derived).map_err(|e| ConfigError::serialization(e.to_string()))?,
    );

    let request = SendRequest {
        name,
        location,
        email,
        extra,
    };

    let transport = RelayTransport::new(endpoint)?;
    let mut submitter = Submitter::new();
    submitter.submit(&request, &transport, &mut NoOverlay)?;
    println!("Submission accepted by the relay.");
    Ok(())
}

fn main() -> ExitCode {
    let mut session_path: Option<String> = None;
    let mut send_endpoint: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--send" => match args.next() {
                Some(url) => send_endpoint = Some(url),
                None => {
                    eprintln!("--send requires an endpoint URL");
                    return ExitCode::FAILURE;
                }
            },
            path => session_path = Some(path.to_string()),
        }
    }

    let session = match session_path {
        Some(path) => match load_session(&path) {
            Ok(session) => session,
            Err(message) => {
                eprintln!("Error: {message}");
                return ExitCode::FAILURE;
            }
        },
        None => demo_session(),
    };

    let derived = derive(&session);
    print_panel(&session, &derived);

    if let Some(endpoint) = send_endpoint {
        if let Err(message) = submit(&session, &derived, &endpoint) {
            eprintln!("Submission failed: {message}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
