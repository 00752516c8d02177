// SPDX-License-Identifier: MPL-2.0

//! Demo program: read Surveillance Station Home Mode and optionally switch it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example home_mode -- <host> <username> <password> [on|off]
//! ```
//!
//! # Example
//!
//! ```bash
//! # Read the current state
//! cargo run --example home_mode -- http://192.168.1.20:5000 homebridge secret
//!
//! # Turn Home Mode on
//! cargo run --example home_mode -- http://192.168.1.20:5000 homebridge secret on
//! ```
//!
//! Set `RUST_LOG=debug` to see every Web API request.

use std::env;

use syno_homemode::{Accessory, HomeMode, HomeModeConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 4 || args.len() > 5 {
        eprintln!("Usage: {} <host> <username> <password> [on|off]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example home_mode -- http://192.168.1.20:5000 user pass on");
        std::process::exit(1);
    }

    let desired = match args.get(4).map(String::as_str) {
        None => None,
        Some("on") => Some(true),
        Some("off") => Some(false),
        Some(other) => {
            eprintln!("Expected 'on' or 'off', got '{other}'");
            std::process::exit(1);
        }
    };

    let config = HomeModeConfig::new(&args[1]).with_credentials(&args[2], &args[3]);
    let home_mode = HomeMode::new(&config)?;

    for service in home_mode.services() {
        println!(
            "Accessory '{}' exposes {:?} with {:?}",
            Accessory::name(&home_mode),
            service.kind(),
            service.characteristics()
        );
    }

    match home_mode.try_get_state().await {
        Ok(on) => println!("Home Mode is {}", if on { "on" } else { "off" }),
        Err(e) => {
            eprintln!("Failed to read Home Mode: {e}");
            std::process::exit(1);
        }
    }

    if let Some(on) = desired {
        let now = home_mode.set_state(on).await;
        println!("Home Mode is now {}", if now { "on" } else { "off" });
    }

    Ok(())
}
