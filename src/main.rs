use std::io::Write;

use dotenvy::dotenv;

mod api;
mod clock;
mod config;
mod controller;
mod error;
mod location;
mod model;
mod store;
mod utils;

use api::backend::{Backend, BackendClient};
use config::Config;
use controller::SessionController;
use location::{FixedAddress, FixedLocation, LocationProvider};
use model::session::{CheckMode, GeoPoint, PhotoHandle};
use store::FileStore;
use utils::geocode_cache;

use tokio::io::AsyncBufReadExt;
use tracing::{error, info};
use tracing_appender::rolling;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "checkin.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Check-in client starting...");

    let store = FileStore::new(config.state_path.clone());
    let backend = BackendClient::new(&config)?;
    let mut controller = SessionController::load(backend, store)?;

    let kiosk_point = match (config.kiosk_latitude, config.kiosk_longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
        }),
        _ => None,
    };
    let provider = FixedLocation::new(kiosk_point);
    let geocoder = FixedAddress::new(config.kiosk_address.clone());

    // Seed the geocode cache with the provisioned address
    if let (Some(point), Some(address)) = (kiosk_point, config.kiosk_address.clone()) {
        tokio::spawn(geocode_cache::warm(vec![(point, address)]));
    }

    let name: String = controller.session().user_name.chars().take(10).collect();
    println!("Hello {name}...");

    // Startup, like the screen's mount effect: current fix, then the
    // address and the marked attendance dates concurrently.
    let point = match provider.current_location().await {
        Ok(point) => {
            controller.update_location(point);
            Some(point)
        }
        Err(e) => {
            error!(error = %e, "location unavailable at startup");
            println!("{e}");
            None
        }
    };

    let (marked, address) = tokio::join!(controller.backend().marked_dates(), async {
        match point {
            Some(point) => location::resolve_address(&geocoder, point).await,
            None => String::new(),
        }
    });
    let mut marked = match marked {
        Ok(dates) => {
            info!(count = dates.len(), "marked dates loaded");
            dates
        }
        Err(e) => {
            error!(error = %e, "failed to fetch marked dates");
            Vec::new()
        }
    };
    if let Some(point) = point {
        println!("Location: {}, {}", point.latitude, point.longitude);
        println!("Address: {address}");
    }

    println!("commands: in | out | toggle | photo <path> | status | where | dates | quit");

    // 1s clock refresh; the ticker dies with the receiver on teardown.
    let (tick_tx, mut tick_rx) = tokio::sync::mpsc::channel(4);
    let ticker = tokio::spawn(clock::run_ticker(tick_tx));

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(face) = tick_rx.recv() => {
                print!(
                    "\r {}  (h {:.1}\u{00b0}, m {}\u{00b0}, s {}\u{00b0}) > ",
                    face.digital, face.hour_angle, face.min_angle, face.sec_angle
                );
                std::io::stdout().flush().ok();
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!(error = %e, "stdin closed");
                        break;
                    }
                };

                println!();
                let mut words = line.split_whitespace();
                match (words.next(), words.next()) {
                    (Some("in"), _) => report(controller.request_transition(CheckMode::CheckedIn).await),
                    (Some("out"), _) => report(controller.request_transition(CheckMode::CheckedOut).await),
                    (Some("toggle"), _) => report(controller.toggle().await),
                    (Some("photo"), Some(path)) => {
                        if std::path::Path::new(path).exists() {
                            controller.attach_photo(PhotoHandle::new(path));
                            println!("photo attached: {path}");
                        } else {
                            println!("no such file: {path}");
                        }
                    }
                    // Bare `photo` cancels the capture, like backing out of
                    // the camera.
                    (Some("photo"), None) => {
                        controller.clear_photo();
                        println!("photo cleared");
                    }
                    (Some("status"), _) => {
                        let session = controller.session();
                        println!("mode:          {:?}", session.mode);
                        println!(
                            "checkin time:  {}",
                            session.check_in_time.as_deref().unwrap_or("--:--")
                        );
                        println!(
                            "checkout time: {}",
                            session.check_out_time.as_deref().unwrap_or("--:--")
                        );
                        println!(
                            "photo:         {}",
                            session
                                .pending_photo
                                .as_ref()
                                .map(|p| p.file_name())
                                .unwrap_or_else(|| "none".to_string())
                        );
                    }
                    (Some("where"), _) => match controller.session().location {
                        Some(point) => {
                            println!("Address: {address}");
                            println!("{}", location::maps_url(point));
                        }
                        None => println!("Location is not available"),
                    },
                    (Some("dates"), _) => {
                        match controller.backend().marked_dates().await {
                            Ok(dates) => marked = dates,
                            Err(e) => error!(error = %e, "failed to refresh marked dates"),
                        }
                        for date in &marked {
                            println!("{date}");
                        }
                    }
                    (Some("quit"), _) | (Some("exit"), _) => break,
                    (Some(other), _) => println!("unknown command: {other}"),
                    (None, _) => {}
                }
            }
        }
    }

    ticker.abort();
    info!("Check-in client stopped");
    Ok(())
}

fn report(result: Result<controller::TransitionOutcome, error::Error>) {
    match result {
        Ok(outcome) => println!("{} data sent successfully at {}", outcome.transition, outcome.time),
        Err(e) => println!("{e}"),
    }
}
