//! `hwcheck` -- hardware health check for network devices.
//!
//! Reads the hardware health of one device, evaluates it and prints the
//! verdict in monitoring plugin format (or JSON). The process exit code is
//! the verdict's status code: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.
//!
//! ```text
//! hwcheck [check]   run the health check (default)
//! hwcheck read      print the raw hardware health reading as JSON
//! ```
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default     | Description                         |
//! |--------------------------|----------|-------------|-------------------------------------|
//! | `HWCHECK_DEVICE_ADDRESS` | yes      | --          | IP address of the device            |
//! | `HWCHECK_TIMEOUT_SECS`   | no       | unset       | Seconds to wait; `0` waits forever  |
//! | `HWCHECK_SNAPSHOT_DIR`   | no       | `snapshots` | Directory of `<address>.json` files |
//! | `HWCHECK_OUTPUT`         | no       | `plugin`    | `plugin` or `json`                  |
//! | `HWCHECK_PRINT_PERFDATA` | no       | `true`      | Include performance data            |

use hwcheck_agent::config::AgentConfig;
use hwcheck_agent::connection::{ConnectionGuard, Connector};
use hwcheck_agent::executor;
use hwcheck_agent::hardware_health::{CheckHardwareHealthRequest, ReadHardwareHealthRequest};
use hwcheck_agent::output;
use hwcheck_agent::request::BaseRequest;
use hwcheck_agent::snapshot::SnapshotConnector;
use hwcheck_agent::timeout;
use hwcheck_core::device::DeviceData;
use hwcheck_core::error::RequestError;
use hwcheck_core::response::Response;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_UNKNOWN: i32 = 3;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is reserved for the check result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hwcheck_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match AgentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            println!("{}", Response::unknown(e.to_string()).render(false));
            std::process::exit(EXIT_UNKNOWN);
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let code = match std::env::args().nth(1).as_deref() {
        None | Some("check") => run_check(&config, &cancel).await,
        Some("read") => run_read(&config, &cancel).await,
        Some(other) => {
            let message = format!("unknown mode '{other}', expected 'check' or 'read'");
            println!("{}", Response::unknown(message).render(false));
            EXIT_UNKNOWN
        }
    };

    std::process::exit(code);
}

fn base_request(config: &AgentConfig) -> BaseRequest {
    BaseRequest::new(
        DeviceData::new(config.device_address.clone()),
        config.timeout_secs,
    )
}

async fn run_check(config: &AgentConfig, cancel: &CancellationToken) -> i32 {
    tracing::info!(
        address = %config.device_address,
        timeout_secs = config.timeout_secs,
        "Checking hardware health",
    );

    let request = CheckHardwareHealthRequest::new(
        base_request(config),
        SnapshotConnector::new(&config.snapshot_dir),
    );
    let outcome = executor::execute_with_cancel(request, cancel).await;
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, "Check did not complete");
    }

    let (text, code) = output::render(&outcome, config.output, config.print_performance_data);
    println!("{text}");
    code
}

async fn run_read(config: &AgentConfig, cancel: &CancellationToken) -> i32 {
    let base = base_request(config);
    if let Err(e) = base.device.check() {
        println!("{}", Response::unknown(e.to_string()).render(false));
        return EXIT_UNKNOWN;
    }

    let connector = SnapshotConnector::new(&config.snapshot_dir);
    let read = async {
        let connection = connector.connect(&base.device, cancel).await?;
        let mut connection = ConnectionGuard::new(connection);
        let reading = ReadHardwareHealthRequest::new(&base)
            .process(&mut *connection)
            .await?;
        Ok::<_, RequestError>(reading)
    };

    let result = match timeout::deadline(config.timeout_secs, Instant::now()) {
        Some(deadline) => tokio::time::timeout_at(deadline, read)
            .await
            .unwrap_or(Err(RequestError::Timeout)),
        None => read.await,
    };

    match result {
        Ok(reading) => {
            let json = serde_json::to_string_pretty(&reading)
                .expect("HardwareHealthReading is always serialisable");
            println!("{json}");
            0
        }
        Err(e) => {
            tracing::warn!(error = %e, "Read did not complete");
            println!("{}", Response::unknown(e.to_string()).render(false));
            EXIT_UNKNOWN
        }
    }
}
