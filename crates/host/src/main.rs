use std::net::TcpListener;
use std::path::PathBuf;

use anyhow::{bail, Context};
use gridfeed_host::config::Config;
use gridfeed_host::server::{self, AppState};
use tokio::signal;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_banner() {
    eprintln!();
    eprintln!("  \x1b[1;36m┌──────────────────────────────────────────┐\x1b[0m");
    eprintln!("  \x1b[1;36m│\x1b[0m  \x1b[1;96m■ □ ■ □  gridfeed\x1b[0m  v{VERSION:<20}\x1b[1;36m│\x1b[0m");
    eprintln!("  \x1b[1;36m│\x1b[0m  \x1b[2;37mBoxes all the way down.\x1b[0m                 \x1b[1;36m│\x1b[0m");
    eprintln!("  \x1b[1;36m└──────────────────────────────────────────┘\x1b[0m");
    eprintln!();
}

fn print_connection_info(bind: &str, http_port: u16) {
    eprintln!("  \x1b[1;32m[http]\x1b[0m   Serving at port \x1b[1;96m{http_port}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[1;37m>\x1b[0m Open: \x1b[4;96mhttp://{bind}:{http_port}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mPress Ctrl+C to stop\x1b[0m");
    eprintln!();
}

fn print_help() {
    println!("gridfeed {VERSION}");
    println!("Infinite-scroll grid of colored boxes, served from a single binary");
    println!();
    println!("USAGE:");
    println!("    gridfeed [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config PATH   Read configuration from PATH");
    println!("    -p, --port PORT     HTTP port (overrides config)");
    println!("    -h, --help          Print help information");
    println!("    -v, --version       Print version");
    println!();
    println!("CONFIG:");
    println!("    {}", Config::default_config_path().display());
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG            Log filter (default: info)");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    port: Option<u16>,
}

enum Command {
    Serve(Args),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--config" | "-c" => {
                let path = iter.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--port" | "-p" => {
                let port = iter.next().context("--port needs a number")?;
                parsed.port = Some(
                    port.parse()
                        .with_context(|| format!("invalid port: {port}"))?,
                );
            }
            other => bail!("unknown argument: {other} (see --help)"),
        }
    }

    Ok(Command::Serve(parsed))
}

/// Graceful start: Check if port is available
fn check_port_available(bind: &str, port: u16) -> bool {
    TcpListener::bind((bind, port)).is_ok()
}

/// Graceful start: Find available port starting from default
fn find_available_port(bind: &str, start: u16) -> Option<u16> {
    (start..start.saturating_add(10)).find(|&port| check_port_available(bind, port))
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    if let Some(path) = &args.config {
        let config = Config::load_from_path(path)?;
        eprintln!("  \x1b[1;32m[config]\x1b[0m Loaded from {}", path.display());
        return Ok(config);
    }

    if let Err(e) = Config::create_default_if_missing() {
        tracing::warn!(error = %e, "Could not write default config");
    }
    let config = Config::load()?;
    eprintln!(
        "  \x1b[1;32m[config]\x1b[0m Loaded from {}",
        Config::default_config_path().display()
    );
    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    eprintln!();
    eprintln!("  \x1b[1;33m[stop]\x1b[0m   Graceful shutdown initiated...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args)? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("gridfeed {VERSION}");
            return Ok(());
        }
        Command::Serve(args) => args,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    print_banner();

    let mut config = load_config(&args)?;
    if let Some(port) = args.port {
        config.server.http_port = port;
    }
    let bind = config.server.bind.clone();

    let http_port = if check_port_available(&bind, config.server.http_port) {
        config.server.http_port
    } else {
        eprintln!(
            "  \x1b[1;33m[warn]\x1b[0m   Port {} in use, finding alternative...",
            config.server.http_port
        );
        let Some(port) = find_available_port(&bind, config.server.http_port.saturating_add(1))
        else {
            bail!(
                "no available HTTP ports in range {}-{}",
                config.server.http_port,
                config.server.http_port.saturating_add(10)
            );
        };
        eprintln!("  \x1b[1;32m[check]\x1b[0m  Using HTTP port {port}");
        port
    };

    let app = server::router(AppState::new(&config.grid)?);
    let listener = tokio::net::TcpListener::bind((bind.as_str(), http_port))
        .await
        .with_context(|| format!("binding {bind}:{http_port}"))?;

    tracing::info!(
        cell_footprint_px = config.grid.layout.cell_footprint_px,
        debounce_ms = config.grid.resize.debounce_ms,
        "Grid config ready"
    );
    print_connection_info(&bind, http_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    eprintln!("  \x1b[1;32m[done]\x1b[0m   Bye.");
    Ok(())
}
