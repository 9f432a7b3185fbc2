use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trailtales::{
    AppState,
    config::Config,
    console::Console,
    database,
    error::{AppError, AppResult},
    router::create_router,
};

#[derive(Parser, Debug)]
#[command(name = "trailtales", version, about = "Personal travel journal")]
struct Cli {
    /// 覆盖 DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// 覆盖 UPLOAD_DIR
    #[arg(long, global = true)]
    upload_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive console menu (default)
    Console,
    /// Local JSON API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Console);

    // 控制台模式下日志写到 stderr，避免与菜单混在一起
    let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    let registry = tracing_subscriber::registry().with(filter);
    match command {
        Command::Console => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        Command::Serve { .. } => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    let mut config = Config::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if let Some(dir) = cli.upload_dir {
        config.upload_dir = dir;
    }

    let pool = database::connect(&config.database_url).await?;
    database::initialize(&pool).await?;

    match command {
        Command::Console => {
            let state = AppState::new(pool, config)?;
            run_console(state.services).await
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            if config.jwt_secret.is_none() {
                return Err(AppError::Internal(
                    "JWT_SECRET must be set to run the API server".into(),
                ));
            }
            let state = AppState::new(pool, config)?;
            serve(state).await
        }
    }
}

async fn run_console(services: Arc<trailtales::services::Services>) -> AppResult<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut console = Console::new(services, input, std::io::stdout());
    console.run().await
}

async fn serve(state: AppState) -> AppResult<()> {
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to 127.0.0.1");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }),
        state.config.server_port,
    );

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
