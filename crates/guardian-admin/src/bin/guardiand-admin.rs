//! Guardian admin CLI.
//!
//! `serve` runs the admin socket with a logging consumer in place of the
//! signing pipeline. `submit` and `template` are operator tools.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{Parser, Subcommand};
use guardian_admin::server::DEFAULT_SOCKET_PATH;
use guardian_admin::template::guardian_set_template;
use guardian_admin::{
    injection_channel, AdminClient, AdminConfig, AdminServer, GuardianSetUpdateRequest,
    InjectionQueue, SendPolicy,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Guardian node admin control plane.
#[derive(Parser, Debug)]
#[command(name = "guardiand-admin")]
#[command(about = "Submit guardian set updates over the guardian admin socket")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the admin socket, logging every VAA handed to the pipeline
    Serve {
        /// Path to the admin Unix socket
        #[arg(long, env = "GUARDIAND_ADMIN_SOCKET", default_value = DEFAULT_SOCKET_PATH)]
        socket: PathBuf,

        /// Number of VAAs buffered for the pipeline
        #[arg(long, env = "GUARDIAND_ADMIN_QUEUE_CAPACITY", default_value_t = 16)]
        queue_capacity: usize,

        /// Reject submissions when the queue is full instead of waiting
        #[arg(long)]
        fail_fast: bool,

        /// Largest request frame accepted, in bytes
        #[arg(long, default_value_t = guardian_admin::server::DEFAULT_MAX_FRAME_SIZE)]
        max_frame_size: usize,
    },

    /// Submit a guardian set update read from a JSON file
    Submit {
        /// Path to the admin Unix socket
        #[arg(long, env = "GUARDIAND_ADMIN_SOCKET", default_value = DEFAULT_SOCKET_PATH)]
        socket: PathBuf,

        /// JSON file holding the guardian set update request
        file: PathBuf,
    },

    /// Print a guardian set update request with placeholder guardians
    Template {
        /// Number of guardians in the new set
        #[arg(long, default_value_t = 1)]
        num_guardians: usize,

        /// Index of the currently active guardian set
        #[arg(long, default_value_t = 0)]
        current_set_index: u32,

        /// Timestamp in seconds since epoch (defaults to now)
        #[arg(long)]
        timestamp: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Serve {
            socket,
            queue_capacity,
            fail_fast,
            max_frame_size,
        } => {
            let policy = if fail_fast {
                SendPolicy::FailFast
            } else {
                SendPolicy::Block
            };
            let config = AdminConfig::default()
                .with_socket_path(socket)
                .with_queue_capacity(queue_capacity)
                .with_send_policy(policy)
                .with_max_frame_size(max_frame_size);
            serve(config).await
        }
        Command::Submit { socket, file } => submit(socket, file).await,
        Command::Template {
            num_guardians,
            current_set_index,
            timestamp,
        } => {
            let timestamp = match timestamp {
                Some(ts) => ts,
                None => now_unix()?,
            };
            let request = guardian_set_template(num_guardians, current_set_index, timestamp)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
            Ok(())
        }
    }
}

async fn serve(config: AdminConfig) -> anyhow::Result<()> {
    let (injector, queue) = injection_channel(config.injection.clone());
    tokio::spawn(log_pipeline(queue));

    let policy = injector.policy();
    let capacity = injector.capacity();
    let server = AdminServer::new(config, Arc::new(injector));
    info!(
        socket = %server.socket_path().display(),
        queue_capacity = capacity,
        send_policy = ?policy,
        "starting guardian admin server"
    );
    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await
        .context("admin server failed")
}

/// Stand-in for the signing pipeline: log each VAA in arrival order.
async fn log_pipeline(mut queue: InjectionQueue) {
    while let Some(vaa) = queue.recv().await {
        match vaa.signing_digest() {
            Ok(digest) => info!(
                guardian_set_index = vaa.guardian_set_index,
                digest = %digest,
                "pipeline received VAA"
            ),
            Err(e) => error!(error = %e, "pipeline received VAA that cannot be digested"),
        }
    }
    info!("injection channel closed");
}

async fn submit(socket: PathBuf, file: PathBuf) -> anyhow::Result<()> {
    let contents = std::fs::read(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let request: GuardianSetUpdateRequest = serde_json::from_slice(&contents)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    let mut client = AdminClient::connect(&socket)
        .await
        .with_context(|| format!("failed to connect to {}", socket.display()))?;
    let digest = client.submit_guardian_set_vaa(request).await?;

    println!("VAA successfully injected with digest {digest}");
    Ok(())
}

fn now_unix() -> anyhow::Result<u32> {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    u32::try_from(secs).context("current time does not fit in a u32 timestamp")
}
