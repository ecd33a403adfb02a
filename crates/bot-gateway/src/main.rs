//! Bot Gateway
//!
//! Operator driver for the meeting bot service: sends one bot into a meeting,
//! follows its join progress, and on Ctrl-C prints the participant list and
//! makes the bot leave.
//!
//! # Flow
//!
//! 1. Load client configuration and join arguments from environment
//! 2. Create the `BotClient`
//! 3. Join and log every progress event until the stream ends
//! 4. Wait for shutdown signal (cancels the join if still in progress)
//! 5. Fetch meeting details, leave, close the client

#![warn(clippy::pedantic)]

use anyhow::Context;
use bot_gateway::config::{Config, JoinArgs};
use bot_gateway::grpc::{BotClient, CallContext, JoinStream};
use bot_gateway::models::JoinRequest;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bot_gateway=debug,bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bot Gateway");

    let config = Config::from_env().map_err(|e| {
        error!(target: "bot.config", error = %e, "Failed to load configuration");
        e
    })?;
    let args = JoinArgs::from_env().map_err(|e| {
        error!(target: "bot.config", error = %e, "Failed to load join arguments");
        e
    })?;

    info!(
        target: "bot.config",
        bot_service_url = %config.bot_service_url,
        connect_timeout_seconds = config.connect_timeout_seconds,
        rpc_timeout_seconds = config.rpc_timeout_seconds,
        join_buffer_size = config.join_buffer_size,
        eager_connect = config.eager_connect,
        tls = config.tls.is_some(),
        "Configuration loaded successfully"
    );

    let client = BotClient::connect(config)
        .await
        .context("Failed to create bot service client")?;

    // Join runs under its own context so Ctrl-C can stop it without
    // affecting the details/leave calls that follow
    let join_ctx = CallContext::new();
    let stream = client
        .join_meeting(
            &join_ctx,
            JoinRequest::new(
                args.meepo_id.clone(),
                args.bot_id.clone(),
                args.meeting_url.clone(),
                args.bot_name.clone(),
            ),
        )
        .await
        .context("JoinMeeting failed")?;

    info!(
        meepo_id = %args.meepo_id,
        bot_id = %args.bot_id,
        "Join requested, press Ctrl-C to leave"
    );

    let follow = tokio::spawn(follow_join(stream));

    shutdown_signal().await;
    info!("Shutdown signal received, leaving meeting");
    join_ctx.cancel();
    if let Err(e) = follow.await {
        warn!(error = %e, "Join progress task failed");
    }

    let ctx = CallContext::new();
    match client
        .get_meeting_details(&ctx, &args.meepo_id, &args.bot_id)
        .await
    {
        Ok(details) => {
            let names: Vec<&str> = details.participant_names().collect();
            info!(count = names.len(), participants = ?names, "Meeting participants");
        }
        Err(e) => warn!(error = %e, "Failed to fetch meeting details"),
    }

    let left = client
        .leave_meeting(&ctx, &args.meepo_id, &args.bot_id)
        .await
        .context("LeaveMeeting failed")?;
    info!(state = %left.state, message = %left.message, "Leave completed");

    client.close().await?;

    info!("Bot Gateway shutdown complete");
    Ok(())
}

/// Log join progress until the stream ends.
async fn follow_join(mut stream: JoinStream) {
    while let Some(item) = stream.recv().await {
        match item {
            Ok(progress) => info!(
                state = %progress.state,
                message = %progress.message,
                "Join progress"
            ),
            Err(e) => warn!(error = %e, kind = ?e.kind(), "Join stream ended abnormally"),
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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
}
