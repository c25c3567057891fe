#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod output;

use barber::db::SCHEMA_SQL;
use barber::feed::Document;
use barber::{
    AppointmentBoard, AppointmentFilter, AppointmentId, AppointmentStatus, BarberDb, BarberError,
    CollectionQuery, CustomerRoster, FeedState, LiveFeed, Result, SnapshotSource, StaffSession,
    SwipeDirection, SwipeOutcome,
};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::{database_url_candidates, load_config, mask_database_url, Config};
use output::{emit_error, emit_output, render_board, render_roster, staff_payload};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.name();
    let output = cli.output.clone();

    if let Err(error) = run(cli).await {
        emit_error(&output, command, &error);
        std::process::exit(error.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config).await?;
    let output = cli.output;
    let explicit_url = cli.database_url;

    match cli.command {
        Commands::InitDb { url } => {
            let explicit = url.or(explicit_url);
            let (db, database_url) = connect(explicit.as_deref(), &config).await?;
            db.initialize_schema_from_sql(SCHEMA_SQL).await?;
            emit_output(
                &output,
                "init-db",
                json!({
                    "message": "Schema initialized",
                    "database_url": mask_database_url(&database_url),
                }),
            );
            Ok(())
        }

        Commands::Appointments { filter, watch } => {
            let filter = filter
                .as_deref()
                .map(AppointmentFilter::try_from)
                .transpose()
                .map_err(BarberError::InvalidQuery)?
                .unwrap_or_else(|| config.default_filter());
            let session = config.require_session()?;
            let (db, _) = connect(explicit_url.as_deref(), &config).await?;
            let mut board = AppointmentBoard::open(session).with_filter(filter);
            let query = CollectionQuery::appointments_by_date();

            if watch {
                watch_feed(&db, query, |state| {
                    board.observe(state);
                    emit_board(&output, &board);
                })
                .await
            } else {
                let appointments = db.list_appointments(&query).await?;
                board.observe(FeedState::Ready(Arc::new(appointments)));
                emit_board(&output, &board);
                Ok(())
            }
        }

        Commands::Customers { watch } => {
            let session = config.require_session()?;
            let (db, _) = connect(explicit_url.as_deref(), &config).await?;
            let mut roster = CustomerRoster::open(session);
            let query = CollectionQuery::customers_by_last_interaction();

            if watch {
                watch_feed(&db, query, |state| {
                    roster.observe(state);
                    emit_roster(&output, &roster);
                })
                .await
            } else {
                let customers = db.list_customers(&query).await?;
                roster.observe(FeedState::Ready(Arc::new(customers)));
                emit_roster(&output, &roster);
                Ok(())
            }
        }

        Commands::Swipe { id, direction } => {
            let direction =
                SwipeDirection::try_from(direction.as_str()).map_err(BarberError::InvalidQuery)?;
            let session = config.require_session()?;
            let (db, _) = connect(explicit_url.as_deref(), &config).await?;
            swipe(&db, session, AppointmentId::new(id), direction, &output).await
        }

        Commands::Transitions => {
            emit_transitions(&output);
            Ok(())
        }
    }
}

async fn connect(explicit: Option<&str>, config: &Config) -> Result<(BarberDb, String)> {
    let candidates = database_url_candidates(explicit, config);
    let mut failures = Vec::new();
    let mut all_timed_out = !candidates.is_empty();

    for candidate in &candidates {
        match BarberDb::new_with_timeout(candidate, Some(config.connect_timeout_ms())).await {
            Ok(db) => {
                info!(database_url = %mask_database_url(candidate), "using database");
                return Ok((db, candidate.clone()));
            }
            Err(error) => {
                warn!(database_url = %mask_database_url(candidate), %error, "connection failed");
                all_timed_out &= matches!(error, BarberError::Timeout(_));
                failures.push(format!("{}: {error}", mask_database_url(candidate)));
            }
        }
    }

    let message = format!(
        "Unable to connect to any configured database URL ({})",
        failures.join("; ")
    );
    if all_timed_out {
        Err(BarberError::Timeout(message))
    } else {
        Err(BarberError::DatabaseError(message))
    }
}

/// Drives a live feed until it fails or the user interrupts.
async fn watch_feed<T, S, F>(source: &S, query: CollectionQuery, mut render: F) -> Result<()>
where
    T: Document,
    S: SnapshotSource<T>,
    F: FnMut(FeedState<T>),
{
    let mut feed = LiveFeed::spawn(source, query);

    loop {
        tokio::select! {
            state = feed.changed() => {
                match state {
                    Some(FeedState::Failed(message)) => {
                        return Err(BarberError::SubscriptionError(message));
                    }
                    Some(state) => render(state),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    feed.release();
    Ok(())
}

async fn swipe(
    db: &BarberDb,
    session: StaffSession,
    id: AppointmentId,
    direction: SwipeDirection,
    output: &OutputFormat,
) -> Result<()> {
    let appointment = db
        .get_appointment(&id)
        .await?
        .ok_or_else(|| BarberError::NotFound(format!("appointment {id}")))?;

    // Show the item under whichever filter displays it so the gesture can resolve.
    let filter = AppointmentFilter::ALL
        .into_iter()
        .find(|filter| filter.matches(&appointment.status))
        .unwrap_or_default();
    let mut board = AppointmentBoard::open(session).with_filter(filter);
    board.observe(FeedState::Ready(Arc::new(vec![appointment])));

    // The writer's own error surfaces; a vanished row stays NOTFOUND.
    let (outcome, message) = match board.try_swipe(db, &id, direction).await? {
        Some(update) => {
            let message = format!("Appointment {id} -> {}", update.status());
            (SwipeOutcome::Requested(update), message)
        }
        None => (
            SwipeOutcome::Settled,
            format!("No {direction} transition for appointment {id}"),
        ),
    };

    emit_output(
        output,
        "swipe",
        json!({
            "message": message,
            "result": outcome,
        }),
    );
    Ok(())
}

fn emit_board(output: &OutputFormat, board: &AppointmentBoard) {
    let view = board.view();
    emit_output(
        output,
        "appointments",
        json!({
            "message": render_board(&view),
            "filter": board.filter(),
            "staff": staff_payload(board.session()),
            "view": view,
        }),
    );
}

fn emit_roster(output: &OutputFormat, roster: &CustomerRoster) {
    let view = roster.view();
    emit_output(
        output,
        "customers",
        json!({
            "message": render_roster(&view),
            "staff": staff_payload(roster.session()),
            "view": view,
        }),
    );
}

fn emit_transitions(output: &OutputFormat) {
    let table = AppointmentStatus::ALL
        .into_iter()
        .map(|status| {
            let actions = status.swipe_actions();
            json!({
                "status": status,
                "left": actions.left(),
                "right": actions.right(),
            })
        })
        .collect::<Vec<_>>();

    let message = AppointmentStatus::ALL
        .into_iter()
        .map(|status| {
            let actions = status.swipe_actions();
            let describe = |target: Option<AppointmentStatus>| {
                target.map_or_else(|| "-".to_string(), |status| status.to_string())
            };
            format!(
                "{status}: left -> {}, right -> {}",
                describe(actions.left()),
                describe(actions.right())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    emit_output(
        output,
        "transitions",
        json!({
            "message": message,
            "transitions": table,
        }),
    );
}
