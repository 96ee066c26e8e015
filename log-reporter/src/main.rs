mod invariants;
mod queries;
mod report;

use std::io;

use clap::Parser;
use invariants::ReportLimit;
use report::ReportError;
use sqlx::{Connection, PgConnection, postgres::PgConnectOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Analyze website logs and print the results.", long_about = None)]
struct Args {
    /// PostgreSQL hostname
    #[arg(long, default_value = "localhost")]
    host: String,

    /// PostgreSQL port
    #[arg(long, default_value_t = 5432)]
    port: u16,

    /// PostgreSQL username
    #[arg(long, default_value = "postgres")]
    user: String,

    /// PostgreSQL password
    #[arg(long, default_value = "")]
    password: String,

    /// PostgreSQL database
    #[arg(long, default_value = "news")]
    database: String,

    /// Limit number of results for each sub-report
    #[arg(long)]
    limit: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), ReportError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let limit = ReportLimit::from(args.limit);

    tracing::info!(
        host = %args.host,
        port = args.port,
        user = %args.user,
        database = %args.database,
        %limit,
        "connecting to postgres"
    );

    let options = PgConnectOptions::new()
        .host(&args.host)
        .port(args.port)
        .username(&args.user)
        .password(&args.password)
        .database(&args.database);
    let mut conn = PgConnection::connect_with(&options).await?;

    let mut tx = conn.begin().await?;
    report::answer_questions(&mut tx, limit, &mut io::stdout().lock()).await?;
    // Reporting is read-only: end the transaction without committing.
    tx.rollback().await?;

    conn.close().await?;
    Ok(())
}
