use clap::Parser;
use derive_getters::Getters;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Seed a news database with fake traffic for testing", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value = "localhost")]
    host: String,

    #[arg(long, default_value_t = 5432)]
    port: u16,

    #[arg(long, default_value = "postgres")]
    user: String,

    #[arg(long, default_value = "")]
    password: String,

    #[arg(long, default_value = "news")]
    database: String,

    #[arg(long, default_value_t = 4)]
    authors: usize,

    #[arg(long, default_value_t = 12)]
    articles: usize,

    #[arg(long, default_value_t = 10_000)]
    requests: usize,

    /// Spread generated request timestamps over this many past days
    #[arg(long, default_value_t = 30)]
    span_days: i64,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}
