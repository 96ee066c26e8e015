mod args;
mod db;
mod generator;

use args::CliArgs;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use sqlx::postgres::PgConnectOptions;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), sqlx::Error> {
    let args = CliArgs::parse();
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    let options = PgConnectOptions::new()
        .host(args.host())
        .port(*args.port())
        .username(args.user())
        .password(args.password())
        .database(args.database());
    let mut conn = db::connect(&options).await?;
    db::create_schema(&mut conn).await?;

    let mut author_ids = Vec::with_capacity(*args.authors());
    for _ in 0..*args.authors() {
        let name = generator::generate_author_name(&mut rng);
        author_ids.push(db::insert_author(&mut conn, &name).await?);
    }

    let mut slugs = Vec::with_capacity(*args.articles());
    for index in 0..*args.articles() {
        let article = generator::generate_article(&mut rng, &author_ids, index);
        db::insert_article(&mut conn, &article).await?;
        slugs.push(article.slug);
    }

    let requests: Vec<_> = (0..*args.requests())
        .map(|_| generator::generate_request(&mut rng, &slugs, *args.span_days()))
        .collect();
    let inserted = db::insert_requests(&mut conn, &requests).await?;

    println!(
        "Seeded {} authors, {} articles, {inserted} log entries",
        author_ids.len(),
        slugs.len()
    );
    Ok(())
}
