use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::{Connection, PgConnection, postgres::PgConnectOptions};
use tryhard::{RetryFutureConfig, retry_fn};

use crate::generator::{Article, Request};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    id serial PRIMARY KEY,
    name text NOT NULL
);
CREATE TABLE IF NOT EXISTS articles (
    id serial PRIMARY KEY,
    author integer NOT NULL REFERENCES authors (id),
    title text NOT NULL,
    slug text NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS log (
    id serial PRIMARY KEY,
    path text,
    status text,
    time timestamptz NOT NULL DEFAULT now()
);
"#;

pub async fn connect(options: &PgConnectOptions) -> Result<PgConnection, sqlx::Error> {
    let config = RetryFutureConfig::new(10)
        .exponential_backoff(Duration::from_millis(100))
        .max_delay(Duration::from_secs(5));
    retry_fn(|| async {
        println!("Attempting to connect to PostgreSQL");
        PgConnection::connect_with(options).await
    })
    .with_config(config)
    .await
}

pub async fn create_schema(conn: &mut PgConnection) -> sqlx::Result<()> {
    sqlx::raw_sql(SCHEMA_SQL).execute(conn).await?;
    Ok(())
}

pub async fn insert_author(conn: &mut PgConnection, name: &str) -> sqlx::Result<i32> {
    let (id,): (i32,) = sqlx::query_as("INSERT INTO authors (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(conn)
        .await?;
    Ok(id)
}

pub async fn insert_article(conn: &mut PgConnection, article: &Article) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO articles (author, title, slug) VALUES ($1, $2, $3)")
        .bind(article.author)
        .bind(&article.title)
        .bind(&article.slug)
        .execute(conn)
        .await?;
    Ok(())
}

/// Bulk-inserts log rows through unnested arrays, one round trip per call.
pub async fn insert_requests(conn: &mut PgConnection, requests: &[Request]) -> sqlx::Result<u64> {
    let paths: Vec<String> = requests.iter().map(|r| r.path.clone()).collect();
    let statuses: Vec<String> = requests.iter().map(|r| r.status.clone()).collect();
    let times: Vec<DateTime<Utc>> = requests.iter().map(|r| r.time).collect();
    let result = sqlx::query(
        "INSERT INTO log (path, status, time)
         SELECT * FROM unnest($1::text[], $2::text[], $3::timestamptz[])",
    )
    .bind(&paths)
    .bind(&statuses)
    .bind(&times)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}
