use chrono::NaiveDate;
use sqlx::{FromRow, PgConnection};

use crate::invariants::ReportLimit;

// Only log traffic under /article/ correlates with content; the inner
// joins on '/article/' || slug drop counted paths with no matching row.
const POPULAR_ARTICLES_SQL: &str = r#"
SELECT articles.id, article_views.views, articles.title
  FROM (
    SELECT path, count(*) AS views
      FROM log
      WHERE path LIKE '/article/%'
      GROUP BY path
      ORDER BY views DESC
      LIMIT 3
  ) AS article_views
  INNER JOIN articles
    ON '/article/' || articles.slug = article_views.path
  ORDER BY article_views.views DESC;
"#;

const POPULAR_AUTHORS_SQL: &str = r#"
SELECT authors.id, authors.name, author_views.views
  FROM (
    SELECT articles.author AS author, sum(article_views.views)::bigint AS views
      FROM (
        SELECT path, count(*) AS views
          FROM log
          WHERE path LIKE '/article/%'
          GROUP BY path
      ) AS article_views
      INNER JOIN articles
        ON article_views.path = '/article/' || articles.slug
      GROUP BY articles.author
  ) AS author_views
  INNER JOIN authors
    ON author_views.author = authors.id
  ORDER BY author_views.views DESC
  LIMIT $1;
"#;

// Full outer join so a day with only errors (or only successes) still
// appears; a missing side reads as zero. The rate filter is strictly
// greater than 1%.
const ERROR_DAYS_SQL: &str = r#"
SELECT
    COALESCE(ok_counts.date, error_counts.date) AS date,
    COALESCE(error_counts.error_count, 0) AS error_count,
    COALESCE(ok_counts.ok_count, 0) AS ok_count
  FROM (
    SELECT date_trunc('day', time)::date AS date, count(*) AS ok_count
      FROM log
      WHERE status = '200 OK'
      GROUP BY date
  ) AS ok_counts
  FULL OUTER JOIN (
    SELECT date_trunc('day', time)::date AS date, count(*) AS error_count
      FROM log
      WHERE status != '200 OK'
      GROUP BY date
  ) AS error_counts
    ON ok_counts.date = error_counts.date
  WHERE 100 * COALESCE(error_counts.error_count, 0)
        > COALESCE(error_counts.error_count, 0) + COALESCE(ok_counts.ok_count, 0)
  ORDER BY date DESC
  LIMIT $1;
"#;

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct ArticleRow {
    pub id: i32,
    pub views: i64,
    pub title: String,
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct AuthorRow {
    pub id: i32,
    pub name: String,
    pub views: i64,
}

#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct ErrorDayRow {
    pub date: NaiveDate,
    pub error_count: i64,
    pub ok_count: i64,
}

/// Top three most-viewed articles, views descending.
pub async fn popular_articles(conn: &mut PgConnection) -> sqlx::Result<Vec<ArticleRow>> {
    sqlx::query_as(POPULAR_ARTICLES_SQL).fetch_all(conn).await
}

/// Authors by summed article views, descending, truncated to `limit`.
pub async fn popular_authors(
    conn: &mut PgConnection,
    limit: ReportLimit,
) -> sqlx::Result<Vec<AuthorRow>> {
    sqlx::query_as(POPULAR_AUTHORS_SQL)
        .bind(limit.to_sql())
        .fetch_all(conn)
        .await
}

/// Days where more than 1% of requests errored, newest first,
/// truncated to `limit`.
pub async fn error_days(
    conn: &mut PgConnection,
    limit: ReportLimit,
) -> sqlx::Result<Vec<ErrorDayRow>> {
    sqlx::query_as(ERROR_DAYS_SQL)
        .bind(limit.to_sql())
        .fetch_all(conn)
        .await
}
