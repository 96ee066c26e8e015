use std::future::Future;
use std::io::{self, Write};

use sqlx::PgConnection;

use crate::invariants::ReportLimit;
use crate::queries::{self, ArticleRow, AuthorRow, ErrorDayRow};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// Answers the three report questions against an open connection:
///
/// 1. What are the most popular three articles of all time?
/// 2. Who are the most popular article authors of all time?
/// 3. On which days did more than 1% of requests lead to errors?
///
/// Each section is a header line, one line per result row (or a single
/// fallback line when the query comes back empty), and a trailing
/// blank line. Query and sink errors abort the remaining sections.
pub async fn answer_questions(
    conn: &mut PgConnection,
    limit: ReportLimit,
    out: &mut impl Write,
) -> Result<(), ReportError> {
    writeln!(out, "The most popular three articles of all time:")?;
    run_report(
        out,
        queries::popular_articles(conn),
        format_article,
        "No popular articles to report.",
    )
    .await?;
    writeln!(out)?;

    writeln!(out, "The most popular article authors of all time:")?;
    run_report(
        out,
        queries::popular_authors(conn, limit),
        format_author,
        "No popular authors to report.",
    )
    .await?;
    writeln!(out)?;

    writeln!(out, "Days with more than 1% of requests leading to errors:")?;
    run_report(
        out,
        queries::error_days(conn, limit),
        format_error_day,
        "No error days to report.",
    )
    .await?;
    writeln!(out)?;

    Ok(())
}

/// Executes one report: awaits the query, then renders its rows.
/// Query errors propagate untouched; there is no retry.
async fn run_report<R>(
    out: &mut impl Write,
    query: impl Future<Output = sqlx::Result<Vec<R>>>,
    format: impl Fn(&R) -> String,
    fallback: &str,
) -> Result<(), ReportError> {
    let rows = query.await?;
    render_rows(out, &rows, format, fallback)?;
    Ok(())
}

fn render_rows<R>(
    out: &mut impl Write,
    rows: &[R],
    format: impl Fn(&R) -> String,
    fallback: &str,
) -> io::Result<()> {
    if rows.is_empty() {
        writeln!(out, "{fallback}")?;
    } else {
        for row in rows {
            writeln!(out, "{}", format(row))?;
        }
    }
    Ok(())
}

fn format_article(row: &ArticleRow) -> String {
    format!("{} ({} views)", row.title, row.views)
}

fn format_author(row: &AuthorRow) -> String {
    format!("{} ({} views)", row.name, row.views)
}

fn format_error_day(row: &ErrorDayRow) -> String {
    format!("{} ({:.2}% error)", row.date, error_rate(row))
}

fn error_rate(row: &ErrorDayRow) -> f64 {
    let total = row.error_count + row.ok_count;
    // The query filter requires errors present, but outer-join nulls
    // decode as zero; never divide by a zero total.
    if total == 0 {
        return 0.0;
    }
    100.0 * row.error_count as f64 / total as f64
}

#[cfg(test)]
mod test {
    use super::*;
    use asserting::prelude::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_article_line() {
        let row = ArticleRow {
            id: 1,
            views: 5,
            title: "Foo".into(),
        };
        assert_that!(format_article(&row)).is_equal_to("Foo (5 views)".to_string());
    }

    #[test]
    fn formats_author_line() {
        let row = AuthorRow {
            id: 1,
            name: "Ann".into(),
            views: 7,
        };
        assert_that!(format_author(&row)).is_equal_to("Ann (7 views)".to_string());
    }

    #[test]
    fn formats_error_rate_with_two_decimals() {
        let row = ErrorDayRow {
            date: day(2025, 1, 2),
            error_count: 2,
            ok_count: 98,
        };
        assert_that!(format_error_day(&row)).is_equal_to("2025-01-02 (2.00% error)".to_string());
    }

    #[test]
    fn formats_fractional_error_rate() {
        let row = ErrorDayRow {
            date: day(2016, 7, 17),
            error_count: 1,
            ok_count: 2,
        };
        assert_that!(format_error_day(&row)).is_equal_to("2016-07-17 (33.33% error)".to_string());
    }

    #[test]
    fn errors_only_day_is_a_full_error_rate() {
        let row = ErrorDayRow {
            date: day(2025, 1, 3),
            error_count: 3,
            ok_count: 0,
        };
        assert_that!(format_error_day(&row)).is_equal_to("2025-01-03 (100.00% error)".to_string());
    }

    #[test]
    fn zero_total_renders_zero_rate_instead_of_dividing() {
        let row = ErrorDayRow {
            date: day(2025, 1, 4),
            error_count: 0,
            ok_count: 0,
        };
        assert_that!(format_error_day(&row)).is_equal_to("2025-01-04 (0.00% error)".to_string());
    }

    #[test]
    fn renders_one_line_per_row_in_order() {
        let rows = vec![
            ArticleRow {
                id: 1,
                views: 5,
                title: "Foo".into(),
            },
            ArticleRow {
                id: 2,
                views: 2,
                title: "Bar".into(),
            },
        ];
        let mut out = Vec::new();
        render_rows(&mut out, &rows, format_article, "No popular articles to report.").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Foo (5 views)\nBar (2 views)\n"
        );
    }

    #[test]
    fn renders_fallback_when_empty() {
        let rows: Vec<ArticleRow> = vec![];
        let mut out = Vec::new();
        render_rows(&mut out, &rows, format_article, "No popular articles to report.").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No popular articles to report.\n"
        );
    }

    #[tokio::test]
    async fn run_report_writes_rows_from_the_query() {
        let rows = vec![AuthorRow {
            id: 1,
            name: "Ann".into(),
            views: 7,
        }];
        let mut out = Vec::new();
        run_report(
            &mut out,
            std::future::ready(sqlx::Result::Ok(rows)),
            format_author,
            "No popular authors to report.",
        )
        .await
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Ann (7 views)\n");
    }

    #[tokio::test]
    async fn run_report_propagates_query_errors_unmodified() {
        let mut out = Vec::new();
        let result = run_report(
            &mut out,
            std::future::ready(sqlx::Result::<Vec<AuthorRow>>::Err(
                sqlx::Error::RowNotFound,
            )),
            format_author,
            "No popular authors to report.",
        )
        .await;
        assert!(matches!(result, Err(ReportError::Database(_))));
        assert_that!(out).is_empty();
    }
}
