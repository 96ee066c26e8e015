use chrono::{DateTime, Duration, Utc};
use rand::{Rng, seq::IndexedRandom};

const FIRST_NAMES: [&str; 8] = [
    "Ann", "Bob", "Carla", "Dmitri", "Elena", "Farid", "Grace", "Hugo",
];
const LAST_NAMES: [&str; 8] = [
    "Alvarez", "Baker", "Chen", "Diaz", "Engel", "Fontaine", "Gupta", "Hansen",
];
const HEADLINES: [(&str, &str); 6] = [
    ("bats-at-the-belfry", "Bats at the Belfry"),
    ("balloon-goons-doomed", "Balloon Goons Doomed"),
    ("candidate-is-jerk", "Candidate Is Jerk, Alleges Rival"),
    ("bears-in-trouble", "Bears in Trouble"),
    ("goats-eat-google", "Goats Eat Google"),
    ("trouble-for-troubled", "Trouble for Troubled Times"),
];
const NOISE_PATHS: [(&str, u8); 5] = [
    ("/", 30),
    ("/login", 10),
    ("/archive", 15),
    ("/about", 5),
    ("/search", 10),
];
const STATUS: [(&str, u8); 4] = [
    ("200 OK", 85),
    ("404 NOT FOUND", 10),
    ("500 INTERNAL SERVER ERROR", 3),
    ("301 MOVED PERMANENTLY", 2),
];
// Out of 10: how much of the traffic lands on article pages.
const ARTICLE_TRAFFIC_SHARE: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub author: i32,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub status: String,
    pub time: DateTime<Utc>,
}

pub fn generate_author_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).unwrap();
    let last = LAST_NAMES.choose(rng).unwrap();
    format!("{first} {last}")
}

pub fn generate_article<R: Rng + ?Sized>(rng: &mut R, author_ids: &[i32], index: usize) -> Article {
    let author = *author_ids.choose(rng).unwrap();
    let (slug, title) = HEADLINES.choose(rng).unwrap();
    Article {
        author,
        title: format!("{title} #{index}"),
        slug: format!("{slug}-{index}"),
    }
}

pub fn generate_request<R: Rng + ?Sized>(rng: &mut R, slugs: &[String], span_days: i64) -> Request {
    let path = if !slugs.is_empty() && rng.random_range(0..10) < ARTICLE_TRAFFIC_SHARE {
        format!("/article/{}", slugs.choose(rng).unwrap())
    } else {
        NOISE_PATHS.choose_weighted(rng, |(_, w)| *w).unwrap().0.to_string()
    };
    let status = STATUS.choose_weighted(rng, |(_, w)| *w).unwrap().0.to_string();
    let age = Duration::seconds(rng.random_range(0..span_days.max(1) * 24 * 3600));
    Request {
        path,
        status,
        time: Utc::now() - age,
    }
}
