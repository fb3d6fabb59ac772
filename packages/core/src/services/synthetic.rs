//! Synthetic product data.
//!
//! Histories are generated from an explicit `today` and a caller-supplied
//! RNG, so a fixed seed always yields the same catalog.

use std::num::NonZeroU32;

use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::insights::error::ProviderError;
use crate::insights::provider::{ProductSource, ProviderResult};
use crate::insights::types::{MetricPoint, Rating, TrendDirection};
use crate::products::{
    Keyword, MobileApp, MobilePlatform, Product, ProductInfo, Technology, WebApp,
};

/// Days of history generated for each demo product.
pub const DEMO_HISTORY_DAYS: u32 = 60;

/// Generate `days + 1` daily points ending at `today`.
///
/// Each step applies the trend (up to +5% a day for `Up`, up to -3% for
/// `Down`) and then a noise term of `(u - 0.5) * volatility * value`.
pub fn generate_history<R: Rng + ?Sized>(
    base_value: f64,
    days: u32,
    volatility: f64,
    trend: TrendDirection,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<MetricPoint> {
    let mut value = base_value;
    let mut history = Vec::with_capacity(days as usize + 1);

    for i in (0..=days).rev() {
        let date = today - Duration::days(i64::from(i));

        match trend {
            TrendDirection::Up => value *= 1.0 + rng.gen::<f64>() * 0.05,
            TrendDirection::Down => value *= 1.0 - rng.gen::<f64>() * 0.03,
            TrendDirection::Stable => {}
        }

        let noise = (rng.gen::<f64>() - 0.5) * volatility * value;
        history.push(MetricPoint::new(date, (value + noise).round().max(0.0)));
    }

    history
}

struct MobileSeed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    description: &'static str,
    developer: &'static str,
    platform: MobilePlatform,
    category_rank: u32,
    rating: f64,
    review_count: u64,
    rating_distribution: [u64; 5],
    review_velocity: f64,
    social_mentions: u64,
    first_seen: (i32, u32, u32),
    history: (f64, f64, TrendDirection),
}

struct WebSeed {
    id: &'static str,
    name: &'static str,
    domain: &'static str,
    category: &'static str,
    description: &'static str,
    backlinks: u64,
    referring_domains: u64,
    keywords: &'static [(&'static str, u64, u32, u32)],
    technologies: &'static [(&'static str, &'static str, f64)],
    github_stars: u64,
    product_hunt_votes: u64,
    social_mentions: u64,
    first_seen: (i32, u32, u32),
    history: (f64, f64, TrendDirection),
}

const MOBILE_SEEDS: &[MobileSeed] = &[
    MobileSeed {
        id: "app-1",
        name: "FocusFlow",
        category: "Productivity",
        description: "AI-powered focus timer with ambient soundscapes",
        developer: "MindfulTech Inc",
        platform: MobilePlatform::Both,
        category_rank: 12,
        rating: 4.7,
        review_count: 8420,
        rating_distribution: [210, 180, 590, 1690, 5750],
        review_velocity: 4.2,
        social_mentions: 3400,
        first_seen: (2023, 8, 15),
        history: (2_000_000.0, 0.15, TrendDirection::Up),
    },
    MobileSeed {
        id: "app-2",
        name: "BudgetBuddy",
        category: "Finance",
        description: "Smart expense tracker with AI insights",
        developer: "FinTech Solutions",
        platform: MobilePlatform::Ios,
        category_rank: 5,
        rating: 4.8,
        review_count: 15230,
        rating_distribution: [300, 150, 610, 2440, 11730],
        review_velocity: 6.8,
        social_mentions: 8900,
        first_seen: (2023, 3, 20),
        history: (3_000_000.0, 0.2, TrendDirection::Up),
    },
    MobileSeed {
        id: "app-3",
        name: "FitQuest",
        category: "Health & Fitness",
        description: "Gamified fitness challenges with friends",
        developer: "HealthTech Labs",
        platform: MobilePlatform::Both,
        category_rank: 28,
        rating: 4.5,
        review_count: 6780,
        rating_distribution: [340, 270, 610, 1560, 4000],
        review_velocity: 2.9,
        social_mentions: 1200,
        first_seen: (2023, 11, 5),
        history: (1_200_000.0, 0.18, TrendDirection::Up),
    },
    MobileSeed {
        id: "app-4",
        name: "QuickNote AI",
        category: "Productivity",
        description: "Voice-to-text notes with AI summarization",
        developer: "NoteWorks",
        platform: MobilePlatform::Android,
        category_rank: 67,
        rating: 4.4,
        review_count: 12450,
        rating_distribution: [620, 500, 1370, 3240, 6720],
        review_velocity: 1.1,
        social_mentions: 640,
        first_seen: (2022, 6, 10),
        history: (3_200_000.0, 0.1, TrendDirection::Stable),
    },
];

const WEB_SEEDS: &[WebSeed] = &[
    WebSeed {
        id: "web-1",
        name: "TaskFlow",
        domain: "taskflow.io",
        category: "Productivity",
        description: "Collaborative task management for remote teams",
        backlinks: 3420,
        referring_domains: 567,
        keywords: &[
            ("task management", 18_000, 8, 72),
            ("remote team tools", 6_500, 4, 55),
        ],
        technologies: &[
            ("React", "Frontend", 0.95),
            ("Node.js", "Backend", 0.9),
            ("PostgreSQL", "Database", 0.86),
        ],
        github_stars: 2340,
        product_hunt_votes: 1876,
        social_mentions: 2100,
        first_seen: (2023, 5, 12),
        history: (300_000.0, 0.15, TrendDirection::Up),
    },
    WebSeed {
        id: "web-2",
        name: "DesignKit Pro",
        domain: "designkit.pro",
        category: "Design",
        description: "AI-powered design system generator",
        backlinks: 8920,
        referring_domains: 1243,
        keywords: &[
            ("design system generator", 7_400, 2, 48),
            ("ui kit", 22_000, 11, 77),
            ("figma design tokens", 2_900, 3, 36),
        ],
        technologies: &[
            ("Vue.js", "Frontend", 0.93),
            ("Nuxt", "Framework", 0.9),
            ("Supabase", "Database", 0.84),
            ("Vercel", "Hosting", 0.97),
        ],
        github_stars: 8760,
        product_hunt_votes: 4532,
        social_mentions: 12_400,
        first_seen: (2023, 9, 8),
        history: (400_000.0, 0.25, TrendDirection::Up),
    },
    WebSeed {
        id: "web-3",
        name: "CodeSnippet",
        domain: "codesnippet.dev",
        category: "Developer Tools",
        description: "Beautiful code snippet manager and sharing platform",
        backlinks: 2180,
        referring_domains: 423,
        keywords: &[
            ("code snippet manager", 4_200, 5, 42),
            ("developer tools", 28_000, 23, 81),
            ("code sharing platform", 3_100, 9, 38),
        ],
        technologies: &[
            ("React", "Frontend", 0.94),
            ("Next.js", "Framework", 0.91),
            ("Monaco Editor", "Library", 0.89),
            ("PostgreSQL", "Database", 0.87),
            ("Redis", "Cache", 0.82),
        ],
        github_stars: 5420,
        product_hunt_votes: 2134,
        social_mentions: 1800,
        first_seen: (2023, 7, 22),
        history: (200_000.0, 0.12, TrendDirection::Up),
    },
    WebSeed {
        id: "web-4",
        name: "EmailCraft",
        domain: "emailcraft.app",
        category: "Marketing",
        description: "No-code email template builder with AI",
        backlinks: 1560,
        referring_domains: 298,
        keywords: &[
            ("email template builder", 9_200, 6, 59),
            ("no code email design", 3_800, 4, 45),
            ("html email creator", 5_600, 10, 52),
        ],
        technologies: &[
            ("Svelte", "Frontend", 0.92),
            ("SvelteKit", "Framework", 0.9),
            ("Tailwind CSS", "Styling", 0.94),
            ("Stripe", "Payment", 0.88),
            ("SendGrid", "Email", 0.86),
        ],
        github_stars: 1240,
        product_hunt_votes: 987,
        social_mentions: 950,
        first_seen: (2023, 10, 15),
        history: (150_000.0, 0.14, TrendDirection::Up),
    },
];

fn seed_date(id: &str, (y, m, d): (i32, u32, u32)) -> ProviderResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| ProviderError::format_error(format!("{}: invalid first-seen date", id)))
}

fn mobile_from_seed<R: Rng + ?Sized>(
    seed: &MobileSeed,
    today: NaiveDate,
    rng: &mut R,
) -> ProviderResult<Product> {
    let (base, volatility, trend) = seed.history;
    let rating = Rating::new(seed.rating)
        .map_err(|err| ProviderError::format_error(format!("{}: {}", seed.id, err)))?;
    let first_seen = seed_date(seed.id, seed.first_seen)?;

    Ok(Product::Mobile(MobileApp {
        info: ProductInfo {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            category: seed.category.to_string(),
            description: seed.description.to_string(),
            first_seen,
        },
        mobile_platform: seed.platform,
        developer: seed.developer.to_string(),
        category_rank: NonZeroU32::new(seed.category_rank),
        rating,
        review_count: seed.review_count,
        rating_distribution: Some(seed.rating_distribution),
        has_in_app_purchases: true,
        review_velocity: seed.review_velocity,
        social_mentions: seed.social_mentions,
        download_history: generate_history(base, DEMO_HISTORY_DAYS, volatility, trend, today, rng),
    }))
}

fn web_from_seed<R: Rng + ?Sized>(
    seed: &WebSeed,
    today: NaiveDate,
    rng: &mut R,
) -> ProviderResult<Product> {
    let (base, volatility, trend) = seed.history;
    let first_seen = seed_date(seed.id, seed.first_seen)?;

    Ok(Product::Web(WebApp {
        info: ProductInfo {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            category: seed.category.to_string(),
            description: seed.description.to_string(),
            first_seen,
        },
        domain: seed.domain.to_string(),
        backlinks: seed.backlinks,
        referring_domains: seed.referring_domains,
        top_keywords: seed
            .keywords
            .iter()
            .map(|&(keyword, volume, position, difficulty)| Keyword {
                keyword: keyword.to_string(),
                volume,
                position,
                difficulty,
            })
            .collect(),
        technologies: seed
            .technologies
            .iter()
            .map(|&(name, category, confidence)| Technology {
                name: name.to_string(),
                category: category.to_string(),
                confidence,
            })
            .collect(),
        github_stars: Some(seed.github_stars),
        product_hunt_votes: Some(seed.product_hunt_votes),
        social_mentions: seed.social_mentions,
        traffic_history: generate_history(base, DEMO_HISTORY_DAYS, volatility, trend, today, rng),
    }))
}

/// The demo catalog: four mobile apps followed by four web products.
pub fn demo_catalog<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> ProviderResult<Vec<Product>> {
    let mut products = Vec::with_capacity(MOBILE_SEEDS.len() + WEB_SEEDS.len());
    for seed in MOBILE_SEEDS {
        products.push(mobile_from_seed(seed, today, rng)?);
    }
    for seed in WEB_SEEDS {
        products.push(web_from_seed(seed, today, rng)?);
    }
    Ok(products)
}

/// Deterministic in-process source backed by [`demo_catalog`].
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: u64,
    today: NaiveDate,
}

impl SyntheticSource {
    pub fn new(seed: u64, today: NaiveDate) -> Self {
        Self { seed, today }
    }
}

impl ProductSource for SyntheticSource {
    fn load_products(&self) -> ProviderResult<Vec<Product>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let products = demo_catalog(self.today, &mut rng)?;
        tracing::debug!(
            "Generated {} synthetic products (seed {}, today {})",
            products.len(),
            self.seed,
            self.today
        );
        Ok(products)
    }

    fn source_name(&self) -> &str {
        "synthetic"
    }
}
