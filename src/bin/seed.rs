//! Demo data: a handful of accounts sharing one demo password and a spread
//! of vacancies with staggered creation dates, so filtering, sorting and
//! pagination are visible on a fresh database.

use rand::seq::SliceRandom;
use sqlx::postgres::PgPoolOptions;
use time::{Duration, OffsetDateTime};

use jobdesk::auth::password::hash_password;
use jobdesk::config::AppConfig;
use jobdesk::vacancies::Category;

const USERNAMES: &[&str] = &[
    "nino_beridze",
    "giorgi_kapanadze",
    "mariam_japaridze",
    "luka_tsiklauri",
    "ana_gogoladze",
    "davit_chkheidze",
    "sofia_kvaratskhelia",
    "nikoloz_bolkvadze",
    "ketevan_mchedlidze",
    "tornike_gelashvili",
];

struct JobTemplate {
    title: &'static str,
    short_description: &'static str,
    full_description: &'static str,
    category: Category,
    company: &'static str,
    salary: &'static str,
    location: &'static str,
    days_ago: i64,
}

const JOBS: &[JobTemplate] = &[
    JobTemplate {
        title: "Backend Developer",
        short_description: "Build robust server-side applications and APIs for our growing platform.",
        full_description: "We are looking for a skilled Backend Developer to join our engineering team. \
            You will design and develop scalable server-side applications, create and maintain REST APIs, \
            and work with relational databases day to day.",
        category: Category::It,
        company: "FutureTech",
        salary: "$80,000-$110,000",
        location: "Remote",
        days_ago: 1,
    },
    JobTemplate {
        title: "Frontend Developer",
        short_description: "Craft responsive interfaces and delightful user experiences.",
        full_description: "Join our product team to build accessible, fast web interfaces. \
            You will own features end to end, collaborate with designers and keep our component \
            library in good shape.",
        category: Category::It,
        company: "PixelPerfect",
        salary: "$70,000-$95,000",
        location: "Tbilisi",
        days_ago: 5,
    },
    JobTemplate {
        title: "UX/UI Designer",
        short_description: "Design intuitive product flows from research to polished visuals.",
        full_description: "We need a designer who can take a problem from user interviews through \
            wireframes to final visuals, and defend every decision with evidence.",
        category: Category::Design,
        company: "InnovateLabs",
        salary: "$60,000-$85,000",
        location: "Batumi",
        days_ago: 8,
    },
    JobTemplate {
        title: "Content Marketing Manager",
        short_description: "Own our content calendar and grow organic reach.",
        full_description: "Plan, write and measure content across the blog, newsletter and social \
            channels. You will work with product and sales to turn launches into stories.",
        category: Category::Marketing,
        company: "DigitalCraft",
        salary: "$55,000-$75,000",
        location: "Hybrid",
        days_ago: 12,
    },
    JobTemplate {
        title: "Account Executive",
        short_description: "Close mid-market deals and grow existing accounts.",
        full_description: "Run the full sales cycle from qualified lead to signed contract. \
            You will carry a quota, keep the CRM honest and feed learnings back to marketing.",
        category: Category::Sales,
        company: "LogicLabs",
        salary: "$50,000 base + commission",
        location: "Tbilisi",
        days_ago: 17,
    },
    JobTemplate {
        title: "Product Manager",
        short_description: "Define product vision and strategy, working with teams to bring products to market.",
        full_description: "We seek a Product Manager to lead product development from concept to launch: \
            define the roadmap, gather and prioritize requirements, and track success metrics.",
        category: Category::Other,
        company: "InnovateLabs",
        salary: "$100,000-$140,000",
        location: "Hybrid",
        days_ago: 23,
    },
    JobTemplate {
        title: "Customer Support Representative",
        short_description: "Provide excellent customer service and support to ensure customer satisfaction.",
        full_description: "Respond to customer inquiries via phone, email and chat, troubleshoot issues \
            and escalate what you cannot resolve, keeping every interaction documented.",
        category: Category::Other,
        company: "FutureTech",
        salary: "$30,000-$45,000",
        location: "Remote",
        days_ago: 27,
    },
];

const VACANCY_COUNT: usize = 20;
const DEMO_PASSWORD: &str = "11111111";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "seed=info".into()))
        .init();

    let config = AppConfig::from_env()?;
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    // One hash shared by every demo account; hashing is deliberately slow.
    let hash = hash_password(DEMO_PASSWORD)?;

    let mut account_ids = Vec::with_capacity(USERNAMES.len());
    for username in USERNAMES {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO accounts (email, username, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO UPDATE SET email = EXCLUDED.email
            RETURNING id
            "#,
        )
        .bind(format!("{username}@gmail.com"))
        .bind(username)
        .bind(&hash)
        .fetch_one(&db)
        .await?;
        account_ids.push(id);
    }
    tracing::info!(accounts = account_ids.len(), "demo accounts ready");

    let mut rng = rand::thread_rng();
    let now = OffsetDateTime::now_utc();
    for _ in 0..VACANCY_COUNT {
        let author_id = *account_ids.choose(&mut rng).expect("accounts seeded");
        let job = JOBS.choose(&mut rng).expect("job templates present");
        sqlx::query(
            r#"
            INSERT INTO vacancies
                (title, category, author_id, short_description, full_description,
                 company, salary, location, date_created)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(job.title)
        .bind(job.category)
        .bind(author_id)
        .bind(job.short_description)
        .bind(job.full_description)
        .bind(job.company)
        .bind(job.salary)
        .bind(job.location)
        .bind(now - Duration::days(job.days_ago))
        .execute(&db)
        .await?;
    }
    tracing::info!(vacancies = VACANCY_COUNT, "demo vacancies ready");

    Ok(())
}
