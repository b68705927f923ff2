//! Seed the single ADMIN user. Run once at deployment time:
//!
//!   cargo run --bin seed -- --email admin@example.com --name Admin --password '...'

use clap::Parser;
use uuid::Uuid;

use portfolio_api::{auth, config, database};

#[derive(Parser)]
#[command(name = "seed", about = "Upsert the portfolio admin user")]
struct Args {
    #[arg(long)]
    email: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = config::config();
    if config.database.url.is_empty() {
        anyhow::bail!("DATABASE_URL is not set");
    }

    let pool = database::connect(&config.database)?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let email = args.email.trim().to_lowercase();
    let hash = auth::hash_password(&args.password)?;

    sqlx::query(
        "INSERT INTO users (id, email, name, password, role) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name, \
         password = EXCLUDED.password, role = EXCLUDED.role",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(args.name.trim())
    .bind(&hash)
    .bind(auth::Role::Admin)
    .execute(&pool)
    .await?;

    println!("seed ok: ADMIN {email}");
    Ok(())
}
