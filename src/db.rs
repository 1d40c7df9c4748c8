// habit_backend/src/db.rs
use crate::config::AppConfig;
use crate::models::NewHabit;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use rocket::fairing::AdHoc;

// an R2D2 connection pool
pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Per-connection setup SQLite does not do on its own: referential
/// integrity is off by default, and a concurrent writer surfaces as
/// SQLITE_BUSY without a timeout.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// Initialize the database pool.
pub fn init_pool(database_url: &str) -> SqlitePool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .expect("Failed to create database pool")
}

// Fairing for attaching the pool to Rocket's managed state. Pending
// migrations run here so the schema exists before the first request.
pub fn stage(config: AppConfig) -> AdHoc {
    AdHoc::on_ignite("Diesel SQLite Pool", |rocket| async move {
        let pool = init_pool(&config.database_url());
        let mut conn = pool
            .get()
            .expect("Failed to check out a connection for migrations");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run database migrations");
        rocket.manage(pool)
    })
}

/// Fairing used by the binary only: put a few starter habits into a brand
/// new database. `rocket_instance` never attaches this, so tests and
/// embedders start from an empty store.
pub fn seed_stage() -> AdHoc {
    AdHoc::on_ignite("Sample Habits", |rocket| async {
        let pool = rocket
            .state::<SqlitePool>()
            .expect("Database pool staged before seeding");
        if let Err(e) = seed_sample_habits(pool) {
            log::warn!("Skipping sample habit seeding: {e}");
        }
        rocket
    })
}

/// Insert the sample habits, but only into a completely empty table.
pub fn seed_sample_habits(pool: &SqlitePool) -> anyhow::Result<()> {
    use crate::schema::habits::dsl::*;

    let mut conn = pool.get()?;
    let existing: i64 = habits.count().get_result(&mut conn)?;
    if existing > 0 {
        return Ok(());
    }

    let samples = [
        ("Wake up at 6 AM", "☀️", "bg-orange-100"),
        ("Gym", "💪", "bg-blue-100"),
        ("Exam preparation", "📚", "bg-purple-100"),
        ("Budget Tracking", "💰", "bg-green-100"),
    ];
    for (sample_name, sample_emoji, sample_color) in samples {
        diesel::insert_into(habits)
            .values(&NewHabit {
                name: sample_name,
                emoji: sample_emoji,
                color: sample_color,
            })
            .execute(&mut conn)?;
    }
    log::info!("Seeded {} sample habits", samples.len());
    Ok(())
}
