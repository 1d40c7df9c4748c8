use habit_backend::config::AppConfig;
use habit_backend::{db, rocket_instance};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let app_config = AppConfig::from_env();
    rocket_instance(app_config)
        .attach(db::seed_stage())
        .launch()
        .await?;
    Ok(())
}
