use std::env;
use std::sync::Arc;

use rosterbot::handler::Handler;
use rosterbot::model::AppState;
use rosterbot::services::identity::PgIdentityService;
use rosterbot::services::roster::PgRosterService;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = env::var("DISCORD_TOKEN").expect("Expected DISCORD_TOKEN in the environment.");
    let database_url = env::var("DATABASE_URL").expect("Expected DATABASE_URL in the environment.");
    let public_base_url = env::var("PUBLIC_BASE_URL").ok();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to the database.");

    let app_state = Arc::new(AppState::new(
        Arc::new(PgRosterService::new(pool.clone())),
        Arc::new(PgIdentityService::new(pool)),
        public_base_url,
    ));

    // Component interactions arrive with GUILDS alone.
    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .await
        .expect("Error creating the Discord client.");

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app_state);
    }

    if let Err(why) = client.start().await {
        tracing::error!(error = ?why, "client error");
    }
}
