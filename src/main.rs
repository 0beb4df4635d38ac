use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devtoolhub_api::{
    ai::{OpenAiProvider, TextGenerator},
    config::{AppConfig, StoreBackend},
    db::{create_pool, orm_from_pool, run_migrations},
    routes::create_router,
    seed::seed_store,
    state::AppState,
    store::{MemoryStore, PgStore, Store},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,devtoolhub_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Store> = match (config.store_backend, config.database_url.as_deref()) {
        (StoreBackend::Postgres, Some(database_url)) => {
            let pool = create_pool(database_url).await?;
            run_migrations(&pool).await?;
            tracing::info!("using postgres store");
            Arc::new(PgStore::new(orm_from_pool(pool)))
        }
        (StoreBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required for the postgres store backend")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    if config.seed_sample_data {
        seed_store(store.as_ref()).await?;
    }

    if config.provider.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; chat replies will use the fallback message");
    }
    if config.auth.admin_password_hash.is_none() {
        tracing::warn!("no admin password configured; admin login is disabled");
    }
    let provider: Arc<dyn TextGenerator> = Arc::new(OpenAiProvider::new(&config.provider)?);

    let state = AppState {
        store,
        provider,
        auth: Arc::new(config.auth.clone()),
        provider_timeout: config.provider.timeout,
    };
    let app = create_router(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
