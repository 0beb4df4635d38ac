use devtoolhub_api::{
    db::{create_pool, orm_from_pool, run_migrations},
    seed::seed_store,
    store::PgStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;

    let pool = create_pool(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let store = PgStore::new(orm_from_pool(pool));
    let report = seed_store(&store).await?;

    println!(
        "Seed completed: {} products, {} categories, {} testimonials, {} posts inserted",
        report.products, report.categories, report.testimonials, report.posts
    );
    Ok(())
}
