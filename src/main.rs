use std::{net::SocketAddr, sync::Arc};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use year_progress::{
    clock::{Clock, SystemClock},
    models::RangeQuery,
    pipeline::render_for_query,
    router,
    scheduler::{Scheduler, TickReason},
    AppState, Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let default_year = config.default_year;

    let initial = render_for_query(&RangeQuery::default(), default_year, clock.now());
    let (live_tx, live_rx) = watch::channel(initial);

    let mut scheduler = Scheduler::start(config.tick_interval, Arc::clone(&clock), {
        let clock = Arc::clone(&clock);
        move |reason| {
            let render = render_for_query(&RangeQuery::default(), default_year, clock.now());
            if reason == TickReason::Midnight {
                info!(day = %render.day_label, "recomputed progress after midnight");
            }
            live_tx.send_replace(render);
        }
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config, clock, live_rx));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop();
    info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
