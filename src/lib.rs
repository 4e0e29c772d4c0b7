use app::state::AppState;

pub async fn run() {
    let config = api::setup_config();
    let conn = api::setup_db(&config.db_url).await;
    utils::db::migrate(&conn).await.expect("Migration failed");

    let state = AppState {
        conn: conn.clone(),
        config: config.clone(),
    };
    app::scheduler::spawn_repair_loop(state.clone());
    app::scheduler::spawn_day_ticker(state);

    let router = api::setup_router(config.clone(), conn);

    let listener = tokio::net::TcpListener::bind(config.get_server_url())
        .await
        .expect("Failed to bind server address");
    tracing::info!("Listening on {}", config.get_server_url());

    axum::serve(listener, router).await.expect("Server failed");
}
