use std::sync::Arc;

#[tokio::main]
async fn main() {
    growstack_observability::init();

    let services = growstack_api::app::services::build_services()
        .await
        .expect("failed to build backend services");
    let app = growstack_api::app::build_app(Arc::new(services));

    let addr = std::env::var("GROWSTACK_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
