#[tokio::main]
async fn main() {
    if let Err(e) = insightboard_lib::run().await {
        tracing::error!("Insightboard exited with error: {}", e);
        eprintln!("insightboard: {}", e);
        std::process::exit(1);
    }
}
