use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, FmtSubscriber};

use graph_chain::chain::GraphCypherChain;
use graph_chain::config::Config;
use graph_chain::handlers::create_router;
use graph_chain::llm::{LanguageModel, OpenAiChat};
use graph_chain::{graph, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("graph_chain=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting graph chain service");

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let store = graph::connect(&config).await?;

    let llm = OpenAiChat::new(&config)?;
    info!("LLM client ready (model {})", llm.model());
    let llm: Arc<dyn LanguageModel> = Arc::new(llm);

    let chain = GraphCypherChain::from_config(store.clone(), llm, &config)?;

    let port = config.port;
    let state = AppState {
        chain: Arc::new(chain),
        store,
        config: Arc::new(config),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
