use article_server::ArticleStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// In-memory article CRUD server.
#[derive(Parser)]
#[command(name = "article-server")]
struct Cli {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "ARTICLE_SERVER_BIND", default_value = "0.0.0.0:9999")]
    bind: String,

    /// Preload the demo articles.
    #[arg(long, env = "ARTICLE_SERVER_SEED")]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let store = ArticleStore::new();
    if cli.seed {
        store.seed().await;
        tracing::info!("seeded demo articles");
    }

    let listener = TcpListener::bind(&cli.bind).await?;
    tracing::info!(addr = %cli.bind, "listening");
    article_server::run(listener, store).await
}
