use clap::Parser;
use dotenvy::dotenv;
use env_logger::Env;
use log::info;
use runtime::{server, store_from_args};
use skill::{ContextManager, SkillConfig};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};

#[derive(Parser)]
#[command(about = "Voice skill that converses through a text-completion API")]
struct Args {
    /// Address to accept turn events on
    #[arg(long, env = "SKILL_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
    /// Directory holding the conversation table; in-memory when omitted
    #[arg(long, env = "SKILL_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Arc::new(SkillConfig::from_env()?);
    info!(
        "starting skill: endpoint={} voice={} max_context={}",
        config.api_url, config.voice, config.max_context_size
    );
    let llm = Arc::new(config.completion_client()?);
    let store = store_from_args(args.data_dir.as_deref(), &config);
    let manager = Arc::new(ContextManager::new(config, llm, store));

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!("listening on {}", args.addr);
    axum::serve(listener, server::router(manager)).await?;
    Ok(())
}
