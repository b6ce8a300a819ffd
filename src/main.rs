// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use logo_caption_node::{
    api::start_server,
    config::ServiceConfig,
    inference::{ModelConfig, ModelManager},
    version,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env values fill in anything not already set in the environment
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServiceConfig::parse();

    println!("🚀 Starting logo caption node...\n");
    println!("📦 BUILD VERSION: {}", version::get_version_string());
    println!();

    println!("🧠 Loading models...");
    println!("   Caption model: {}", config.caption_model_dir.display());
    println!("   Text model: {}", config.text_model_dir.display());
    println!(
        "   Execution: {} ({} intra-op threads)",
        if config.use_cuda { "CUDA with CPU fallback" } else { "CPU" },
        config.intra_threads
    );

    let models = ModelManager::new(ModelConfig::from(&config)).await?;
    for model in models.list_models() {
        let marker = if model.available { "✅" } else { "⚠️ " };
        println!("   {} {} ({})", marker, model.name, model.kind);
    }

    println!("\n🌐 Serving on http://{}:{}", config.host, config.port);
    println!("   CORS origins: {}", config.cors_allowed_origins.join(", "));
    println!();

    start_server(&config, models).await?;

    println!("👋 Logo caption node stopped");
    Ok(())
}
