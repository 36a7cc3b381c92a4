use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use stylematch::cli::{Cli, Commands};
use stylematch::config::Config;
use stylematch::pipeline::{resolve_and_synthesize, Pipeline};
use stylematch::server;
use stylematch_common::{parse_label_list, Catalog, Label};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Analyze { image, genero, labels, output } => {
            let labels = labels.as_deref().map(load_labels).transpose()?;
            let pipeline = Pipeline::from_config(&config.resolved(), labels)?;

            let bytes = std::fs::read(&image)
                .with_context(|| format!("画像を読み込めません: {}", image.display()))?;
            let report = pipeline.analyze_bytes(&bytes, genero).await?;

            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Resolve { labels, genero } => {
            let labels = load_labels(&labels)?;
            let config = config.resolved();
            let catalog = match &config.catalog_path {
                Some(path) => Catalog::from_file(path)?,
                None => Catalog::builtin().clone(),
            };

            let (resolution, queries) = resolve_and_synthesize(&labels, genero, &catalog);
            let output = serde_json::json!({
                "genero": genero,
                "resolucion": resolution,
                "query_especifica": queries.specific.to_string(),
                "query_amplia": queries.broad.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Serve { bind } => {
            let config = config.resolved();
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            let pipeline = Arc::new(Pipeline::from_config(&config, None)?);
            server::serve(pipeline, &bind, config.max_body_bytes)
                .await
                .with_context(|| format!("サーバーを起動できません: {}", bind))?;
        }

        Commands::Config { set_serpapi_key, show } => {
            let mut config = config;

            if let Some(key) = set_serpapi_key {
                config.set_serpapi_key(key)?;
                println!("✔ SerpAPIキーを設定しました");
            }

            if show {
                let effective = config.resolved();
                println!("設定:");
                println!("  検索エンドポイント: {}", effective.search_endpoint);
                println!("  検索言語: {}", effective.search_language);
                println!("  検索件数: {}", effective.search_result_count);
                println!("  SerpAPIキー: {}", if effective.serpapi_key.is_some() { "設定済み" } else { "未設定" });
                println!(
                    "  ラベル検出: {}",
                    effective.label_endpoint.as_deref().unwrap_or("未設定")
                );
                println!("  保存先: {}", effective.storage_dir().display());
                println!("  待ち受け: {}", effective.bind);
                println!("  本文上限: {} バイト", effective.max_body_bytes);
            }
        }
    }

    Ok(())
}

fn load_labels(path: &Path) -> anyhow::Result<Vec<Label>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("ラベルファイルを読み込めません: {}", path.display()))?;
    Ok(parse_label_list(&content)?)
}
