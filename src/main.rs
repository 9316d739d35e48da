//! Fake News Detector CLI
//!
//! 分析一段新闻文本或一篇文章的真伪（仅供学习用途）

use anyhow::Result;
use clap::{Parser, Subcommand};
use fake_news_detector::{
    cli::{apply_overrides, handle_analyze, handle_show_config, AnalyzeArgs},
    Analyzer, DetectorConfig,
};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "fnd")]
#[command(about = "Fake News Detector - 判断新闻文本或文章的真伪（仅供学习用途）")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 分析一段文本或一个 URL
    Analyze(AnalyzeArgs),
    /// 启动交互式终端界面
    Tui {
        /// 覆盖模型名称
        #[arg(long)]
        model: Option<String>,
        /// 单次请求超时（秒）
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// 显示当前生效的配置
    Config {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 通过 RUST_LOG 控制日志级别；TUI 默认只输出 warn 以上，避免刷乱屏幕
    let default_filter = match cli.command {
        Commands::Tui { .. } => "fake_news_detector=warn,fnd=warn",
        _ => "fake_news_detector=info,fnd=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // 缺少 API key 直接终止，不进入任何界面
    let config = match DetectorConfig::auto_load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    match cli.command {
        Commands::Analyze(args) => {
            if !handle_analyze(args, config)? {
                std::process::exit(1);
            }
        }
        Commands::Tui { model, timeout } => {
            use fake_news_detector::tui::{init_terminal, restore_terminal, run, App};

            let mut config = config;
            apply_overrides(&mut config, model, timeout);
            let analyzer = Analyzer::from_config(&config)?;

            let mut terminal = init_terminal()?;
            let mut app = App::new();

            let result = run(&mut terminal, &mut app, &analyzer);

            restore_terminal(&mut terminal)?;

            result?;
        }
        Commands::Config { json } => {
            println!("{}", handle_show_config(&config, json));
        }
    }

    Ok(())
}
