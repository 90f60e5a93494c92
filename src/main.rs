use anyhow::Context;
use clap::{CommandFactory, Parser};
use insular_analyzer::core::report;
use insular_analyzer::core::ConfigProvider;
use insular_analyzer::domain::model::QueryKind;
use insular_analyzer::utils::error::ErrorSeverity;
use insular_analyzer::utils::{logger, validation::Validate};
use insular_analyzer::{AnalysisEngine, AnalyzerError, CliConfig, OutputFormat, SourceStorage, TomlConfig};

fn exit_code(e: &AnalyzerError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: &AnalyzerError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(exit_code(e));
}

async fn run<C: ConfigProvider + Validate>(
    config: C,
    input: &str,
    kind: Option<QueryKind>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let place = config.criteria().place;
    let storage = SourceStorage::for_location(config.data_source());
    let mut engine = AnalysisEngine::new(storage, config);

    if let Err(e) = engine.load().await {
        tracing::error!("Error fetching or parsing data: {}", e);
        eprintln!(
            "❌ Could not load data file ({}). Please ensure it exists.",
            engine.config().data_source()
        );
        fail(&e);
    }

    let analysis = match engine.analyze_as(input, kind) {
        Ok(analysis) => analysis,
        Err(e) => fail(&e),
    };

    let output = match format {
        OutputFormat::Text => report::render_text(&analysis, &place),
        OutputFormat::Json => report::render_json(&analysis).context("rendering JSON report")?,
    };
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.list_sources {
        println!("{}", report::data_sources());
        return Ok(());
    }

    let Some(input) = cli.query_input().map(str::to_string) else {
        CliConfig::command().print_help()?;
        std::process::exit(1);
    };

    // 載入 TOML 配置
    let toml_config = match &cli.config {
        Some(path) => {
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            if let Some(data) = &cli.data {
                config.data.source = data.clone();
            }
            if let Some(mode) = cli.parse_mode {
                config.data.parse_mode = mode;
            }
            config.data.check_header |= cli.check_header;
            Some(config)
        }
        None => None,
    };

    // 初始化日誌
    let verbose = cli.verbose || toml_config.as_ref().is_some_and(TomlConfig::verbose);
    if cli.log_json || toml_config.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting insular-analyzer");
    tracing::debug!("CLI config: {:?}", cli);

    let format = cli.format;
    let kind = cli.expected_kind();
    match toml_config {
        Some(config) => run(config, &input, kind, format).await,
        None => run(cli, &input, kind, format).await,
    }
}
