use clap::CommandFactory;
use clap::Parser;
use colored::*;
use env_logger::{Builder, Env, Target};
use is_terminal::IsTerminal;
use log::info;
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use yuetko::cli::{Cli, Commands, OutputFormat};
use yuetko::config::Config;
use yuetko::error::{DictError, Result};
use yuetko::interactive::InteractiveSearch;
use yuetko::loader::{self, Source};
use yuetko::metrics::Metrics;
use yuetko::output::{DisplayOptions, ResultFormatter, TextFormatter, formatter_for};
use yuetko::progress::LoadingIndicator;
use yuetko::session::SearchSession;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let start_time = Instant::now();
    info!("Application started with command: {:?}", cli.command);

    let config = Config::load(cli.config.as_deref())?;
    let source = Source::parse(cli.source.as_deref().unwrap_or(&config.source.location));
    let skip_header = config.source.skip_header && !cli.no_header;
    let stdout_is_tty = std::io::stdout().is_terminal();
    if !stdout_is_tty {
        colored::control::set_override(false);
    }
    let metrics = Arc::new(Metrics::new());

    match &cli.command {
        Commands::Search {
            keyword,
            limit,
            format,
        } => {
            let options = DisplayOptions {
                max_results: limit.unwrap_or(config.display.max_results),
                highlight: config.display.highlight
                    && stdout_is_tty
                    && *format == OutputFormat::Text,
            };
            let session =
                SearchSession::with_tokio(config.session_config(), Arc::clone(&metrics))?;
            let records = load_with_spinner(&source, skip_header, &config, stdout_is_tty).await?;
            session.load_row_store(records)?;

            match session.search_now(keyword)? {
                Some(results) => {
                    let formatter = formatter_for(*format, options);
                    print!("{}", formatter.format(&results));
                    if *format == OutputFormat::Json {
                        println!();
                    }
                }
                None => eprintln!("{}", "Empty keyword, nothing to search".yellow()),
            }
            session.teardown();
        }
        Commands::Interactive { limit } => {
            let options = DisplayOptions {
                max_results: limit.unwrap_or(config.display.max_results),
                highlight: config.display.highlight && stdout_is_tty,
            };
            let session =
                SearchSession::with_tokio(config.session_config(), Arc::clone(&metrics))?;
            InteractiveSearch::new(
                session,
                source,
                skip_header,
                config.source.timeout(),
                options,
            )
            .run()
            .await?;
        }
        Commands::Today { date } => {
            let records = load_with_spinner(&source, skip_header, &config, stdout_is_tty).await?;
            let store = yuetko::store::RowStore::from_records(records);
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let row = store
                .word_of_the_day(date)
                .ok_or_else(|| DictError::EmptyStore(source.to_string()))?;

            let formatter = TextFormatter::new(DisplayOptions {
                max_results: 1,
                highlight: config.display.highlight && stdout_is_tty,
            });
            println!("{} {}", "Word of the day:".green().bold(), date);
            print!("{}", formatter.format_row(row, None));
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "yuetko", &mut std::io::stdout());
        }
    }

    log::debug!("{}", metrics.gather());
    info!(
        "Application finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

async fn load_with_spinner(
    source: &Source,
    skip_header: bool,
    config: &Config,
    visible: bool,
) -> Result<Vec<Vec<String>>> {
    let spinner = LoadingIndicator::new(format!("Loading dictionary from {source}"), visible);
    match loader::load_records(source, skip_header, config.source.timeout()).await {
        Ok(records) => {
            spinner.finish(records.len());
            Ok(records)
        }
        Err(e) => {
            spinner.abandon();
            Err(e)
        }
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent()
            && !parent_dir.as_os_str().is_empty()
            && !parent_dir.exists()
        {
            fs::create_dir_all(parent_dir)?;
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| DictError::Other(e.to_string()))?;
    Ok(())
}
