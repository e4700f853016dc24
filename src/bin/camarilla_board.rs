use camarilla_board::config::{Config, SymbolSpec};
use camarilla_board::services::dashboard_service::{DashboardService, SlotUpdate};
use camarilla_board::ui::{self, app::App, card, navigation};
use camarilla_board::ui::navigation::Action;

use anyhow::{bail, Context};
use clap::{App as Cli, Arg, ArgMatches, SubCommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

// 为两个子命令添加公共参数
fn with_fetch_args<'a>(cmd: Cli<'a>) -> Cli<'a> {
    cmd.arg(
        Arg::with_name("symbol")
            .short('s')
            .long("symbol")
            .value_name("CODE[:KIND]")
            .help("Contract to show, KIND is index or commodity (repeatable, default s50z25 goz25:commodity)")
            .takes_value(true)
            .multiple_occurrences(true),
    )
    .arg(
        Arg::with_name("base-url")
            .long("base-url")
            .value_name("URL")
            .help("Summary API base URL")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("timeout")
            .long("timeout")
            .value_name("SECS")
            .help("HTTP request timeout in seconds")
            .takes_value(true)
            .default_value("30"),
    )
}

fn build_cli<'a>() -> Cli<'a> {
    Cli::new("camarilla-board")
        .version(env!("CARGO_PKG_VERSION"))
        .about("TFEX Camarilla summary dashboard")
        .subcommand(
            with_fetch_args(SubCommand::with_name("watch"))
                .about("Interactive dashboard (default)")
                .arg(
                    Arg::with_name("refresh")
                        .short('r')
                        .long("refresh")
                        .value_name("SECS")
                        .help("Refetch every SECS seconds, 0 fetches once")
                        .takes_value(true)
                        .default_value("0"),
                )
                .arg(
                    Arg::with_name("log-file")
                        .long("log-file")
                        .value_name("PATH")
                        .help("Where to write logs while the dashboard is on screen")
                        .takes_value(true)
                        .default_value("camarilla_board.log"),
                ),
        )
        .subcommand(
            with_fetch_args(SubCommand::with_name("show"))
                .about("Fetch once and print every card as plain text"),
        )
}

// 从命令行参数创建配置
fn config_from(matches: Option<&ArgMatches>) -> anyhow::Result<Config> {
    let mut config = Config::new();
    let Some(matches) = matches else {
        return Ok(config);
    };

    if let Some(values) = matches.values_of("symbol") {
        let symbols = values
            .map(SymbolSpec::parse)
            .collect::<Result<Vec<_>, _>>()
            .context("invalid --symbol")?;
        config = config.with_symbols(symbols);
    }
    if let Some(url) = matches.value_of("base-url") {
        config = config.with_base_url(url);
    }
    if let Some(timeout) = matches.value_of("timeout") {
        config = config.with_request_timeout(timeout.parse().context("invalid --timeout")?);
    }

    Ok(config)
}

// watch 独有的参数
fn watch_config_from(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = config_from(Some(matches))?;

    if let Some(refresh) = matches.value_of("refresh") {
        config = config.with_refresh_interval(refresh.parse().context("invalid --refresh")?);
    }
    if let Some(path) = matches.value_of("log-file") {
        config = config.with_log_file(path);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("show", sub)) => {
            env_logger::init();
            show(config_from(Some(sub))?).await
        }
        Some(("watch", sub)) => watch(watch_config_from(sub)?).await,
        _ => watch(config_from(None)?).await,
    }
}

async fn show(config: Config) -> anyhow::Result<()> {
    let service = DashboardService::from_config(&config)?;
    let results = service.load_all().await;

    let mut failures = 0;
    for (spec, result) in config.symbols.iter().zip(results) {
        println!("== {} ==", spec.code.to_uppercase());
        match result {
            Ok(summary) => {
                let state = card::CardState::from_summary(&summary);
                println!("{}", card::plain_text(&card::card_lines(&summary, spec.kind, &state)));
            }
            Err(e) => {
                failures += 1;
                error!("{} unavailable: {}", spec.code, e);
                println!("unavailable: {}", e);
            }
        }
        println!();
    }

    if failures == config.symbols.len() {
        bail!("no summary could be fetched");
    }
    Ok(())
}

async fn watch(config: Config) -> anyhow::Result<()> {
    // 界面占用终端，日志写入文件
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let service = DashboardService::from_config(&config)?;
    info!("Watching {:?}", service.codes());

    // 崩溃时恢复终端
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &service, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: &DashboardService,
    config: &Config,
) -> anyhow::Result<()> {
    let mut app = App::new(config.symbols.clone());
    let (tx, mut rx) = mpsc::unbounded_channel::<SlotUpdate>();

    service.spawn_fetches(app.begin_refresh(), tx.clone());
    let mut last_fetch = Instant::now();

    let draw_interval = Duration::from_millis(100);
    let mut last_draw: Option<Instant> = None;

    loop {
        let mut dirty = false;

        while let Ok(update) = rx.try_recv() {
            dirty |= app.apply_update(update);
        }

        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                match navigation::handle_key_event(&mut app, key) {
                    Action::Quit => break,
                    Action::Refresh => {
                        service.spawn_fetches(app.begin_refresh(), tx.clone());
                        last_fetch = Instant::now();
                    }
                    Action::None => {}
                }
                dirty = true;
            }
        }

        if let Some(interval) = config.refresh_interval {
            if last_fetch.elapsed() >= interval {
                info!("Periodic refresh after {:?}", interval);
                service.spawn_fetches(app.begin_refresh(), tx.clone());
                last_fetch = Instant::now();
                dirty = true;
            }
        }

        let due = last_draw.map_or(true, |t| t.elapsed() >= draw_interval);
        if dirty || due {
            terminal.draw(|f| ui::draw(f, &app))?;
            last_draw = Some(Instant::now());
        }

        if app.should_quit {
            break;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    info!("Dashboard closed");
    Ok(())
}
