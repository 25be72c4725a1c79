// clens: simulated C compile step with symbol/constant tables and diagnostics

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use clens::analyzer::{Analyzer, AnalyzerConfig};
use clens::ui::app::HELLO_PROGRAM;
use clens::ui::App;

#[derive(Parser)]
#[command(name = "clens")]
#[command(about = "Tokenize C code and report symbol/constant tables and syntax diagnostics")]
#[command(version)]
struct Cli {
    /// C source file to open (the TUI starts with a small sample otherwise)
    file: Option<PathBuf>,

    /// Print the analysis as JSON instead of starting the TUI (reads stdin without FILE)
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Simulated compile time in milliseconds
    #[arg(long, env = "CLENS_DELAY_MS", default_value_t = 800)]
    delay_ms: u64,
}

fn main() -> Result<()> {
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();
    let config = AnalyzerConfig::new().with_compile_delay(Duration::from_millis(cli.delay_ms));
    let analyzer = Analyzer::new(config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .context("failed to start async runtime")?;

    if cli.json {
        let source = match &cli.file {
            Some(path) => read_source(path)?,
            None => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read source from stdin")?;
                buffer
            }
        };

        let result = runtime.block_on(analyzer.compile(source));
        let output = if cli.pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{output}");

        if !result.succeeded {
            process::exit(1);
        }
        return Ok(());
    }

    let source = match &cli.file {
        Some(path) => read_source(path)?,
        None => HELLO_PROGRAM.to_string(),
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(analyzer, runtime.handle().clone(), &source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}
