// exprscope: line-by-line expression analyzer with a terminal viewer

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use exprscope::analysis::constants::DEFAULT_HISTORY_LIMIT;
use exprscope::analysis::{analyze_document, DocumentStats, LineAnalysisResult};
use exprscope::history::{HistoryStore, HistorySummary};
use exprscope::render::cst_to_graph;
use exprscope::report::{render_report, write_report};
use exprscope::ui::App;

/// Analyzed when no file is given and stdin is a terminal
const SAMPLE_INPUT: &str = "3 + 4 * 5\n(a + b) * c\nx + y + z";

const DEFAULT_HISTORY_FILE: &str = ".exprscope_history.json";

#[derive(Debug, Parser)]
#[command(
    name = "exprscope",
    version,
    about = "Tokenize, parse and diagnose arithmetic expressions line by line"
)]
struct Cli {
    /// File to analyze, one expression per line (`-` or absent reads stdin)
    file: Option<PathBuf>,

    /// Print the text report instead of opening the viewer
    #[arg(long)]
    plain: bool,

    /// Also write the text report to this file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Print a Mermaid diagram of every line's parse tree
    #[arg(long)]
    mermaid: bool,

    /// History file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_HISTORY_FILE)]
    history: PathBuf,

    /// Number of history records kept
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Do not read or record history
    #[arg(long, conflicts_with_all = ["list_history", "clear_history"])]
    no_history: bool,

    /// Print the recorded history and exit
    #[arg(long)]
    list_history: bool,

    /// Delete the recorded history and exit
    #[arg(long)]
    clear_history: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut history = open_history(&cli);

    if cli.clear_history {
        if let Some(store) = history.as_mut() {
            store.clear()?;
        }
        println!("History cleared.");
        return Ok(());
    }

    if cli.list_history {
        print_history(history.as_ref());
        return Ok(());
    }

    let input = read_input(&cli)?;
    let results = analyze_document(&input);
    let stats = DocumentStats::from_results(&results);
    info!(
        lines = stats.lines,
        errors = stats.errors,
        valid = stats.valid,
        "analysis complete"
    );

    if let Some(store) = history.as_mut() {
        if !input.trim().is_empty() {
            if let Err(e) = store.add(input.clone(), HistorySummary::from(&stats)) {
                warn!(error = %e, "cannot record history");
            }
        }
    }

    if let Some(path) = &cli.report {
        write_report(path, &results, &input)?;
        eprintln!("Report written to {}", path.display());
    }

    if cli.mermaid {
        print_mermaid(&results);
    }

    if cli.plain || !io::stdout().is_terminal() {
        print!("{}", render_report(&results, &input));
        return Ok(());
    }
    if cli.mermaid {
        return Ok(());
    }

    run_viewer(results)
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose)));

    match &cli.log_file {
        Some(path) => {
            let file = fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "exprscope=warn",
        1 => "exprscope=debug",
        _ => "exprscope=trace",
    }
}

/// The history store, or `None` when history is disabled
fn open_history(cli: &Cli) -> Option<HistoryStore> {
    if cli.no_history {
        return None;
    }
    match HistoryStore::open(&cli.history, cli.history_limit) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "history unavailable, keeping it in memory");
            Some(HistoryStore::in_memory(cli.history_limit))
        }
    }
}

fn print_history(history: Option<&HistoryStore>) {
    let records = history.map(HistoryStore::list).unwrap_or_default();
    if records.is_empty() {
        println!("No history.");
        return;
    }
    for record in records {
        let first_line = record.input.lines().next().unwrap_or_default();
        println!(
            "{}  tokens {:>3}  symbols {:>3}  errors {:>3}  valid {:>3}  {}",
            record.id,
            record.summary.tokens,
            record.summary.symbols,
            record.summary.errors,
            record.summary.valid,
            first_line
        );
    }
}

fn read_input(cli: &Cli) -> io::Result<String> {
    match &cli.file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        Some(_) => read_stdin(),
        None if io::stdin().is_terminal() => Ok(SAMPLE_INPUT.to_string()),
        None => read_stdin(),
    }
}

fn read_stdin() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn print_mermaid(results: &[LineAnalysisResult]) {
    for result in results {
        println!("%% line {}: {}", result.line_number, result.source_text);
        println!("{}", cst_to_graph(result.cst.as_ref()).to_mermaid());
        println!();
    }
}

fn run_viewer(results: Vec<LineAnalysisResult>) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(results);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
