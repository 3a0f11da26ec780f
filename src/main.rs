use mention_composer::logging;
use mention_composer::models::MentionDirectory;
use mention_composer::render::render_html;
use mention_composer::services::config::{settings_path, ConfigService};
use mention_composer::services::ComposerConfig;
use mention_composer::tui::crossterm::into_input_event;
use mention_composer::tui::terminal_guard::{self, TerminalGuard};
use mention_composer::tui::ComposerView;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

const USAGE: &str =
    "usage: composer [--config <settings.json>] <directory.json> [--render <text-file>]";
const IDLE_POLL: Duration = Duration::from_millis(250);
const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq, Eq)]
struct StartupArgs {
    directory: PathBuf,
    render: Option<PathBuf>,
    config: Option<PathBuf>,
}

/// Paths are resolved against `cwd`; the directory file must exist.
fn parse_args<I>(cwd: &Path, args: I) -> Result<StartupArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut directory = None;
    let mut render = None;
    let mut config = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--render" => {
                let value = args.next().ok_or("--render needs a file")?;
                render = Some(cwd.join(value));
            }
            "--config" => {
                let value = args.next().ok_or("--config needs a file")?;
                config = Some(cwd.join(value));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ if directory.is_some() => return Err(format!("unexpected argument {arg}")),
            _ => directory = Some(cwd.join(&arg)),
        }
    }

    let directory = directory.ok_or("missing directory file")?;
    if !directory.is_file() {
        return Err(format!("{} is not a file", directory.display()));
    }
    Ok(StartupArgs {
        directory,
        render,
        config,
    })
}

fn poll_timeout(deadline: Option<Instant>, needs_frame: bool, now: Instant) -> Duration {
    if needs_frame {
        return FRAME_POLL;
    }
    match deadline {
        Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
        None => IDLE_POLL,
    }
}

fn main() -> io::Result<()> {
    let cwd = std::env::current_dir()?;
    let args = match parse_args(&cwd, std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let _logging = logging::init();

    let settings = args.config.clone().or_else(settings_path);
    let config = ConfigService::load_or_default(settings.as_deref())
        .composer()
        .clone();
    let directory = MentionDirectory::load(&args.directory)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?
        .with_link_base(config.link_base.clone());
    tracing::info!(entries = directory.len(), "directory loaded");

    if let Some(path) = &args.render {
        let text = std::fs::read_to_string(path)?;
        println!("{}", render_html(&text, &directory));
        return Ok(());
    }

    let sent = run(Arc::new(directory), config)?;
    for message in sent {
        println!("{message}");
    }
    Ok(())
}

fn run(directory: Arc<MentionDirectory>, config: ComposerConfig) -> io::Result<Vec<String>> {
    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signals = terminal_guard::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut view = ComposerView::new("", directory, config);
    let mut sent = Vec::new();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            view.render(frame, area);
            if let Some(position) = view.cursor_position() {
                frame.set_cursor_position(position);
            }
        })?;
        view.on_frame();

        if signal_rx.try_recv().is_ok() {
            break;
        }

        let timeout = poll_timeout(view.next_deadline(), view.needs_frame(), Instant::now());
        if crossterm::event::poll(timeout)? {
            if let Some(input) = into_input_event(crossterm::event::read()?) {
                if view.handle_input(&input, Instant::now()).is_quit() {
                    break;
                }
            }
        }
        view.tick(Instant::now());
        sent.extend(view.take_submitted());
    }

    drop(terminal);
    drop(guard);
    Ok(sent)
}

#[cfg(test)]
#[path = "../tests/unit/cli_args.rs"]
mod tests;
