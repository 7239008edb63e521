use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use country_core::{update, ListState, Msg, UiState};
use country_engine::{BackgroundRuntime, CountryRepository, CountryViewModel};
use engine_logging::{engine_info, engine_warn};

use super::cli::Args;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::render::{render, TerminalCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Msg(Msg),
    Command(Command),
    Quit,
}

/// Interactive stdin commands that act on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PreviousPage,
    Goto(usize),
    Refresh,
}

pub fn run_app(args: Args) -> anyhow::Result<ExitCode> {
    logging::initialize(args.log);

    let config = AppConfig::resolve(&args).context("loading configuration")?;
    let runtime = BackgroundRuntime::new(&config.runtime_settings())
        .context("starting background runtime")?;
    let transport = config.transport_settings();
    engine_info!("fetching countries from {}", transport.url);
    let repository = CountryRepository::with_settings(transport, runtime.handle())
        .context("building HTTP client")?;
    let view_model = Arc::new(CountryViewModel::new(Arc::new(repository), runtime.handle()));

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(view_model.clone(), &runtime.handle(), event_tx.clone());
    if args.interactive {
        spawn_stdin_reader(event_tx);
    } else {
        drop(event_tx);
    }

    let page_size = config.page_size();
    let mut state = ListState::with_page_size(page_size);
    if args.scroll > 0 {
        state = state.with_initial_scroll(args.scroll);
    }

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            AppEvent::Msg(msg) => msg,
            AppEvent::Command(command) => command_to_msg(command, &state, page_size),
            AppEvent::Quit => break,
        };
        state = dispatch(state, msg, &effects);
        if !args.interactive && state.latest().is_terminal() {
            break;
        }
    }

    let code = match state.latest() {
        UiState::Error(_) => ExitCode::FAILURE,
        UiState::Loading | UiState::Success(_) => ExitCode::SUCCESS,
    };
    Ok(code)
}

fn dispatch(state: ListState, msg: Msg, effects: &EffectRunner) -> ListState {
    let (mut state, pending) = update(state, msg);
    effects.enqueue(pending);

    let view = state.view();
    if !state.consume_dirty() {
        return state;
    }
    execute(render(&view));

    // Notices are transient: shown once, then dismissed.
    if view.notice.is_some() {
        let (mut next, _) = update(state, Msg::NoticeDismissed);
        next.consume_dirty();
        return next;
    }
    state
}

fn execute(commands: Vec<TerminalCommand>) {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    for command in commands {
        let result = match command {
            TerminalCommand::Line(line) => writeln!(out, "{line}"),
            TerminalCommand::Notice(notice) => writeln!(err, "{notice}"),
        };
        if let Err(e) = result {
            engine_warn!("terminal write failed: {}", e);
            return;
        }
    }
}

fn command_to_msg(command: Command, state: &ListState, page_size: usize) -> Msg {
    let offset = state.view().scroll_offset;
    let step = page_size.max(1);
    match command {
        Command::NextPage => Msg::Scrolled {
            offset: offset + step,
        },
        Command::PreviousPage => Msg::Scrolled {
            offset: offset.saturating_sub(step),
        },
        Command::Goto(row) => Msg::Scrolled {
            offset: row.saturating_sub(1),
        },
        Command::Refresh => Msg::RefreshClicked,
    }
}

pub fn parse_command(line: &str) -> Option<AppEvent> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()? {
        "n" | "next" => Command::NextPage,
        "p" | "prev" => Command::PreviousPage,
        "g" | "goto" => Command::Goto(parts.next()?.parse().ok()?),
        "r" | "refresh" => Command::Refresh,
        "q" | "quit" => return Some(AppEvent::Quit),
        _ => return None,
    };
    Some(AppEvent::Command(command))
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(event) => {
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                None => eprintln!("commands: n, p, g <row>, r, q"),
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}
