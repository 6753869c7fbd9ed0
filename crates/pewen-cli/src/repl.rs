//! Interactive read-eval-print loop over a running session

use std::str::FromStr;

use anyhow::Result;
use pewen::{
    available_actions, render, spawn_from_config, Event, LogObserver, Observer, PetState,
    PewenConfig, SessionHandle, Severity,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, ExternalPrinter};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

const PROMPT: &str = "pewen> ";

/// A parsed REPL line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Connect,
    Adopt,
    Return,
    Status { json: bool },
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["connect"] => Ok(Command::Connect),
            ["adopt"] => Ok(Command::Adopt),
            ["return"] => Ok(Command::Return),
            ["status"] => Ok(Command::Status { json: false }),
            ["status", "--json"] => Ok(Command::Status { json: true }),
            ["help"] | ["?"] => Ok(Command::Help),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            [] => Err("empty command".to_string()),
            _ => Err(format!("unknown command: {} (try `help`)", line.trim())),
        }
    }
}

/// Run the REPL until `quit`, Ctrl-C or Ctrl-D.
pub fn run(runtime: &Runtime, config: &PewenConfig) -> Result<()> {
    let (tx, mut events) = mpsc::unbounded_channel::<Event>();
    let observers: Vec<Box<dyn Observer>> = vec![Box::new(LogObserver), Box::new(tx)];
    let (handle, join) = {
        let _guard = runtime.enter();
        spawn_from_config(config, Box::new(observers))?
    };

    let mut editor = DefaultEditor::new()?;

    // Events arrive while readline owns the terminal, so they go through
    // rustyline's printer when it has one.
    let mut emit: Box<dyn FnMut(String) + Send> = match editor.create_external_printer() {
        Ok(mut printer) => Box::new(move |line| {
            let _ = printer.print(line);
        }),
        Err(_) => Box::new(|line| println!("{}", line)),
    };
    runtime.spawn(async move {
        while let Some(event) = events.recv().await {
            emit(event_line(&event));
        }
    });
    print!("{}", render(&runtime.block_on(handle.snapshot())?));
    print_help(&runtime.block_on(handle.snapshot())?);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(runtime, &handle, command)?,
                    Err(message) => eprintln!("{}", message),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    handle.shutdown();
    let state = runtime.block_on(join)?;
    println!("Goodbye! You leave with {} tokens.", state.tokens);
    Ok(())
}

fn execute(runtime: &Runtime, handle: &SessionHandle, command: Command) -> Result<()> {
    let outcome = match command {
        Command::Connect => runtime.block_on(handle.connect_wallet()).map(|_| ()),
        Command::Adopt => runtime.block_on(handle.adopt()).map(|_| ()),
        Command::Return => runtime.block_on(handle.return_tree()).map(|_| ()),
        Command::Status { json } => {
            let state = runtime.block_on(handle.snapshot())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print!("{}", render(&state));
            }
            return Ok(());
        }
        Command::Help => {
            print_help(&runtime.block_on(handle.snapshot())?);
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };

    if let Err(err) = outcome {
        // Errors the session already announced as events are not repeated.
        if Event::for_error(&err).is_none() {
            eprintln!("{}", err);
        }
    }
    print!("{}", render(&runtime.block_on(handle.snapshot())?));
    Ok(())
}

fn event_line(event: &Event) -> String {
    match event.severity() {
        Severity::Info => format!("* {}", event),
        Severity::Destructive => format!("! {}", event),
    }
}

fn print_help(state: &PetState) {
    println!("Available now:");
    for action in available_actions(state) {
        println!("  {}", action);
    }
    println!("Always: status [--json], help, quit");
}
