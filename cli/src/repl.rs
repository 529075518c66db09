//! Interactive REPL: read a topic, generate, print, repeat until EOF or quit.
//!
//! Used when `-i/--interactive` is passed. Lines starting with `/` are commands acting on the
//! last strategy; anything else is a new topic.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use cli::{print_strategy, run_topic, write_csv, CsvTarget, RunOptions};
use pillar::{Orchestrator, Session, SortConfig, SortKey};

const HELP: &str = "\
Enter a topic to generate a strategy. Commands:
  /sort <keyword|difficulty|intent>  sort the table (same key again flips direction)
  /csv [PATH]                        export the last strategy
  /help                              show this help
  quit | exit                        leave";

/// A parsed REPL line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Help,
    Sort(&'a str),
    Csv(Option<&'a str>),
    Unknown(&'a str),
    Topic(&'a str),
}

fn parse_input(line: &str) -> Option<Input<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if matches!(line, "quit" | "exit" | "/quit" | "/exit") {
        return Some(Input::Quit);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Some(Input::Topic(line));
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (command, None),
    };
    Some(match name {
        "help" => Input::Help,
        "sort" => Input::Sort(arg.unwrap_or("")),
        "csv" => Input::Csv(arg),
        _ => Input::Unknown(name),
    })
}

/// Runs the REPL loop. Generation errors are printed to stderr and the loop continues.
pub async fn run_repl_loop(
    orchestrator: &Orchestrator,
    session: &mut Session,
    mut opts: RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();
    eprintln!("{}", HELP);

    loop {
        print!("topic> ");
        stdout.flush()?;

        let Some(line) = reader.next_line().await? else {
            break;
        };
        let Some(input) = parse_input(&line) else {
            continue;
        };

        match input {
            Input::Quit => break,
            Input::Help => eprintln!("{}", HELP),
            Input::Unknown(name) => eprintln!("unknown command: /{} (try /help)", name),
            Input::Topic(topic) => {
                eprintln!("Researching \"{}\"...", topic);
                if let Err(e) = run_topic(orchestrator, session, topic, &opts, &mut stdout).await {
                    eprintln!("error: {}", e);
                }
            }
            Input::Sort(arg) => match arg.parse::<SortKey>() {
                Ok(key) => {
                    opts.sort = Some(SortConfig::toggle(opts.sort, key));
                    match session.strategy() {
                        Some(strategy) => print_strategy(&mut stdout, strategy, &opts)?,
                        None => eprintln!("sort set; generate a strategy first"),
                    }
                }
                Err(e) => eprintln!("error: {}", e),
            },
            Input::Csv(path) => match (session.strategy(), session.topic()) {
                (Some(strategy), Some(topic)) => {
                    let target = path.map_or(CsvTarget::Default, |p| CsvTarget::Path(p.into()));
                    match write_csv(strategy, topic, &target) {
                        Ok(path) => eprintln!("CSV written to {}", path.display()),
                        Err(e) => eprintln!("error: {}", e),
                    }
                }
                _ => eprintln!("nothing to export yet"),
            },
        }
    }
    Ok(())
}
