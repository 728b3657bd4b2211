//! thread-fold - drive a comment thread from the terminal
//!
//! Usage: thread-fold [--db <path> --post <id> | --json <path>] [--toggle <index>]...
//!
//! Without a source, runs on built-in demo comments.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use thread_fold::config::load_ui_config;
use thread_fold::source::parse_json;
use thread_fold::{update, view, CommentPayload, Db, Message, Model, RawComment, RowUpdate};

const DEFAULT_HEIGHT: usize = 20;
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = load_ui_config()?.unwrap_or_default();
    init_logging(config.log_filter.as_deref());

    let height = args
        .height
        .or(config.viewport_height)
        .unwrap_or(DEFAULT_HEIGHT);
    let mut model = Model::new(height, config);

    let comments = match &args.source {
        Source::Db { path, post_id } => {
            Db::open(path)?.list_comments(post_id)?
        }
        Source::Json(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read comments: {}", path.display()))?;
            Some(parse_json(&json)?)
        }
        Source::Demo => Some(demo_comments()),
    };
    update(&mut model, Message::CommentsLoaded(comments));

    for index in &args.toggles {
        activate(&mut model, *index);
    }
    print_rows(&model);

    if args.interactive {
        run_interactive(&mut model)?;
    }

    Ok(())
}

fn init_logging(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_env("THREAD_FOLD_LOG")
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

enum Source {
    Db { path: PathBuf, post_id: String },
    Json(PathBuf),
    Demo,
}

struct CliArgs {
    source: Source,
    toggles: Vec<usize>,
    height: Option<usize>,
    interactive: bool,
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut db_path: Option<PathBuf> = None;
    let mut post_id: Option<String> = None;
    let mut json_path: Option<PathBuf> = None;
    let mut toggles = Vec::new();
    let mut height = None;
    let mut interactive = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("Usage: thread-fold [options]");
                println!();
                println!("Options:");
                println!("  --db <path>       SQLite comment store");
                println!("  --post <id>       Post to load from --db");
                println!("  --json <path>     JSON array of nested comments");
                println!("  --toggle <index>  Activate a comment by list index (repeatable)");
                println!("  --height <rows>   Viewport height");
                println!("  --interactive     Read commands from stdin");
                println!();
                println!("Environment:");
                println!("  THREAD_FOLD_LOG   Log filter, e.g. thread_fold=debug");
                println!();
                println!("Without --db or --json, runs on demo comments.");
                std::process::exit(0);
            }
            "--db" => db_path = Some(PathBuf::from(next_value(&args, &mut i, "--db")?)),
            "--post" => post_id = Some(next_value(&args, &mut i, "--post")?.to_string()),
            "--json" => json_path = Some(PathBuf::from(next_value(&args, &mut i, "--json")?)),
            "--toggle" => {
                let value = next_value(&args, &mut i, "--toggle")?;
                toggles.push(
                    value
                        .parse()
                        .with_context(|| format!("Invalid comment index: {value}"))?,
                );
            }
            "--height" => {
                let value = next_value(&args, &mut i, "--height")?;
                height = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid height: {value}"))?,
                );
            }
            "--interactive" => interactive = true,
            arg => anyhow::bail!("Unknown option: {arg}"),
        }
        i += 1;
    }

    let source = match (db_path, post_id, json_path) {
        (Some(path), Some(post_id), None) => Source::Db { path, post_id },
        (Some(_), None, None) => anyhow::bail!("--db requires --post"),
        (None, Some(_), _) => anyhow::bail!("--post requires --db"),
        (None, None, Some(path)) => Source::Json(path),
        (Some(_), _, Some(_)) => anyhow::bail!("--db and --json are mutually exclusive"),
        (None, None, None) => Source::Demo,
    };

    Ok(CliArgs {
        source,
        toggles,
        height,
        interactive,
    })
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{flag} requires a value"))
}

/// Toggle a comment the user picked by index, refusing ones without a row.
fn activate(model: &mut Model, index: usize) {
    let shown = model
        .comments
        .thread()
        .and_then(|thread| thread.visible_index_of(index))
        .is_some();
    if !shown {
        eprintln!("comment {index} has no visible row");
        return;
    }
    update(model, Message::ToggleComment(index));
    if let Some(row_update) = &model.last_update {
        print_row_update(row_update);
    }
}

fn run_interactive(model: &mut Model) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        let command = line.trim();

        if let Some(index) = command.strip_prefix("t ") {
            match index.trim().parse() {
                Ok(index) => activate(model, index),
                Err(_) => eprintln!("not an index: {index}"),
            }
        } else {
            update(model, map_command_to_message(command));
            if let Some(row_update) = &model.last_update {
                print_row_update(row_update);
            }
        }

        if model.should_quit {
            break;
        }
        print_rows(model);
    }
    Ok(())
}

fn map_command_to_message(command: &str) -> Message {
    match command {
        "q" | "quit" => Message::Quit,
        "j" | "down" => Message::CursorDown,
        "k" | "up" => Message::CursorUp,
        "g" | "top" => Message::CursorTop,
        "G" | "bottom" => Message::CursorBottom,
        "u" | "pageup" => Message::PageUp,
        "d" | "pagedown" => Message::PageDown,
        "p" | "parent" => Message::GoToParent,
        "" | "enter" | "o" => Message::ToggleSelected,
        "C" => Message::CollapseAll,
        "E" => Message::ExpandAll,
        _ => Message::Noop,
    }
}

fn print_rows(model: &Model) {
    println!("--");
    for line in view(model) {
        println!("{line}");
    }
}

fn print_row_update(row_update: &RowUpdate) {
    if !row_update.removed.is_empty() {
        println!(
            "reload row {}, delete rows {:?}",
            row_update.reload, row_update.removed
        );
    } else if !row_update.inserted.is_empty() {
        println!(
            "reload row {}, insert rows {:?}",
            row_update.reload, row_update.inserted
        );
    } else {
        println!("reload row {}", row_update.reload);
    }
}

fn comment(id: &str, author: &str, score: i64, text: &str) -> RawComment {
    RawComment::new(
        id,
        CommentPayload {
            author: author.to_string(),
            text: text.to_string(),
            score,
            created_at: "2025-01-27T12:00:00Z".to_string(),
        },
    )
}

/// Demo thread for running without a store
fn demo_comments() -> Vec<RawComment> {
    vec![
        comment("1", "alice", 42, "This is a great writeup.").with_children(vec![
            comment("2", "bob", 17, "Agreed, though the benchmarks are thin.").with_children(
                vec![
                    comment("3", "carol", 9, "They ran them on a laptop."),
                    comment("4", "alice", 5, "Fair, a server run would help."),
                ],
            ),
            comment("5", "dave", 3, "Anyone tried it on ARM?"),
        ]),
        comment("6", "erin", 12, "Previous discussion from last year."),
        comment("7", "frank", 8, "How does it compare to the old approach?").with_children(vec![
            comment("8", "grace", 6, "Much less memory in my tests."),
        ]),
    ]
}
