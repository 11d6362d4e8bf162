// File: ./src/cli.rs
//! Command-line parsing, help text and plain-text rendering of the listing.
use crate::model::{Category, Event, Visibility};
use anyhow::{Result, anyhow};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        /// `None` means the configured default category.
        category: Option<Category>,
        search: String,
        json: bool,
    },
    Watch,
    Register {
        event_id: String,
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        accept_terms: bool,
    },
    Init,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn take_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow!("Missing value for {}", flag))
}

/// Parses everything after the binary name.
pub fn parse_args(argv: &[String]) -> Result<CliArgs> {
    let mut root = None;
    let mut rest = Vec::new();
    let mut it = argv.iter().cloned();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-r" | "--root" => root = Some(PathBuf::from(take_value(&mut it, &arg)?)),
            "-h" | "--help" => {
                return Ok(CliArgs {
                    root,
                    command: Command::Help,
                });
            }
            _ => rest.push(arg),
        }
    }

    let mut it = rest.into_iter();
    let command = match it.next().as_deref() {
        None | Some("list") => {
            let mut category = None;
            let mut search = String::new();
            let mut json = false;
            while let Some(arg) = it.next() {
                match arg.as_str() {
                    "-c" | "--category" => {
                        category = Some(take_value(&mut it, &arg)?.parse::<Category>()?)
                    }
                    "-s" | "--search" => search = take_value(&mut it, &arg)?,
                    "--json" => json = true,
                    other => return Err(anyhow!("Unexpected argument for list: '{}'", other)),
                }
            }
            Command::List {
                category,
                search,
                json,
            }
        }
        Some("help") => Command::Help,
        Some("watch") => Command::Watch,
        Some("init") => Command::Init,
        Some("register") => {
            let event_id = it
                .next()
                .ok_or_else(|| anyhow!("register needs an event id"))?;
            let mut first_name = String::new();
            let mut last_name = String::new();
            let mut email = String::new();
            let mut phone = None;
            let mut accept_terms = false;
            while let Some(arg) = it.next() {
                match arg.as_str() {
                    "--first" => first_name = take_value(&mut it, &arg)?,
                    "--last" => last_name = take_value(&mut it, &arg)?,
                    "--email" => email = take_value(&mut it, &arg)?,
                    "--phone" => phone = Some(take_value(&mut it, &arg)?),
                    "--accept-terms" => accept_terms = true,
                    other => {
                        return Err(anyhow!("Unexpected argument for register: '{}'", other));
                    }
                }
            }
            Command::Register {
                event_id,
                first_name,
                last_name,
                email,
                phone,
                accept_terms,
            }
        }
        Some(other) => return Err(anyhow!("Unknown command '{}'. Try --help.", other)),
    };

    Ok(CliArgs { root, command })
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Renders the visible events as an aligned table, or the empty-state
/// message when nothing matches.
pub fn render_table(events: &[Event], visibility: &Visibility) -> String {
    if visibility.is_empty() {
        return "No events found matching your criteria.\n".to_string();
    }

    let rows: Vec<[String; 4]> = visibility
        .visible_indices()
        .filter_map(|i| events.get(i))
        .map(|e| {
            [
                e.id.clone(),
                e.title.clone(),
                e.format_date(),
                e.categories.join(", "),
            ]
        })
        .collect();

    let headers = ["ID", "TITLE", "DATE", "CATEGORIES"];
    let mut widths = headers.map(UnicodeWidthStr::width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut out = String::new();
    let line = |cells: [&str; 4]| {
        let mut s = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i + 1 == cells.len() {
                s.push_str(cell);
            } else {
                s.push_str(&pad(cell, widths[i]));
                s.push_str("  ");
            }
        }
        s.trim_end().to_string()
    };
    out.push_str(&line(headers));
    out.push('\n');
    for row in &rows {
        out.push_str(&line([&row[0], &row[1], &row[2], &row[3]]));
        out.push('\n');
    }
    out.push_str(&format!(
        "{} of {} events\n",
        visibility.count,
        visibility.visible.len()
    ));
    out
}

pub fn print_help(binary_name: &str) {
    println!(
        "Eventdeck v{} - Search and filter an events listing",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] list [--category <c>] [--search <text>] [--json]", binary_name);
    println!("    {} [--root <path>] watch", binary_name);
    println!(
        "    {} [--root <path>] register <event-id> --first <name> --last <name> --email <addr> [--phone <num>] [--accept-terms]",
        binary_name
    );
    println!("    {} [--root <path>] init", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>       Use a different directory for config and data.");
    println!("    -c, --category <c>      Category filter for 'list'.");
    println!("    -s, --search <text>     Case-insensitive search in titles and descriptions.");
    println!("    --json                  Print the visible events as JSON.");
    println!("    -h, --help              Show this help message.");
    println!();
    println!("CATEGORIES:");
    for cat in Category::iter() {
        println!("    {:<12} {}", cat.as_str(), cat.label());
    }
    println!();
    println!("WATCH MODE:");
    println!("    Type to search; results update once typing pauses.");
    println!("    /<category>       Switch category (e.g. /virtual)");
    println!("    :q                Quit");
}
