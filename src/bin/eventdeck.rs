use anyhow::Result;
use eventdeck::cli::{self, Command};
use eventdeck::config::Config;
use eventdeck::context::{AppContext, SharedContext, StandardContext};
use eventdeck::controller::{Board, Presenter};
use eventdeck::debounce::{SharedClock, SystemClock};
use eventdeck::model::{Category, Event, FilterState, Visibility};
use eventdeck::registration::{RegistrationDesk, RegistrationForm};
use eventdeck::storage::{LocalStorage, default_catalog};
use eventdeck::store::EventStore;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Redraws the listing on stdout after every recomputation.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn apply(&mut self, events: &[Event], visibility: &Visibility) {
        println!();
        print!("{}", cli::render_table(events, visibility));
    }

    fn category_selected(&mut self, category: Category) {
        println!("[{}]", category.label());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = cli::parse_args(&argv)?;

    if args.command == Command::Help {
        cli::print_help("eventdeck");
        return Ok(());
    }

    let ctx: SharedContext = Arc::new(StandardContext::new(args.root.clone()));
    let config = Config::load_or_default(ctx.as_ref())?;
    eventdeck::logging::init(ctx.as_ref(), config.log_level_filter())?;

    match args.command {
        Command::Help => Ok(()),
        Command::Init => run_init(ctx.as_ref(), &config),
        Command::List {
            category,
            search,
            json,
        } => {
            let store = EventStore::new(LocalStorage::load(ctx.as_ref(), &config)?);
            let state = FilterState::new(category.unwrap_or(config.default_category), &search);
            if json {
                let visible = store.filter(&state);
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print!("{}", cli::render_table(store.events(), &store.visibility(&state)));
            }
            Ok(())
        }
        Command::Watch => {
            let store = EventStore::new(LocalStorage::load(ctx.as_ref(), &config)?);
            run_watch(store, &config).await
        }
        Command::Register {
            event_id,
            first_name,
            last_name,
            email,
            phone,
            accept_terms,
        } => {
            let store = EventStore::new(LocalStorage::load(ctx.as_ref(), &config)?);
            let mut form = RegistrationForm::for_event(&store, &event_id)?;
            form.first_name = first_name;
            form.last_name = last_name;
            form.email = email;
            form.phone = phone;
            form.accepted_terms = accept_terms;

            let desk = RegistrationDesk::new(config.confirmation_delay());
            let confirmation = desk.submit(&store, &form).await?;
            println!("{}", confirmation.message());
            Ok(())
        }
    }
}

fn run_init(ctx: &dyn AppContext, config: &Config) -> Result<()> {
    let config_path = Config::get_path_string(ctx)?;
    if ctx.get_config_file_path()?.exists() {
        println!("Config already exists: {}", config_path);
    } else {
        config.save(ctx)?;
        println!("Wrote config: {}", config_path);
    }

    let catalog_path = LocalStorage::catalog_path(ctx, config)?;
    if catalog_path.exists() {
        println!("Catalog already exists: {}", catalog_path.display());
    } else {
        LocalStorage::save(ctx, config, &default_catalog())?;
        println!("Wrote catalog: {}", catalog_path.display());
    }
    Ok(())
}

async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(d) => tokio::time::sleep(d).await,
        None => std::future::pending::<()>().await,
    }
}

/// Interactive listing. Every stdin line is the new value of the search
/// field; `/name` clicks a category button; `:q` or EOF closes the page.
async fn run_watch(store: EventStore, config: &Config) -> Result<()> {
    let clock: SharedClock = Arc::new(SystemClock);
    let mut board = Board::from_config(store, clock, config, TerminalPresenter);
    board.refresh();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let wait = board.search_remaining();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    board.detach_search_input();
                    break;
                };
                let line = line.trim_end_matches(['\r', '\n']);
                if line == ":q" {
                    board.detach_search_input();
                    break;
                }
                if let Some(name) = line.strip_prefix('/') {
                    match name.parse::<Category>() {
                        Ok(category) => {
                            board.select_category(category);
                        }
                        Err(e) => eprintln!("{}", e),
                    }
                } else {
                    board.search_input(line);
                }
            }
            _ = sleep_for(wait) => {
                board.tick();
            }
        }
    }
    Ok(())
}
