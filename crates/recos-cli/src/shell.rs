//! Interactive discovery session
//!
//! Hosts a `Screen` on the current thread and a `BackendHandle` for network
//! calls. After every command the shell drains backend events until the
//! screen is idle again, then redraws.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use recos_client::CatalogApi;
use recos_core::{ItemId, Status};
use recos_session::{
    description_view, BackendCommand, BackendHandle, DescriptionView, ItemCard, Screen,
    SessionConfig, SessionError, GENERATING_LABEL,
};
use tracing::debug;

use crate::render;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const SHELL_HELP: &str = r#"Commands:
    search [prompt]     Set the prompt (optional) and search
    category [text]     Filter by category substring (no text clears)
    min [price]         Minimum price (no value clears)
    max [price]         Maximum price (no value clears)
    list                Show the filtered results
    select <n|id>       Select a result by list position or id
    recommend           Fetch recommendations for the selection
    describe            Generate a description for the selection
    analytics           Show the catalog summary
    clear               Drop the selection
    help                Show this help
    quit                Leave the session"#;

struct Shell {
    screen: Screen,
    backend: BackendHandle,
}

pub fn run(api: Arc<dyn CatalogApi>, config: SessionConfig) -> Result<()> {
    let backend = BackendHandle::spawn(api, || {})?;
    let mut shell = Shell {
        screen: Screen::new(config),
        backend,
    };

    println!("Prompt → Recommendations (type `help` for commands)");
    if let Some(cmd) = shell.screen.activate() {
        shell.dispatch(cmd)?;
        shell.show_results();
    }

    let stdin = io::stdin();
    loop {
        print!("recos> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{}", SHELL_HELP),
            "search" => {
                if !rest.is_empty() {
                    shell.screen.set_query(rest);
                }
                let cmd = shell.screen.run_search();
                shell.dispatch(cmd)?;
                shell.show_results();
            }
            "category" => {
                shell.screen.set_category_filter(rest);
                shell.show_results();
            }
            "min" => {
                shell.screen.set_min_price(rest);
                shell.show_results();
            }
            "max" => {
                shell.screen.set_max_price(rest);
                shell.show_results();
            }
            "list" => shell.show_results(),
            "select" => shell.select(rest),
            "recommend" => match shell.screen.request_recommendations() {
                Some(cmd) => {
                    shell.dispatch(cmd)?;
                    shell.show_selection();
                }
                None => println!("Select an item first."),
            },
            "describe" => match shell.screen.request_description() {
                Some(cmd) => {
                    println!("{}", GENERATING_LABEL);
                    shell.dispatch(cmd)?;
                    shell.show_selection();
                }
                None => println!("Select an item first."),
            },
            "analytics" => {
                // Reopening refreshes the summary
                if shell.screen.analytics().is_active() {
                    shell.screen.close_analytics();
                }
                if let Some(cmd) = shell.screen.open_analytics() {
                    shell.dispatch(cmd)?;
                }
                shell.show_analytics();
            }
            "clear" => {
                shell.screen.clear_selection();
                println!("Selection cleared.");
            }
            _ => println!("Unknown command: {} (try `help`)", command),
        }
    }

    Ok(())
}

impl Shell {
    /// Send a command and apply events until nothing is pending
    fn dispatch(&mut self, cmd: BackendCommand) -> Result<()> {
        if let BackendCommand::Search { ticket, .. } = &cmd {
            println!("Searching for {:?}…", ticket.query());
        }
        if let Err(e) = self.backend.send(cmd.clone()) {
            self.screen.abandon(cmd, &e);
            if matches!(e, SessionError::QueueFull) {
                println!("⚠️ {}, try again.", e);
                return Ok(());
            }
            return Err(e.into());
        }

        while self.screen.is_busy() {
            if let Some(event) = self.backend.recv_timeout(POLL_INTERVAL)? {
                let completion = self.screen.apply(event);
                debug!("Backend event {:?}", completion);
            }
        }
        Ok(())
    }

    fn select(&mut self, arg: &str) {
        let visible = self.screen.visible_results();
        let by_position = arg
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| visible.get(idx))
            .map(|item| item.id.clone());

        let id = match by_position {
            Some(id) => id,
            None => match ItemId::parse(arg) {
                Ok(id) => id,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            },
        };

        if self.screen.select(&id) {
            self.show_selection();
        } else {
            println!("No result with id {}", id);
        }
    }

    fn show_results(&self) {
        let search = self.screen.search();
        debug!("Search status: {}", search.status().as_str());
        if let Some(message) = search.error() {
            println!("⚠️ {}", message);
        }

        let criteria = self.screen.criteria();
        if !criteria.is_empty() {
            debug!("Filtering with {:?}", criteria);
        }
        render::print_cards(&self.screen.visible_results());
    }

    fn show_selection(&self) {
        let selection = self.screen.selection();
        let Some(item) = selection.selected() else {
            println!("Nothing selected.");
            return;
        };
        println!("Selected: {}", item.display_title());

        match description_view(selection.description()) {
            DescriptionView::Hidden => {}
            DescriptionView::Generating => println!("{}", GENERATING_LABEL),
            DescriptionView::Text(text) => println!("\n{}\n", text),
        }

        let recommendations = selection.recommendations();
        match recommendations.status() {
            Status::Success if !recommendations.data().is_empty() => {
                println!("You might also like");
                for (position, item) in recommendations.data().iter().enumerate() {
                    let card = ItemCard::from_item(item);
                    render::print_card(position + 1, &card);
                    if !card.categories.is_empty() {
                        println!("    {}", card.categories);
                    }
                }
            }
            Status::Error => {
                if let Some(message) = recommendations.error() {
                    println!("⚠️ Recommendations failed: {}", message);
                }
            }
            _ => {}
        }
    }

    fn show_analytics(&self) {
        let analytics = self.screen.analytics();
        if let Some(message) = analytics.error() {
            println!("⚠️ {}", message);
            return;
        }
        if let Some(histogram) = analytics.histogram() {
            render::print_histogram(histogram);
        }
        if let Some(stats) = analytics.price_stats() {
            render::print_price_stats(stats);
        }
    }
}
