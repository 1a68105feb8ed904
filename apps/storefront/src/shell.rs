//! # Interactive Shell
//!
//! Line-oriented storefront: each line is parsed with clap and dispatched
//! to a command. Pending toasts are printed after every line.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read line ──► clap parse ──► commands::* ──► print output              │
//! │      ▲              │               │                │                  │
//! │      │              ▼               ▼                ▼                  │
//! │      │        [USAGE_ERROR]    [CODE] message   drain toasts            │
//! │      │                                               │                  │
//! │      └───────────────────────────────────────────────┘                  │
//! │                                                                         │
//! │  `quit` or end of input ends the loop                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use mango_core::Category;
use tracing::debug;

use crate::commands;
use crate::error::{AppError, AppResult};
use crate::render;
use crate::state::Session;

/// One shell line.
#[derive(Debug, Parser)]
#[command(name = "mango", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Search by name, variety or description
    Search {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Clear the search text
    ClearSearch,

    /// Check a category (fresh, pulp, processed)
    Category {
        category: Category,

        /// Uncheck instead
        #[arg(long)]
        off: bool,
    },

    /// Check a variety, e.g. `variety Tommy Atkins`
    Variety {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Uncheck instead
        #[arg(long)]
        off: bool,
    },

    /// List categories with product counts
    Categories,

    /// Set the price range in dollars
    Price {
        #[arg(allow_negative_numbers = true)]
        min: f64,
        #[arg(allow_negative_numbers = true)]
        max: f64,
    },

    /// Sort by popularity, price-low, price-high, rating or newest
    Sort { name: String },

    /// Only show products in stock
    InStock { state: Toggle },

    /// Clear search and all filters
    Reset,

    /// Show the filtered products
    List,

    /// Show one product
    Show { id: String },

    /// Add one unit to the cart
    Add { id: String },

    /// Set a cart line's quantity (0 removes it)
    Qty {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Add one more of a cart line
    Inc { id: String },

    /// Remove one of a cart line
    Dec { id: String },

    /// Remove a cart line
    Remove { id: String },

    /// Show the cart
    Cart,

    /// Empty the cart
    ClearCart,

    /// Check out
    Checkout,

    /// Leave the store
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text (may be empty) and read the next line.
    Continue(String),
    Quit,
}

/// Runs the shell until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> AppResult<()> {
    writeln!(
        out,
        "Welcome to {}! {} products in store. Type `help` for commands.",
        session.config.store_name,
        session.store.catalog().len()
    )?;
    prompt(out)?;

    for line in input.lines() {
        let line = line?;

        let quit = match execute_line(session, &line) {
            Ok(Outcome::Continue(text)) => {
                if !text.is_empty() {
                    writeln!(out, "{}", text.trim_end())?;
                }
                false
            }
            Ok(Outcome::Quit) => true,
            Err(err) => {
                writeln!(out, "{}", err.display_line())?;
                false
            }
        };

        for toast in session.drain_notifications() {
            writeln!(out, "{}", render::notification(&toast))?;
        }

        if quit {
            break;
        }
        prompt(out)?;
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

/// Parses and runs one line.
pub fn execute_line(session: &mut Session, line: &str) -> AppResult<Outcome> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Outcome::Continue(String::new()));
    }

    let parsed = match ShellLine::try_parse_from(tokens) {
        Ok(parsed) => parsed,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            return Ok(Outcome::Continue(err.to_string()));
        }
        Err(err) => return Err(AppError::usage(first_line(&err.to_string()))),
    };

    debug!(command = ?parsed.command, "Shell command");
    dispatch(session, parsed.command, line).map(|text| match text {
        Some(text) => Outcome::Continue(text),
        None => Outcome::Quit,
    })
}

fn dispatch(session: &mut Session, command: ShellCommand, line: &str) -> AppResult<Option<String>> {
    use commands::{cart, catalog};

    let text = match command {
        // clap only checks the words; the query is the line as typed.
        ShellCommand::Search { words } => {
            debug!(word_count = words.len(), "Search words");
            catalog::search(session, after_first_word(line))?
        }
        ShellCommand::ClearSearch => catalog::clear_search(session)?,
        ShellCommand::Category { category, off } => catalog::toggle_category(session, category, !off)?,
        ShellCommand::Variety { name, off } => catalog::toggle_variety(session, &name.join(" "), !off)?,
        ShellCommand::Categories => catalog::categories(session)?,
        ShellCommand::Price { min, max } => catalog::set_price_range(session, min, max)?,
        ShellCommand::Sort { name } => catalog::set_sort(session, &name)?,
        ShellCommand::InStock { state } => catalog::set_in_stock_only(session, state == Toggle::On)?,
        ShellCommand::Reset => catalog::reset(session)?,
        ShellCommand::List => catalog::list(session)?,
        ShellCommand::Show { id } => catalog::show(session, &id)?,
        ShellCommand::Add { id } => cart::add(session, &id)?,
        ShellCommand::Qty { id, quantity } => cart::set_quantity(session, &id, quantity)?,
        ShellCommand::Inc { id } => cart::increment(session, &id)?,
        ShellCommand::Dec { id } => cart::decrement(session, &id)?,
        ShellCommand::Remove { id } => cart::remove(session, &id)?,
        ShellCommand::Cart => cart::show_cart(session),
        ShellCommand::ClearCart => cart::clear(session)?,
        ShellCommand::Checkout => cart::checkout(session)?,
        ShellCommand::Quit => return Ok(None),
    };

    Ok(Some(text))
}

/// Everything after the command word, with outer whitespace trimmed.
fn after_first_word(line: &str) -> &str {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(end) => line[end..].trim(),
        None => "",
    }
}

/// clap's message without the usage block, and without its "error: " prefix.
fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default().trim();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

fn prompt<W: Write>(out: &mut W) -> AppResult<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::StoreConfig;
    use mango_core::{Catalog, SortBy};

    fn session() -> Session {
        Session::new(Catalog::builtin(), StoreConfig::default())
    }

    fn run(session: &mut Session, line: &str) -> String {
        match execute_line(session, line).unwrap() {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_blank_line_is_a_no_op() {
        let mut session = session();
        assert_eq!(execute_line(&mut session, "   ").unwrap(), Outcome::Continue(String::new()));
    }

    #[test]
    fn test_filter_commands() {
        let mut session = session();
        run(&mut session, "category pulp");
        run(&mut session, "variety Tommy Atkins");
        run(&mut session, "in-stock on");
        run(&mut session, "sort price-low");

        let criteria = session.store.criteria();
        assert!(criteria.categories.contains(&Category::Pulp));
        assert!(criteria.varieties.contains("Tommy Atkins"));
        assert!(criteria.in_stock_only);
        assert_eq!(criteria.sort_by, SortBy::PriceLow);
        assert_eq!(criteria.active_filter_count(), 3);

        run(&mut session, "category pulp --off");
        assert!(session.store.criteria().categories.is_empty());
    }

    #[test]
    fn test_multi_word_search_keeps_spacing() {
        let mut session = session();
        run(&mut session, "  search mango   pulp  ");
        assert_eq!(session.store.search_query(), "mango   pulp");

        run(&mut session, "search\tAlphonso Mango Pulp");
        assert_eq!(session.store.search_query(), "Alphonso Mango Pulp");
        assert_eq!(session.store.visible_products().len(), 1);
    }

    #[test]
    fn test_after_first_word() {
        assert_eq!(after_first_word("search a  b "), "a  b");
        assert_eq!(after_first_word("   search   x"), "x");
        assert_eq!(after_first_word("list"), "");
    }

    #[test]
    fn test_cart_commands() {
        let mut session = session();
        run(&mut session, "add 1");
        run(&mut session, "add 1");
        run(&mut session, "qty 1 5");
        assert_eq!(session.store.cart_items_count(), 5);

        run(&mut session, "qty 1 -1");
        assert!(session.store.cart().is_empty());
    }

    #[test]
    fn test_huge_quantity_is_refused_and_cart_survives() {
        let mut session = session();
        run(&mut session, "add 1");

        let err = execute_line(&mut session, "qty 1 9223372036854775807").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.display_line(), "[VALIDATION_ERROR] quantity must be at most 999");

        let view = run(&mut session, "cart");
        assert!(view.contains("Total: $24.99"));

        run(&mut session, "qty 1 999");
        assert!(execute_line(&mut session, "inc 1").is_err());
        assert_eq!(session.store.cart_items_count(), 999);
    }

    #[test]
    fn test_bad_input_is_a_usage_error() {
        let mut session = session();

        let err = execute_line(&mut session, "fly").unwrap_err();
        assert_eq!(err.code(), ErrorCode::UsageError);
        assert!(!err.to_string().starts_with("error:"));

        let err = execute_line(&mut session, "category durian").unwrap_err();
        assert_eq!(err.code(), ErrorCode::UsageError);

        let err = execute_line(&mut session, "qty 1 many").unwrap_err();
        assert_eq!(err.code(), ErrorCode::UsageError);
    }

    #[test]
    fn test_help_is_output_not_error() {
        let mut session = session();
        let text = run(&mut session, "help");
        assert!(text.contains("checkout"));
        assert!(text.contains("clear-cart"));
    }

    #[test]
    fn test_quit_and_exit() {
        let mut session = session();
        assert_eq!(execute_line(&mut session, "quit").unwrap(), Outcome::Quit);
        assert_eq!(execute_line(&mut session, "exit").unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_run_shell_prints_errors_and_toasts() {
        let mut session = session();
        let input = "add 2\nadd 4\nbogus\ncheckout\nquit\nlist\n";
        let mut out = Vec::new();

        run_shell(&mut session, input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("Welcome to Mango Grove!"));
        assert!(out.contains("» Added to Cart: Kesar Mangoes has been added to your cart."));
        assert!(out.contains("[OUT_OF_STOCK] Haden Mangoes is out of stock"));
        assert!(out.contains("[USAGE_ERROR]"));
        assert!(out.contains("» Checkout: To complete your purchase"));
        assert!(out.trim_end().ends_with("Goodbye!"));
        assert!(!out.contains("Showing"));
        assert_eq!(session.store.cart_items_count(), 1);
    }

    #[test]
    fn test_run_shell_stops_at_end_of_input() {
        let mut session = session();
        let mut out = Vec::new();
        run_shell(&mut session, "list".as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Showing 14 product(s)"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }
}
