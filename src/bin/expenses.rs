use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    Category, ClientConfig, DEFAULT_API_URL, DEFAULT_CACHE_PATH, DEFAULT_REQUEST_TIMEOUT,
    DataSource, DateRange, Error, ExpenseCache, ExpenseDraft, ExpenseId, ExpenseService,
    ExpenseState, HttpExpenseApi, Loaded, SQLiteKeyValueStore, SaveKind, Summary, format_currency,
    format_date, render_dashboard,
};

/// Record expenses and summarise them by category.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The base URL of the expense service.
    #[arg(long, env = "EXPENSES_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File path to the SQLite database used as the local cache.
    #[arg(long, env = "EXPENSES_CACHE_PATH", default_value = DEFAULT_CACHE_PATH)]
    cache_path: String,

    /// How many seconds to wait for the expense service.
    #[arg(long, env = "EXPENSES_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every expense.
    List,

    /// Record a new expense.
    Add {
        /// What the money was spent on.
        #[arg(long)]
        name: String,

        /// How much was spent.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// One of Food, Travel, Entertainment, Bills or Miscellaneous.
        #[arg(long)]
        category: Category,

        /// When the money was spent (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Change an existing expense, fields that are not given keep their value.
    Edit {
        /// The ID of the expense to change.
        id: String,

        /// The new name.
        #[arg(long)]
        name: Option<String>,

        /// The new amount.
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// The new category.
        #[arg(long)]
        category: Option<Category>,

        /// The new date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense.
    Delete {
        /// The ID of the expense to delete.
        id: String,
    },

    /// Show the total and per-category breakdown for a date range.
    Dashboard {
        /// The first day to include (YYYY-MM-DD), defaults to the start of the month.
        #[arg(long)]
        start: Option<String>,

        /// The last day to include (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Also write the dashboard as a HTML page to this path.
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");

            if error.is_retryable() {
                eprintln!("The expense service may be temporarily unavailable, please try again.");
            }

            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), Error> {
    let config = ClientConfig::new(
        &cli.api_url,
        &cli.cache_path,
        Duration::from_secs(cli.timeout_secs),
    );
    let api = HttpExpenseApi::new(&config)?;
    let store = SQLiteKeyValueStore::open(&config.cache_path)?;
    let service = ExpenseService::new(api, ExpenseCache::new(store));

    let Loaded { state, source } = service.load_all(&ExpenseState::default()).await?;

    if let DataSource::Cache(error) = &source {
        eprintln!("Showing cached expenses, they may be out of date ({error}).");
    }

    match cli.command {
        Command::List => print_expenses(&state),
        Command::Add {
            name,
            amount,
            category,
            date,
        } => {
            let date = date.unwrap_or_else(|| format_date(DateRange::current_month_to_date().end));
            let draft = ExpenseDraft::new(&name, &amount, category.as_str(), &date);
            let saved = service.save_or_update(&state, &draft).await?;
            print_saved(saved.kind, &saved.expense.id);
        }
        Command::Edit {
            id,
            name,
            amount,
            category,
            date,
        } => {
            let id = ExpenseId::new(id);
            let existing = state.get(&id).ok_or_else(|| Error::NotFound(id.clone()))?;

            let mut draft = ExpenseDraft::edit(existing);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(amount) = amount {
                draft.amount = amount;
            }
            if let Some(category) = category {
                draft.category = category.to_string();
            }
            if let Some(date) = date {
                draft.date = date;
            }

            let saved = service.save_or_update(&state, &draft).await?;
            print_saved(saved.kind, &saved.expense.id);
        }
        Command::Delete { id } => {
            let id = ExpenseId::new(id);
            service.delete(&state, &id).await?;
            println!("Deleted expense {id}.");
        }
        Command::Dashboard { start, end, html } => {
            let default_range = DateRange::current_month_to_date();
            let start = start.unwrap_or_else(|| format_date(default_range.start));
            let end = end.unwrap_or_else(|| format_date(default_range.end));

            let summary = service.filter_by_range(&state, &start, &end)?;
            let range = DateRange::parse(&start, &end)?;
            print_summary(&summary, range);

            if let Some(path) = html {
                let page = render_dashboard(&summary, range).into_string();
                tokio::fs::write(&path, page)
                    .await
                    .map_err(|error| Error::ReportWriteError(error.to_string()))?;
                println!("Wrote the dashboard to {}.", path.display());
            }
        }
    }

    Ok(())
}

fn print_expenses(state: &ExpenseState) {
    if state.expenses().is_empty() {
        println!("No expenses yet.");
        return;
    }

    for expense in state.expenses() {
        println!(
            "{}  {}  {:<14}  {:>10}  {}",
            expense.id,
            expense.date,
            expense.category,
            format_currency(expense.amount),
            expense.name
        );
    }
}

fn print_saved(kind: SaveKind, id: &ExpenseId) {
    match kind {
        SaveKind::Created => println!("Added expense {id}."),
        SaveKind::Updated => println!("Updated expense {id}."),
    }
}

fn print_summary(summary: &Summary, range: DateRange) {
    println!(
        "Expenses from {} to {}",
        format_date(range.start),
        format_date(range.end)
    );
    println!("Total: {}", format_currency(summary.total));

    for total in &summary.breakdown {
        println!("  {:<14} {:>10}", total.category, format_currency(total.value));
    }
}
