use std::{
    error::Error,
    path::Path,
    process::exit,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use finance_tracker::{
    NewTransaction, NewUser, PasswordHash, TransactionKind, initialize_db,
    stores::{
        TransactionStore, UserStore,
        sqlite::{SQLiteTransactionStore, SQLiteUserStore},
    },
};

/// A utility for creating a test database for the finance tracker REST API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The name of the demo user.
    #[arg(long, default_value = "Demo User")]
    name: String,

    /// The email the demo user logs in with.
    #[arg(long, default_value = "demo@example.com")]
    email: String,

    /// The password the demo user logs in with.
    #[arg(long, default_value = "password123")]
    password: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let conn = Arc::new(Mutex::new(conn));
    let mut user_store = SQLiteUserStore::new(conn.clone());
    let mut transaction_store = SQLiteTransactionStore::new(conn);

    println!("Creating test user {}...", args.email);

    let user = user_store.create(NewUser {
        name: args.name,
        email: args.email,
        password_hash: PasswordHash::new(&args.password, PasswordHash::DEFAULT_COST)?,
    })?;

    println!("Creating sample transactions...");

    let transactions = sample_transactions();
    let count = transactions.len();
    for transaction in transactions {
        transaction_store.create(user.id(), transaction)?;
    }

    println!("Created {count} transactions for user {}", user.id());
    println!("Success!");

    Ok(())
}

fn sample_transactions() -> Vec<NewTransaction> {
    [
        (TransactionKind::Expense, 45.5, "Food", "Grocery shopping", date!(2024 - 01 - 15)),
        (TransactionKind::Income, 2500.0, "Salary", "Monthly salary", date!(2024 - 01 - 14)),
        (TransactionKind::Expense, 120.0, "Transport", "Gas station", date!(2024 - 01 - 13)),
        (
            TransactionKind::Expense,
            25.99,
            "Entertainment",
            "Netflix subscription",
            date!(2024 - 01 - 12),
        ),
        (TransactionKind::Expense, 89.99, "Shopping", "New shoes", date!(2024 - 01 - 11)),
        (
            TransactionKind::Income,
            150.0,
            "Freelance",
            "Web design project",
            date!(2024 - 01 - 10),
        ),
        (TransactionKind::Expense, 35.0, "Food", "Restaurant dinner", date!(2024 - 01 - 09)),
        (TransactionKind::Expense, 200.0, "Bills", "Electricity bill", date!(2024 - 01 - 08)),
    ]
    .into_iter()
    .map(|(kind, amount, category, description, date)| NewTransaction {
        kind,
        amount,
        category: category.to_owned(),
        description: description.to_owned(),
        date,
    })
    .collect()
}
