use std::{collections::HashMap, error::Error};

use clap::{Args, Parser, Subcommand};
use engine::{Engine, EqualExpenseCmd, MoneyCents};
use migration::MigratorTrait;
use sea_orm::Database;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "tripsplit_admin")]
#[command(about = "Admin utilities for tripsplit (members, expenses, settlements)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./tripsplit.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Member(Member),
    Expense(Expense),
    /// Print every member's net balance.
    Balances,
    /// Print the suggested payments that settle the group.
    Settlements,
    /// Apply or inspect schema migrations.
    Migrate(Migrate),
}

#[derive(Args, Debug)]
struct Member {
    #[command(subcommand)]
    command: MemberCommand,
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    Add {
        #[arg(long)]
        name: String,
    },
    List,
    Remove {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// Record an expense shared equally among the given members.
    AddEqual(AddEqualArgs),
    List,
    Remove {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args, Debug)]
struct AddEqualArgs {
    #[arg(long)]
    description: String,
    /// Amount with up to two decimals, e.g. `12.50`.
    #[arg(long)]
    amount: MoneyCents,
    #[arg(long)]
    payer: Uuid,
    #[arg(long = "member", required = true)]
    members: Vec<Uuid>,
}

#[derive(Args, Debug)]
struct Migrate {
    #[command(subcommand)]
    command: MigrateCommand,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    Up,
    Down,
    Fresh,
    Status,
}

async fn open_engine(database_url: &str) -> Result<Engine, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Engine::builder().database(db).build().await?)
}

async fn migrate(
    database_url: &str,
    command: MigrateCommand,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;

    match command {
        MigrateCommand::Up => migration::Migrator::up(&db, None).await?,
        MigrateCommand::Down => migration::Migrator::down(&db, None).await?,
        MigrateCommand::Fresh => migration::Migrator::fresh(&db).await?,
        MigrateCommand::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}

async fn member(
    engine: &Engine,
    command: MemberCommand,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        MemberCommand::Add { name } => {
            let member = engine.add_member(&name).await?;
            println!("added member: {} ({})", member.name, member.id);
        }
        MemberCommand::List => {
            for member in engine.list_members().await? {
                println!("{}\t{}", member.id, member.name);
            }
        }
        MemberCommand::Remove { id } => {
            engine.delete_member(id).await?;
            println!("removed member: {id}");
        }
    }

    Ok(())
}

async fn expense(
    engine: &Engine,
    command: ExpenseCommand,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        ExpenseCommand::AddEqual(args) => {
            let (expense, splits) = engine
                .add_equal_expense(EqualExpenseCmd::new(
                    args.description,
                    args.amount,
                    args.payer,
                    args.members,
                ))
                .await?;
            println!(
                "added expense: {} {} split {} ways ({})",
                expense.description,
                expense.amount,
                splits.len(),
                expense.id
            );
        }
        ExpenseCommand::List => {
            let names: HashMap<Uuid, String> = engine
                .list_members()
                .await?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect();
            let name_of = |id: &Uuid| names.get(id).map_or("?", String::as_str);

            for (expense, splits) in engine.list_expenses().await? {
                println!(
                    "{}\t{}\t{}\tpaid by {}",
                    expense.id,
                    expense.description,
                    expense.amount,
                    name_of(&expense.payer_id)
                );
                for split in splits {
                    println!("\t{}\t{}", name_of(&split.member_id), split.amount);
                }
            }
        }
        ExpenseCommand::Remove { id } => {
            engine.delete_expense(id).await?;
            println!("removed expense: {id}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let url = cli.database_url.as_str();

    match cli.command {
        Command::Migrate(Migrate { command }) => migrate(url, command).await?,
        Command::Member(Member { command }) => member(&open_engine(url).await?, command).await?,
        Command::Expense(Expense { command }) => {
            expense(&open_engine(url).await?, command).await?;
        }
        Command::Balances => {
            for balance in open_engine(url).await?.balances().await? {
                println!(
                    "{}\tpaid {}\towes {}\tbalance {}",
                    balance.member_name, balance.total_paid, balance.total_owed, balance.balance
                );
            }
        }
        Command::Settlements => {
            let plan = open_engine(url).await?.settlements().await?;
            if plan.is_empty() {
                println!("all settled");
            }
            for settlement in plan {
                println!(
                    "{} -> {}\t{}",
                    settlement.from_member_name, settlement.to_member_name, settlement.amount
                );
            }
        }
    }

    Ok(())
}
