use std::error::Error;

use api_types::{
    settle::Settle,
    transaction::{
        GameType, SplitType, Transaction, TransactionFilter, TransactionNew, TransactionType,
        TransactionUser,
    },
    user::{User, UserNew},
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::client::Client;

mod client;
mod error;

#[derive(Parser, Debug)]
#[command(name = "splitledger_cli")]
#[command(about = "Command line client for the splitledger server")]
struct Cli {
    /// Server base URL (also read from `SPLITLEDGER_URL`).
    #[arg(long, env = "SPLITLEDGER_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Print raw JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Users(Users),
    Transactions(Transactions),
    /// Show the balance with one user.
    Balance { user_id: String },
    /// Show totals, leaderboard and game statistics.
    Stats,
    /// Record a payment with a friend.
    Settle(SettleArgs),
}

#[derive(Args, Debug)]
struct Users {
    #[command(subcommand)]
    command: UsersCommand,
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,
    Add(UserAddArgs),
    Delete { id: String },
}

#[derive(Args, Debug)]
struct UserAddArgs {
    name: String,
    #[arg(long, default_value = "adventurer")]
    avatar: String,
    /// Member id of a new group; repeat for each member.
    #[arg(long = "member")]
    members: Vec<String>,
}

#[derive(Args, Debug)]
struct Transactions {
    #[command(subcommand)]
    command: TransactionsCommand,
}

#[derive(Subcommand, Debug)]
enum TransactionsCommand {
    List(TransactionListArgs),
    Add(TransactionAddArgs),
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Loan,
    Expense,
    Game,
    Payment,
}

impl From<Kind> for TransactionType {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Loan => TransactionType::Loan,
            Kind::Expense => TransactionType::Expense,
            Kind::Game => TransactionType::Game,
            Kind::Payment => TransactionType::Payment,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Game {
    Poker,
    Mahjong,
    Blackjack,
}

impl From<Game> for GameType {
    fn from(value: Game) -> Self {
        match value {
            Game::Poker => GameType::Poker,
            Game::Mahjong => GameType::Mahjong,
            Game::Blackjack => GameType::Blackjack,
        }
    }
}

#[derive(Args, Debug)]
struct TransactionListArgs {
    #[arg(long = "type", value_enum)]
    kind: Option<Kind>,
    /// Only transactions involving this user.
    #[arg(long, conflicts_with = "kind")]
    user: Option<String>,
}

#[derive(Args, Debug)]
struct TransactionAddArgs {
    #[arg(long = "type", value_enum)]
    kind: Kind,
    #[arg(long)]
    title: String,
    #[arg(long, default_value_t = 0.0)]
    total: f64,
    #[arg(long, value_enum)]
    game_type: Option<Game>,
    #[arg(long)]
    category: Option<String>,
    /// `user_id=amount`; repeat for each participant.
    #[arg(long = "share", value_parser = parse_share, required = true)]
    shares: Vec<TransactionUser>,
    /// Shares were entered by hand and must add up to the total.
    #[arg(long)]
    unequal: bool,
    /// Defaults to today on the server.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args, Debug)]
struct SettleArgs {
    user_id: String,
    /// Settles the whole balance when omitted.
    #[arg(long)]
    amount: Option<f64>,
}

fn parse_share(raw: &str) -> Result<TransactionUser, String> {
    let (user_id, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected user_id=amount, got {raw:?}"))?;
    let amount = amount
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|err| format!("invalid amount in {raw:?}: {err}"))?;
    if user_id.trim().is_empty() {
        return Err(format!("missing user id in {raw:?}"));
    }
    Ok(TransactionUser {
        user_id: user_id.trim().to_string(),
        amount,
    })
}

fn print_users(users: &[User]) {
    for user in users {
        let kind = if user.is_group { "group" } else { "friend" };
        println!("{:<38} {:<20} {:>10.1}  {kind}", user.id, user.name, user.balance);
    }
}

fn print_transactions(txs: &[Transaction]) {
    for tx in txs {
        let kind = match tx.kind {
            TransactionType::Loan => "loan",
            TransactionType::Expense => "expense",
            TransactionType::Game => "game",
            TransactionType::Payment => "payment",
        };
        println!(
            "{} {:<38} {:<8} {:<28} {:>10.1}",
            tx.date, tx.id, kind, tx.title, tx.total_amount
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let client = Client::new(&cli.base_url)?;

    match cli.command {
        Command::Users(Users { command }) => match command {
            UsersCommand::List => {
                let users = client.users().await?;
                if cli.json {
                    print_json(&users)?;
                } else {
                    print_users(&users);
                }
            }
            UsersCommand::Add(args) => {
                let is_group = !args.members.is_empty();
                let payload = UserNew {
                    name: args.name,
                    avatar: args.avatar,
                    is_group: Some(is_group),
                    members: is_group.then_some(args.members),
                };
                let user = client.create_user(&payload).await?;
                let kind = if is_group { "group" } else { "friend" };
                println!("created {kind}: {} ({})", user.name, user.id);
            }
            UsersCommand::Delete { id } => {
                client.delete_user(&id).await?;
                println!("deleted user: {id}");
            }
        },
        Command::Transactions(Transactions { command }) => match command {
            TransactionsCommand::List(args) => {
                let txs = match args.user {
                    Some(user_id) => client.user_transactions(&user_id).await?,
                    None => {
                        let filter = TransactionFilter {
                            kind: args.kind.map(Into::into),
                        };
                        client.transactions(&filter).await?
                    }
                };
                if cli.json {
                    print_json(&txs)?;
                } else {
                    print_transactions(&txs);
                }
            }
            TransactionsCommand::Add(args) => {
                let payload = TransactionNew {
                    kind: args.kind.into(),
                    title: args.title,
                    category: args.category,
                    game_type: args.game_type.map(Into::into),
                    date: args.date,
                    total_amount: args.total,
                    involved_users: args.shares,
                    notes: args.notes,
                    split_type: if args.unequal {
                        SplitType::Unequal
                    } else {
                        SplitType::Equal
                    },
                };
                let tx = client.create_transaction(&payload).await?;
                println!("created transaction: {} ({})", tx.title, tx.id);
            }
            TransactionsCommand::Delete { id } => {
                client.delete_transaction(&id).await?;
                println!("deleted transaction: {id}");
            }
        },
        Command::Balance { user_id } => {
            let balance = client.balance(&user_id).await?;
            if cli.json {
                print_json(&balance)?;
            } else {
                println!("{}: {:.1}", balance.user_id, balance.balance);
            }
        }
        Command::Stats => {
            let stats = client.stats().await?;
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("you are owed   {:>10.1}", stats.total_owed_to_you);
                println!("you owe        {:>10.1}", stats.total_owed);
                println!("net balance    {:>10.1}", stats.net_balance);
                println!(
                    "games          poker {} / mahjong {} / blackjack {}",
                    stats.game_stats.poker, stats.game_stats.mahjong, stats.game_stats.blackjack
                );
                println!("leaderboard");
                print_users(&stats.leaderboard);
            }
        }
        Command::Settle(args) => {
            let payload = Settle {
                user_id: args.user_id,
                amount: args.amount,
                date: None,
            };
            let tx = client.settle(&payload).await?;
            println!("{}: {:.1}", tx.title, tx.total_amount);
        }
    }

    Ok(())
}
