//! Quindutch CLI - Banker quinella dutching from the terminal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::runtime::Runtime;

use quindutch::core::dutching::{dutch_banker_quinella, DutchingAllocation};
use quindutch::fetcher::{ClientConfig, OddsClient, QuinellaSnapshot};
use quindutch::models::parse_pair_key;

/// Refresh cadence for watch mode, in seconds
const DEFAULT_REFRESH_SECS: u64 = 15;

#[derive(Parser)]
#[command(name = "quindutch")]
#[command(author, version, about = "Banker quinella dutching CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "5")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show quinella odds for a race
    Odds {
        /// Race number (1-12)
        #[arg(short, long)]
        race: u8,

        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,

        /// Refresh interval in seconds
        #[arg(long, default_value_t = DEFAULT_REFRESH_SECS)]
        interval: u64,
    },

    /// Compute an equal-profit dutching allocation
    Dutch {
        /// Race number (1-12)
        #[arg(short, long)]
        race: u8,

        /// Banker horse number
        #[arg(short, long)]
        banker: u32,

        /// Horses to pair with the banker, comma separated (e.g. 2,5,7)
        #[arg(short, long, value_delimiter = ',')]
        others: Vec<u32>,

        /// Total stake (HKD)
        #[arg(short, long, default_value = "100.0")]
        stake: f64,

        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,

        /// Refresh interval in seconds
        #[arg(long, default_value_t = DEFAULT_REFRESH_SECS)]
        interval: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("{}", "Quindutch CLI v0.2.0".cyan().bold());
    println!();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let client = OddsClient::new(ClientConfig {
        timeout_secs: cli.timeout,
        ..Default::default()
    });

    if cli.interactive {
        run_interactive(&rt, &client)?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Odds {
                race,
                watch,
                interval,
            } => {
                validate_race(race)?;
                loop {
                    if let Some(snapshot) = fetch_snapshot(&rt, &client, race) {
                        print_odds_table(&snapshot);
                    }
                    if !watch {
                        break;
                    }
                    wait_for_refresh(interval);
                }
            }
            Commands::Dutch {
                race,
                banker,
                others,
                stake,
                watch,
                interval,
            } => {
                validate_race(race)?;
                validate_selection(banker, &others, stake)?;
                loop {
                    if let Some(snapshot) = fetch_snapshot(&rt, &client, race) {
                        run_dutch(&snapshot, banker, &others, stake);
                    }
                    if !watch {
                        break;
                    }
                    wait_for_refresh(interval);
                }
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn validate_race(race: u8) -> Result<()> {
    if !(1..=12).contains(&race) {
        anyhow::bail!("Race number must be 1-12, got {}", race);
    }
    Ok(())
}

fn validate_selection(banker: u32, others: &[u32], stake: f64) -> Result<()> {
    if banker == 0 {
        anyhow::bail!("Banker horse number must be positive");
    }
    if others.contains(&banker) {
        anyhow::bail!("Banker horse {} must not appear among --others", banker);
    }
    if !stake.is_finite() || stake < 0.0 {
        anyhow::bail!("Stake must be non-negative, got {}", stake);
    }
    Ok(())
}

/// Fetch the current odds, reporting any failure as a passive notice
///
/// A failed or empty fetch never aborts the CLI; the next watch cycle or
/// interactive step simply tries again.
fn fetch_snapshot(rt: &Runtime, client: &OddsClient, race: u8) -> Option<QuinellaSnapshot> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Fetching quinella odds for race {}...", race));

    let result = rt.block_on(client.fetch_quinella(race));
    pb.finish_and_clear();

    match result {
        Ok(snapshot) => Some(snapshot),
        Err(e) if e.is_no_data() => {
            println!(
                "{}",
                format!("No quinella odds available for race {}.", race).yellow()
            );
            None
        }
        Err(e) => {
            println!("{}: {}", "Error fetching odds".red(), e);
            None
        }
    }
}

fn wait_for_refresh(interval: u64) {
    println!();
    println!("{}", format!("Refreshing in {}s...", interval).dimmed());
    std::thread::sleep(Duration::from_secs(interval));
    println!();
}

fn print_odds_table(snapshot: &QuinellaSnapshot) {
    println!(
        "{}",
        format!("Race {} - Quinella (連贏) Odds", snapshot.race_no)
            .yellow()
            .bold()
    );
    println!("{}", format!("fetched at {}", snapshot.fetched_at).dimmed());
    println!("{:>8} {:>8}", "Pair", "Odd");
    println!("{}", "-".repeat(18));

    let mut pairs: Vec<(&String, &f64)> = snapshot.quinella.iter().collect();
    pairs.sort_by_key(|(k, _)| parse_pair_key(k).unwrap_or((u32::MAX, u32::MAX)));

    for (pair, odd) in pairs {
        println!("{:>8} {:>8.2}", pair, odd);
    }
    println!();
}

fn print_allocation(allocation: &DutchingAllocation, total_stake: f64) {
    if allocation.is_empty() {
        println!(
            "{}",
            "No valid quinella odds found for the selected combinations.".yellow()
        );
        return;
    }

    println!("{}", "Banker Quinella Dutching Allocation:".yellow().bold());
    println!(
        "{:>8} {:>8} {:>10} {:>10} {:>10}",
        "Pair", "Odds", "Stake", "Return", "Profit"
    );
    println!("{}", "-".repeat(50));

    for bet in allocation.bets() {
        println!(
            "{:>8} {:>8.2} {:>10.2} {:>10.2} {:>10.2}",
            bet.pair, bet.odds, bet.stake, bet.expected_return, bet.expected_profit
        );
    }
    println!();

    if let Some(profit) = allocation.expected_profit() {
        println!(
            "{} {:.2} HKD (same for all pairs)",
            "Expected profit:".green(),
            profit
        );
    }
    if let Some(roi) = allocation.roi(total_stake) {
        println!("{} {:.2}%", "ROI:".green(), roi * 100.0);
    }
    println!();
}

fn run_dutch(snapshot: &QuinellaSnapshot, banker: u32, others: &[u32], stake: f64) {
    let allocation = dutch_banker_quinella(banker, others, &snapshot.quinella, stake);
    print_allocation(&allocation, stake);
}

fn run_interactive(rt: &Runtime, client: &OddsClient) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!();

    let theme = ColorfulTheme::default();

    loop {
        let options = vec!["Dutch a race", "Show odds", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let race: u8 = Input::with_theme(&theme)
                    .with_prompt("Race number (1-12)")
                    .interact_text()?;
                if validate_race(race).is_err() {
                    println!("{}", "Race number must be 1-12.".red());
                    continue;
                }

                let stake: f64 = Input::with_theme(&theme)
                    .with_prompt("Total stake (HKD)")
                    .default(100.0)
                    .interact_text()?;
                if !stake.is_finite() || stake < 0.0 {
                    println!("{}", "Stake must be non-negative.".red());
                    continue;
                }

                let Some(snapshot) = fetch_snapshot(rt, client, race) else {
                    continue;
                };
                print_odds_table(&snapshot);

                let horses = snapshot.horses();
                let labels: Vec<String> = horses.iter().map(|h| format!("Horse {}", h)).collect();

                let banker_idx = Select::with_theme(&theme)
                    .with_prompt("Select your banker horse (軸馬)")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let banker = horses[banker_idx];

                let other_horses: Vec<u32> =
                    horses.iter().copied().filter(|&h| h != banker).collect();
                let other_labels: Vec<String> =
                    other_horses.iter().map(|h| format!("Horse {}", h)).collect();

                let picked = MultiSelect::with_theme(&theme)
                    .with_prompt("Select horses to pair with your banker (副馬)")
                    .items(&other_labels)
                    .interact()?;

                if picked.is_empty() {
                    println!(
                        "{}",
                        "Select at least one other horse to create banker combinations.".yellow()
                    );
                    println!();
                    continue;
                }

                let others: Vec<u32> = picked.iter().map(|&i| other_horses[i]).collect();

                println!();
                run_dutch(&snapshot, banker, &others, stake);
            }
            1 => {
                let race: u8 = Input::with_theme(&theme)
                    .with_prompt("Race number (1-12)")
                    .interact_text()?;
                if validate_race(race).is_err() {
                    println!("{}", "Race number must be 1-12.".red());
                    continue;
                }

                println!();
                if let Some(snapshot) = fetch_snapshot(rt, client, race) {
                    print_odds_table(&snapshot);
                }
            }
            2 => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
