pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "nutrisite",
    about = "Nutripower storefront CLI",
    long_about = "Exercise the storefront's interactive logic from the command line: scripted \
                  chat replies, nutrition recommendations, availability lookups, platform \
                  links, config inspection, and smoke validation.",
    after_help = "Examples:\n  nutrisite respond \"how much protein?\"\n  nutrisite recommend --age 30 --activity high\n  nutrisite availability 560001 --seed 7\n  nutrisite smoke"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Answer a chat message with the scripted keyword responder")]
    Respond {
        #[arg(help = "The visitor message to answer")]
        text: String,
    },
    #[command(about = "Compute the nutrition recommendation for an age and activity level")]
    Recommend {
        #[arg(long, help = "Age in years (defaults to 25)")]
        age: Option<u32>,
        #[arg(long, help = "Activity level: low, moderate, or high (defaults to moderate)")]
        activity: Option<String>,
    },
    #[command(about = "Run the simulated delivery availability lookup for a pincode")]
    Availability {
        #[arg(help = "6-digit pincode to check")]
        pincode: String,
        #[arg(long, help = "RNG seed for a reproducible platform subset")]
        seed: Option<u64>,
    },
    #[command(about = "Print the quick-commerce search URLs for the default product query")]
    Links {
        #[arg(long, help = "Limit output to one platform (e.g. blinkit, zepto)")]
        platform: Option<String>,
        #[arg(long, help = "Override the search query")]
        query: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Run deterministic readiness checks with per-check timing details")]
    Smoke,
    #[command(
        about = "Drive a short scripted interaction sequence through the headless page runtime"
    )]
    Demo,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Respond { text } => commands::respond::run(&text),
        Command::Recommend { age, activity } => commands::recommend::run(age, activity.as_deref()),
        Command::Availability { pincode, seed } => commands::availability::run(&pincode, seed),
        Command::Links { platform, query } => {
            commands::links::run(platform.as_deref(), query.as_deref())
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Smoke => commands::smoke::run(),
        Command::Demo => commands::demo::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
