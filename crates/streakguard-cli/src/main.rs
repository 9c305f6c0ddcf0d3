//! StreakGuard CLI Application
//!
//! Command-line interface and MCP server for habit holidays.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use jiff::tz::TimeZone;
use log::info;
use mcp::{run_stdio_server, StreakGuardMcpServer};
use renderer::TerminalRenderer;
use streakguard_core::{Clock, HolidayServiceBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        today,
        command,
    } = Args::parse();

    let clock = match today {
        Some(today) => Clock::Fixed {
            today,
            tz: TimeZone::system(),
        },
        None => Clock::system(),
    };

    let service = HolidayServiceBuilder::new()
        .with_database_path(database_file)
        .with_clock(clock)
        .build()
        .await
        .context("Failed to initialize holiday service")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("StreakGuard started for user '{user}'");

    match command {
        Some(Holiday { command }) => {
            Cli::new(service, renderer, user)
                .handle_holiday_command(command)
                .await
        }
        Some(Habit { command }) => {
            Cli::new(service, renderer, user)
                .handle_habit_command(command)
                .await
        }
        Some(Tier { command }) => {
            Cli::new(service, renderer, user)
                .handle_tier_command(command)
                .await
        }
        Some(Check(args)) => Cli::new(service, renderer, user).handle_check(args).await,
        Some(Serve) => {
            info!("Starting StreakGuard MCP server");
            run_stdio_server(StreakGuardMcpServer::new(service))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(service, renderer, user).show_active(false).await,
    }
}
