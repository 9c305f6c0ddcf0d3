//! MCP server implementation for StreakGuard
//!
//! Exposes the holiday operations as Model Context Protocol tools over
//! stdio, so assistants can plan holidays and answer "was this day frozen"
//! questions with the same rules as the CLI.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use streakguard_core::HolidayService;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use errors::to_mcp_error;
pub use handlers::{
    AddHabit, AddTask, CanCreateParams, CancelPeriod, CreatePeriod, FrozenQuery, McpResult,
    SetTier, UserParams,
};

/// MCP server for StreakGuard
#[derive(Clone)]
pub struct StreakGuardMcpServer {
    service: Arc<HolidayService>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StreakGuardMcpServer {
    pub fn new(service: HolidayService) -> Self {
        Self {
            service: Arc::new(service),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.service.clone())
    }

    #[tool(
        name = "get_active_period",
        description = "Show the user's active or scheduled holiday with its dates, scope and days remaining. Holidays whose end date has passed are never returned."
    )]
    async fn get_active_period(&self, params: Parameters<UserParams>) -> McpResult {
        self.handlers().get_active_period(params).await
    }

    #[tool(
        name = "get_history",
        description = "List every holiday the user created, most recent first, including cancelled and expired ones."
    )]
    async fn get_history(&self, params: Parameters<UserParams>) -> McpResult {
        self.handlers().get_history(params).await
    }

    #[tool(
        name = "can_create",
        description = "Check whether a holiday could be created for start_date..end_date (YYYY-MM-DD) under the user's plan. Reports the reason and whether upgrading to premium would help. Nothing is written."
    )]
    async fn can_create(&self, params: Parameters<CanCreateParams>) -> McpResult {
        self.handlers().can_create(params).await
    }

    #[tool(
        name = "create_period",
        description = "Create a holiday from start_date to end_date (YYYY-MM-DD, inclusive). scope is 'all' (default), 'habits' with frozen_habits, or 'tasks' with frozen_tasks as [{habit_id, task_ids}]. Fails if the user already has an active or scheduled holiday, or the free plan allowance is used up."
    )]
    async fn create_period(&self, params: Parameters<CreatePeriod>) -> McpResult {
        self.handlers().create_period(params).await
    }

    #[tool(
        name = "cancel_period",
        description = "End a holiday early. Days before today stay frozen; from today on, missed days count again. Cancelling an already inactive holiday is reported but changes nothing."
    )]
    async fn cancel_period(&self, params: Parameters<CancelPeriod>) -> McpResult {
        self.handlers().cancel_period(params).await
    }

    #[tool(
        name = "get_stats",
        description = "Show this calendar year's holiday usage: holidays created, days frozen, remaining allowance and the longest holiday the plan allows."
    )]
    async fn get_stats(&self, params: Parameters<UserParams>) -> McpResult {
        self.handlers().get_stats(params).await
    }

    #[tool(
        name = "get_habits_with_tasks",
        description = "List the user's habits and their tasks with the IDs that holiday scopes refer to."
    )]
    async fn get_habits_with_tasks(&self, params: Parameters<UserParams>) -> McpResult {
        self.handlers().get_habits_with_tasks(params).await
    }

    #[tool(
        name = "check_frozen",
        description = "Check whether a day (YYYY-MM-DD) was frozen for a habit, or for specific tasks of it, honouring early cancellations. Pass 'until' to list every frozen day of a range instead."
    )]
    async fn check_frozen(&self, params: Parameters<FrozenQuery>) -> McpResult {
        self.handlers().check_frozen(params).await
    }

    #[tool(
        name = "add_habit",
        description = "Add a habit to the user's catalog. Returns its ID."
    )]
    async fn add_habit(&self, params: Parameters<AddHabit>) -> McpResult {
        self.handlers().add_habit(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a task to one of the user's habits. Returns its ID."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "set_tier",
        description = "Set the user's plan tier to 'free' or 'premium'. Premium lifts the yearly holiday count and duration caps."
    )]
    async fn set_tier(&self, params: Parameters<SetTier>) -> McpResult {
        self.handlers().set_tier(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for StreakGuardMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "streakguard".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"StreakGuard freezes habit streaks during holidays.

## Core Concepts
- **Holiday**: a date range (inclusive) during which missed days do not break a streak
- **Scope**: what a holiday freezes - all habits, a set of habits, or individual tasks of habits
- **Plan tier**: free users get 3 holidays per year of at most 7 days; premium is unlimited

## Rules
- A user has at most one active or scheduled holiday at a time
- Holidays cannot start in the past
- Cancelling a holiday keeps the days before the cancellation frozen

## Typical Flow
1. `get_habits_with_tasks` to find habit and task IDs
2. `can_create` to check the dates against the plan
3. `create_period` with the chosen scope
4. `check_frozen` when replaying a streak for a past day"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: StreakGuardMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting StreakGuard MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
