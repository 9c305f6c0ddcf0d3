//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use streakguard_core::{
    display::{CancelResult, CreateResult, FrozenDays, Habits, OperationStatus, Periods},
    params as core, FreezeError, HolidayService,
};

use super::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Wraps a core parameter type in a transparent serde container so the MCP
// layer can deserialize it and publish its JSON schema without the core types
// depending on rmcp.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type UserParams = McpParams<core::UserParams>;
pub type CanCreateParams = McpParams<core::CanCreateParams>;
pub type CreatePeriod = McpParams<core::CreatePeriod>;
pub type CancelPeriod = McpParams<core::CancelPeriod>;
pub type FrozenQuery = McpParams<core::FrozenQuery>;
pub type AddHabit = McpParams<core::AddHabit>;
pub type AddTask = McpParams<core::AddTask>;
pub type SetTier = McpParams<core::SetTier>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(markdown: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(markdown)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    service: Arc<HolidayService>,
}

impl McpHandlers {
    pub fn new(service: Arc<HolidayService>) -> Self {
        Self { service }
    }

    pub async fn get_active_period(&self, Parameters(params): Parameters<UserParams>) -> McpResult {
        debug!("get_active_period: {params:?}");

        let active = self
            .service
            .get_active_period(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get active holiday", &e))?;

        match active {
            Some(view) => text(view.to_string()),
            None => text("No active holiday.\n".to_string()),
        }
    }

    pub async fn get_history(&self, Parameters(params): Parameters<UserParams>) -> McpResult {
        debug!("get_history: {params:?}");

        let history = self
            .service
            .get_history(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get holiday history", &e))?;

        text(format!("# Holiday history\n\n{}", Periods(history)))
    }

    pub async fn can_create(&self, Parameters(params): Parameters<CanCreateParams>) -> McpResult {
        debug!("can_create: {params:?}");

        let outcome = self
            .service
            .can_create(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to check holiday allowance", &e))?;

        text(outcome.to_string())
    }

    pub async fn create_period(&self, Parameters(params): Parameters<CreatePeriod>) -> McpResult {
        debug!("create_period: {params:?}");

        let view = self
            .service
            .create_period(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create holiday", &e))?;

        text(CreateResult::new(view).to_string())
    }

    pub async fn cancel_period(&self, Parameters(params): Parameters<CancelPeriod>) -> McpResult {
        debug!("cancel_period: {params:?}");

        match self.service.cancel_period(params.as_ref()).await {
            Ok(view) => text(CancelResult(view).to_string()),
            Err(e @ FreezeError::AlreadyInactive { .. }) => {
                text(OperationStatus::success(format!("{e}; nothing to cancel")).to_string())
            }
            Err(e) => Err(to_mcp_error("Failed to cancel holiday", &e)),
        }
    }

    pub async fn get_stats(&self, Parameters(params): Parameters<UserParams>) -> McpResult {
        debug!("get_stats: {params:?}");

        let stats = self
            .service
            .get_stats(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get holiday stats", &e))?;

        text(stats.to_string())
    }

    pub async fn get_habits_with_tasks(
        &self,
        Parameters(params): Parameters<UserParams>,
    ) -> McpResult {
        debug!("get_habits_with_tasks: {params:?}");

        let habits = self
            .service
            .get_habits_with_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list habits", &e))?;

        text(Habits(habits).to_string())
    }

    pub async fn check_frozen(&self, Parameters(params): Parameters<FrozenQuery>) -> McpResult {
        debug!("check_frozen: {params:?}");
        let query = params.as_ref();

        if query.until.is_some() {
            let days = self
                .service
                .frozen_dates(query)
                .await
                .map_err(|e| to_mcp_error("Failed to list frozen days", &e))?;
            return text(FrozenDays(days).to_string());
        }

        let frozen = self
            .service
            .is_frozen(query)
            .await
            .map_err(|e| to_mcp_error("Failed to check frozen day", &e))?;
        text(OperationStatus::frozen(&query.date, frozen).to_string())
    }

    pub async fn add_habit(&self, Parameters(params): Parameters<AddHabit>) -> McpResult {
        debug!("add_habit: {params:?}");

        let habit = self
            .service
            .add_habit(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add habit", &e))?;

        text(CreateResult::new(habit).to_string())
    }

    pub async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {params:?}");

        let task = self
            .service
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        text(CreateResult::new(task).to_string())
    }

    pub async fn set_tier(&self, Parameters(params): Parameters<SetTier>) -> McpResult {
        debug!("set_tier: {params:?}");

        let tier = self
            .service
            .set_tier(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set plan tier", &e))?;

        text(OperationStatus::success(format!("Plan tier set to {tier}")).to_string())
    }
}
