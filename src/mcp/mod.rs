// src/mcp/mod.rs
// MCP Server implementation

pub mod dispatch;
pub mod requests;
pub mod response;

pub use dispatch::{ProjectList, ToolCall, ToolDispatcher, ToolName, ToolOutput};
pub use requests::{CreateRoadmapRequest, ListProjectsRequest, PlanSprintRequest};

use response::{json_response, tool_error};
use rmcp::{
    ErrorData, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use std::sync::Arc;
use tracing::{info, warn};

/// MCP Server state
#[derive(Clone)]
pub struct RoadmapServer {
    dispatcher: Arc<ToolDispatcher>,
    tool_router: ToolRouter<Self>,
}

impl RoadmapServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            tool_router: Self::tool_router(),
        }
    }

    /// Run a decoded call; orchestration errors become tool-level error results
    async fn run(&self, call: ToolCall) -> Result<CallToolResult, ErrorData> {
        let tool = call.name();
        match self.dispatcher.dispatch(call).await {
            Ok(output) => json_response(&output),
            Err(err) => {
                warn!(
                    tool = %tool,
                    error = %err,
                    retryable = err.is_retryable(),
                    "Tool call failed"
                );
                Ok(tool_error(&err))
            }
        }
    }
}

#[tool_router]
impl RoadmapServer {
    #[tool(
        description = "Create a GitHub project, its milestones, and the issues under each \
                       milestone in one call. Returns the full result tree with per-item \
                       success or failure."
    )]
    async fn create_roadmap(
        &self,
        Parameters(req): Parameters<CreateRoadmapRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::CreateRoadmap(req)).await
    }

    #[tool(
        description = "Plan a sprint over existing issues. Validates the date window and that \
                       every referenced issue exists."
    )]
    async fn plan_sprint(
        &self,
        Parameters(req): Parameters<PlanSprintRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::PlanSprint(req)).await
    }

    #[tool(description = "List the GitHub projects linked to the repository.")]
    async fn list_projects(
        &self,
        Parameters(req): Parameters<ListProjectsRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::ListProjects(req)).await
    }
}

impl ServerHandler for RoadmapServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "roadmap-mcp".into(),
                title: Some("Roadmap - GitHub roadmap and sprint planning".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Creates GitHub roadmaps (project, milestones, issues) and plans sprints. \
                 Default repository: {}.",
                self.dispatcher.default_repo()
            )),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let tool_name = request.name.to_string();
            let start = std::time::Instant::now();

            // Reject unknown tools before any routing
            if let Err(err) = ToolName::parse(&tool_name) {
                warn!(tool = %tool_name, "Unknown tool requested");
                return Ok(tool_error(&err));
            }

            let ctx = ToolCallContext::new(self, request, context);
            let result = self.tool_router.call(ctx).await;

            let success = matches!(&result, Ok(r) if r.is_error != Some(true));
            info!(
                tool = %tool_name,
                success,
                duration_ms = start.elapsed().as_millis() as u64,
                "Tool call finished"
            );

            result
        }
    }
}
