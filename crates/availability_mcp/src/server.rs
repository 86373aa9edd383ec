use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::core::{
    error::{AvailabilityError, AvailabilityResult, McpResult},
    models::{GenerateAvailabilityRequest, Granularity, OutputMode, ZonedSlot},
    normalize::{normalize, parse_timezone},
    provider::AvailabilityProvider,
    timestamp::Timestamp,
};

/// Available resource URIs for the Availability MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &[
    "availability://status",
    "availability://help",
    "availability://formats",
];

// Slot used for the rendered samples in availability://formats
const SAMPLE_USER_TIMEZONE: &str = "America/New_York";
const SAMPLE_RECIPIENT_TIMEZONE: &str = "Europe/London";
const SAMPLE_START: &str = "2024-03-20T09:00";
const SAMPLE_END: &str = "2024-03-20T10:30";

/// Availability MCP Server
#[derive(Clone)]
pub struct AvailabilityService {
    provider: AvailabilityProvider,
    config: Config,
    tool_router: ToolRouter<AvailabilityService>,
    prompt_router: PromptRouter<AvailabilityService>,
}

impl AvailabilityService {
    pub fn new(config: Config) -> Self {
        Self {
            provider: AvailabilityProvider::new(),
            config,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    /// Check the caller's key against the configured one, if any
    fn authorize(&self, presented: Option<&str>) -> AvailabilityResult<()> {
        match self.config.api_key.as_deref() {
            Some(expected) if presented != Some(expected) => {
                tracing::warn!("Rejected tool call with missing or invalid API key");
                Err(AvailabilityError::Unauthorized)
            }
            _ => Ok(()),
        }
    }

    fn generate_status_content(&self) -> String {
        let auth = if self.config.requires_api_key() {
            "API key required"
        } else {
            "Open (no API key configured)"
        };
        let formats = OutputMode::ALL
            .iter()
            .map(OutputMode::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"Availability MCP Server Status

Server: Running
Authentication: {}
Output Formats: {}
Default Chunk Granularity: {} minutes
Tools Available: 1
Prompts Available: 1
Resources Available: {}

Capabilities:
- Continuous and chunked availability text
- Optional second timezone column for the recipient
- Naive or offset-aware slot boundaries
- Automatic DST handling"#,
            auth,
            formats,
            Granularity::default().minutes(),
            AVAILABLE_RESOURCES.len()
        )
    }

    fn generate_help_content(&self) -> &'static str {
        r#"Availability MCP Server Help

TOOLS:
- generate_availability_text: Format selected slots as text
  - selected_slots: List of {start, end, timezone?} (required)
  - user_timezone: IANA timezone name (required)
  - recipient_timezone: IANA timezone name (optional)
  - output_format: 'continuous' (default) or 'chunks'
  - slot_granularity_minutes: Minutes per chunk, default 30 (chunks only)
  - api_key: Shared secret, required when the server has one configured

PROMPTS:
- availability_guidance: Tips for choosing slots, timezones and layouts

RESOURCES:
- availability://status: Current server status
- availability://help: This help documentation
- availability://formats: Both layouts rendered for a sample slot

EXAMPLE USAGE:

```json
{
  "selected_slots": [
    {"start": "2024-03-20T09:00:00-04:00", "end": "2024-03-20T11:00:00-04:00"}
  ],
  "user_timezone": "America/New_York",
  "recipient_timezone": "America/Los_Angeles",
  "output_format": "continuous"
}
```

Result text:

Here's my availability:

Date        | My Timezone (America/New_York) | Recipient's Timezone (America/Los_Angeles)
-----------------------------------------------------------------------------------------
Wed, Mar 20 | 9:00 AM - 11:00 AM | 6:00 AM - 8:00 AM

SLOT BOUNDARIES:
- With an offset ('2024-03-20T09:00:00-04:00', '...Z'): converted into user_timezone
- Without an offset ('2024-03-20T09:00'): read in the slot's 'timezone',
  or in user_timezone when the slot has none
- start must be before end

CHUNKS LAYOUT:
- One row per slot_granularity_minutes step starting at each slot's start
- The last chunk may extend past the slot's end
- Overlapping slots are listed separately, never merged"#
    }

    /// Render both layouts for a fixed sample slot
    fn generate_formats_content(&self) -> AvailabilityResult<String> {
        let user_tz = parse_timezone(SAMPLE_USER_TIMEZONE)?;
        let recipient_tz = parse_timezone(SAMPLE_RECIPIENT_TIMEZONE)?;
        let start = normalize(&SAMPLE_START.parse::<Timestamp>()?, SAMPLE_USER_TIMEZONE)?;
        let end = normalize(&SAMPLE_END.parse::<Timestamp>()?, SAMPLE_USER_TIMEZONE)?;
        let slots = [ZonedSlot::new(start, end)];

        let sections = OutputMode::ALL
            .iter()
            .map(|mode| {
                let text = self.provider.render(
                    &slots,
                    user_tz,
                    Some(recipient_tz),
                    *mode,
                    Granularity::default(),
                );
                format!("=== {} ===\n\n{}", mode, text)
            })
            .collect::<Vec<_>>();

        Ok(format!(
            "Availability Output Formats\n\nSample slot: {} to {} ({}), recipient in {}\n\n{}",
            SAMPLE_START,
            SAMPLE_END,
            SAMPLE_USER_TIMEZONE,
            SAMPLE_RECIPIENT_TIMEZONE,
            sections.join("\n\n")
        ))
    }
}

impl Default for AvailabilityService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[tool_router]
impl AvailabilityService {
    #[tool(
        description = "Format selected availability slots as text in the user's timezone, optionally alongside a recipient's timezone"
    )]
    pub(crate) async fn generate_availability_text(
        &self,
        Parameters(req): Parameters<GenerateAvailabilityRequest>,
    ) -> McpResult<CallToolResult> {
        self.authorize(req.api_key.as_deref())?;

        let response = self.provider.generate(&req).inspect_err(|e| {
            if e.is_client_error() {
                tracing::warn!("Rejected availability request: {}", e);
            }
        })?;

        let body = serde_json::to_string_pretty(&response).map_err(|e| {
            AvailabilityError::Unexpected {
                detail: e.to_string(),
            }
        })?;

        Ok(CallToolResult::success(vec![Content::text(body)]))
    }
}

#[prompt_router]
impl AvailabilityService {
    /// Generate guidance for sharing availability across timezones
    #[prompt(name = "availability_guidance")]
    async fn availability_guidance(
        &self,
        _ctx: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<Vec<PromptMessage>> {
        let guidance = r#"Sharing Availability Across Timezones:

1. **Timezones**
   - Use full IANA names (e.g., 'America/New_York', 'Europe/London')
   - Avoid abbreviations like 'EST' or 'PST' as they are ambiguous
   - Set recipient_timezone so the reader sees times on their own clock

2. **Slot Boundaries**
   - Prefer offsets ('2024-03-20T09:00:00-04:00') when slots come from a calendar
   - Values without an offset are read in the slot's 'timezone' or the user's timezone
   - Local times skipped by a DST change are rejected

3. **Choosing a Layout**
   - 'continuous': one line per slot, best for a few long windows
   - 'chunks': one line per start time, best when the reader should pick a slot
   - Pick slot_granularity_minutes to match the meeting length (15, 30, 60)

4. **Reading the Output**
   - Continuous rows are ordered by date
   - Chunk rows follow the order of the selected slots
   - Overlapping slots are not merged"#;

        Ok(vec![PromptMessage {
            role: PromptMessageRole::Assistant,
            content: PromptMessageContent::text(guidance),
        }])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for AvailabilityService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Availability MCP Server. Tool: generate_availability_text formats selected time slots as text in the user's timezone and optionally a recipient's. Use IANA timezone names. API key required: {}.",
                self.config.requires_api_key()
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("availability://status", "server-status"),
                self.create_resource_text("availability://help", "help-documentation"),
                self.create_resource_text("availability://formats", "output-formats"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        match uri.as_str() {
            "availability://status" => {
                let status = self.generate_status_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(status, uri)],
                })
            }
            "availability://help" => {
                let help = self.generate_help_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(help, uri)],
                })
            }
            "availability://formats" => {
                let formats = self.generate_formats_content()?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(formats, uri)],
                })
            }
            _ => Err(AvailabilityError::ResourceNotFound {
                uri: uri.to_string(),
            }
            .into()),
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!("Availability MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = AvailabilityService::new(config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
