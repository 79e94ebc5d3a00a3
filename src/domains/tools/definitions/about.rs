//! Static description of the instrument.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

/// The tool takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AboutParams {}

/// Describes what Claude-Light is and what it measures.
pub struct AboutTool;

impl AboutTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "about";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Describe Claude-Light.";

    /// Text returned by the tool.
    pub const TEXT: &'static str = "Claude-Light is a remote instrument that you use to do experiments with.

Claude-Light has an RGB LED with individually settable red, green and blue channels. \
There is a light sensor that reads the intensity at 8 different wavelengths \
(415nm, 445nm, 480nm, 515nm, 555nm, 590nm, 630nm, 680nm), near-IR and a clear channel.

You can learn more about it at https://github.com/jkitchin/claude-light?tab=readme-ov-file#claude-light";

    pub fn execute() -> CallToolResult {
        info!("About tool called");
        CallToolResult::success(vec![Content::text(Self::TEXT)])
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AboutParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the server's router.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |_ctx: ToolCallContext<'_, S>| {
            async move { Ok::<_, McpError>(Self::execute()) }.boxed()
        })
    }
}
