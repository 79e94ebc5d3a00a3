//! Set the LEDs and read every sensor channel.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::domains::instrument::{Fetcher, Instrument, InstrumentReading, InstrumentSetting};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// LED settings for one measurement.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
pub struct RgbParams {
    /// Red channel setting.
    #[serde(rename = "R", default)]
    #[schemars(description = "The red channel setting, between 0 and 1 (default 0)")]
    pub red: f64,

    /// Green channel setting.
    #[serde(rename = "G", default)]
    #[schemars(description = "The green channel setting, between 0 and 1 (default 0)")]
    pub green: f64,

    /// Blue channel setting.
    #[serde(rename = "B", default)]
    #[schemars(description = "The blue channel setting, between 0 and 1 (default 0)")]
    pub blue: f64,
}

impl From<RgbParams> for InstrumentSetting {
    fn from(params: RgbParams) -> Self {
        Self::new(params.red, params.green, params.blue)
    }
}

/// The settings used and the intensities measured.
#[derive(Debug, Clone, Serialize)]
pub struct RgbOutput {
    #[serde(rename = "in")]
    pub input: InstrumentSetting,
    pub output: InstrumentReading,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Runs the instrument with all three LED channels and returns every channel.
pub struct RgbTool;

impl RgbTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "rgb";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get output from Claude-Light. Sets the red, green and blue LED channels (each between 0 and 1) and returns a dictionary: the \"in\" key holds the R, G, B settings used, the \"output\" key holds the intensities in the channels 415nm, 445nm, 480nm, 515nm, 555nm, 590nm, 630nm, 680nm, clear and nir.";

    /// Execute the tool logic. Blocks for the whole retried fetch.
    #[instrument(skip(instrument), fields(r = params.red, g = params.green, b = params.blue))]
    pub fn execute<F: Fetcher>(params: &RgbParams, instrument: &Instrument<F>) -> CallToolResult {
        info!("rgb tool called");

        match Self::measure(params, instrument) {
            Ok(structured) => CallToolResult {
                content: vec![Content::text(structured.to_string())],
                structured_content: Some(structured),
                is_error: Some(false),
                meta: None,
            },
            Err(e) => {
                error!("rgb tool failed: {}", e);
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    /// Set the LEDs, read every channel and build the `{in, output}` envelope.
    fn measure<F: Fetcher>(
        params: &RgbParams,
        instrument: &Instrument<F>,
    ) -> Result<serde_json::Value, ToolError> {
        let setting = InstrumentSetting::from(*params);
        let reading = instrument.light(setting.red, setting.green, setting.blue)?;

        let output = RgbOutput {
            input: setting,
            output: reading,
        };
        Ok(serde_json::to_value(&output)?)
    }

    /// Run `execute` on a blocking thread.
    pub async fn run<F>(
        params: RgbParams,
        instrument: Instrument<F>,
    ) -> Result<CallToolResult, McpError>
    where
        F: Fetcher + 'static,
    {
        tokio::task::spawn_blocking(move || Self::execute(&params, &instrument))
            .await
            .map_err(|e| McpError::internal_error(format!("Task execution failed: {e}"), None))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RgbParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the server's router.
    pub fn create_route<S, F>(instrument: Instrument<F>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
        F: Fetcher + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let instrument = instrument.clone();
            async move {
                let params: RgbParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| {
                        let err = ToolError::invalid_arguments(e.to_string());
                        McpError::invalid_params(err.to_string(), None)
                    })?;

                Self::run(params, instrument).await
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::instrument::facade::tests::{ScriptedFetcher, full_reading};
    use crate::domains::instrument::{Channel, InstrumentError, RetryPolicy};
    use rmcp::model::RawContent;
    use std::time::Duration;

    fn instrument(
        outcomes: Vec<Result<InstrumentReading, InstrumentError>>,
    ) -> Instrument<ScriptedFetcher> {
        Instrument::new(
            ScriptedFetcher::new(outcomes),
            RetryPolicy::new(3, Duration::ZERO),
        )
    }

    #[test]
    fn test_params_default_to_zero() {
        let params: RgbParams = serde_json::from_str(r#"{"G": 0.5}"#).unwrap();
        assert_eq!(InstrumentSetting::from(params), InstrumentSetting::green_only(0.5));

        let params: RgbParams = serde_json::from_str("{}").unwrap();
        assert_eq!(InstrumentSetting::from(params), InstrumentSetting::default());
    }

    #[test]
    fn test_schema_uses_rgb_names() {
        let tool = RgbTool::to_tool();
        let properties = tool.input_schema.get("properties").unwrap();
        for key in ["R", "G", "B"] {
            assert!(properties.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_execute_returns_envelope() {
        let instrument = instrument(vec![Ok(full_reading())]);
        let params = RgbParams {
            red: 0.1,
            green: 0.2,
            blue: 0.3,
        };

        let result = RgbTool::execute(&params, &instrument);
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["in"], serde_json::json!({ "R": 0.1, "G": 0.2, "B": 0.3 }));

        let output = structured["output"].as_object().unwrap();
        let labels: Vec<_> = output.keys().map(String::as_str).collect();
        let expected: Vec<_> = Channel::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, expected);
        assert!(output.values().all(|v| v.is_number()));
    }

    #[test]
    fn test_execute_reports_unavailable_instrument() {
        let instrument = instrument(vec![
            Err(InstrumentError::Status(502)),
            Err(InstrumentError::Status(502)),
            Err(InstrumentError::Status(502)),
        ]);

        let result = RgbTool::execute(&RgbParams::default(), &instrument);
        assert_eq!(result.is_error, Some(true));
        assert!(result.structured_content.is_none());

        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.starts_with("Instrument call failed: "));
        assert!(text.contains("unavailable after 3 attempt(s)"));
    }

    #[test]
    fn test_run_off_the_async_executor() {
        let instrument = instrument(vec![Err(InstrumentError::Status(500)), Ok(full_reading())]);

        let result = tokio_test::block_on(RgbTool::run(RgbParams::default(), instrument)).unwrap();
        assert_eq!(result.is_error, Some(false));
    }
}
