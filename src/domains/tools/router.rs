//! Tool Router - builds the rmcp ToolRouter from the tool definitions.

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::instrument::{Fetcher, Instrument};

use super::definitions::{AboutTool, RgbTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S, F>(instrument: Instrument<F>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
    F: Fetcher + 'static,
{
    ToolRouter::new()
        .with_route(AboutTool::create_route())
        .with_route(RgbTool::create_route(instrument))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::instrument::HttpFetcher;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(Instrument::<HttpFetcher>::default());
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"about"));
        assert!(names.contains(&"rgb"));
    }
}
