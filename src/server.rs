// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Serves the Reddit tools over the Model Context Protocol.

use crate::tools::{DEFAULT_COMMENT_DEPTH, DEFAULT_COMMENT_LIMIT, DEFAULT_HOT_LIMIT, RedditTools};
use log::{debug, info};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, schemars, tool, tool_handler, tool_router};
use serde::Deserialize;
use std::sync::Arc;

const INSTRUCTIONS: &str = "\
Reads Reddit. Use fetch_reddit_post_from_url to read a post and all of its \
comments from a link, fetch_reddit_hot_threads to list what is popular in a \
subreddit, and fetch_reddit_post_content to read a post and a bounded number \
of its comments by id.";

/// Parameters for `fetch_reddit_post_from_url`.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PostFromUrlParams {
    /// URL of the Reddit post, such as
    /// https://www.reddit.com/r/rust/comments/abc123/some_title/
    pub reddit_url: String,
}

/// Parameters for `fetch_reddit_hot_threads`.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HotThreadsParams {
    /// Name of the subreddit, without the leading "r/"
    pub subreddit: String,

    /// Number of posts to fetch
    #[serde(default = "default_hot_limit")]
    pub limit: u32,
}

/// Parameters for `fetch_reddit_post_content`.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PostContentParams {
    /// ID of the Reddit post
    pub post_id: String,

    /// Number of top-level comments to fetch
    #[serde(default = "default_comment_limit")]
    pub comment_limit: u32,

    /// Maximum depth of the comment tree to traverse
    #[serde(default = "default_comment_depth")]
    pub comment_depth: u32,
}

fn default_hot_limit() -> u32 {
    DEFAULT_HOT_LIMIT
}

fn default_comment_limit() -> u32 {
    DEFAULT_COMMENT_LIMIT
}

fn default_comment_depth() -> u32 {
    DEFAULT_COMMENT_DEPTH
}

/// An MCP server exposing the Reddit tools.
///
/// The server is cloned for every connection; clones share the same tools
/// and therefore the same Reddit service and cached access token.
#[derive(Clone)]
pub struct RedditServer {
    tools: Arc<RedditTools>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RedditServer {
    /// Creates a new server that answers tool calls using `tools`.
    pub fn new(tools: RedditTools) -> Self {
        Self {
            tools: Arc::new(tools),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Fetch general data from a Reddit URL, including the post and all of its comments"
    )]
    async fn fetch_reddit_post_from_url(
        &self,
        Parameters(params): Parameters<PostFromUrlParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("fetch_reddit_post_from_url: {}", params.reddit_url);
        let sections = self.tools.fetch_post_from_url(&params.reddit_url).await;
        Ok(CallToolResult::success(
            sections.into_iter().map(Content::text).collect(),
        ))
    }

    #[tool(description = "Fetch hot threads from a subreddit")]
    async fn fetch_reddit_hot_threads(
        &self,
        Parameters(params): Parameters<HotThreadsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            "fetch_reddit_hot_threads: r/{} (limit {})",
            params.subreddit, params.limit
        );
        let threads = self
            .tools
            .fetch_hot_threads(&params.subreddit, params.limit)
            .await;
        Ok(CallToolResult::success(vec![Content::text(threads)]))
    }

    #[tool(description = "Fetch detailed content of a specific post, including its comments")]
    async fn fetch_reddit_post_content(
        &self,
        Parameters(params): Parameters<PostContentParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            "fetch_reddit_post_content: {} (comment limit {}, depth {})",
            params.post_id, params.comment_limit, params.comment_depth
        );
        let content = self
            .tools
            .fetch_post_content(&params.post_id, params.comment_limit, params.comment_depth)
            .await;
        Ok(CallToolResult::success(vec![Content::text(content)]))
    }
}

#[tool_handler]
impl ServerHandler for RedditServer {
    fn get_info(&self) -> ServerInfo {
        debug!("Describing server capabilities");
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
