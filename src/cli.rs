//! Drives the command-line program.

use crate::http::HTTPError;
use crate::reddit::{RedditClient, RedditService};
use crate::server::RedditServer;
use crate::tools::{DEFAULT_COMMENT_DEPTH, DEFAULT_COMMENT_LIMIT, DEFAULT_HOT_LIMIT, RedditTools};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::{debug, info};
use rmcp::ServiceExt;
use thiserror::Error;

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Serves Reddit posts, comments, and hot threads to AI agents over MCP", long_about = None)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Serve Reddit tools over MCP on stdin and stdout (the default)
    Serve,

    /// Print a post and all of its comments
    Post {
        /// URL of the Reddit post
        url: String,
    },

    /// Print a subreddit's hot threads
    Hot {
        /// Name of the subreddit, without the leading "r/"
        subreddit: String,

        /// Number of posts to fetch
        #[arg(short = 'n', long, default_value_t = DEFAULT_HOT_LIMIT)]
        limit: u32,
    },

    /// Print a post and its top comments
    Content {
        /// ID of the Reddit post
        post_id: String,

        /// Number of top-level comments to fetch
        #[arg(long, default_value_t = DEFAULT_COMMENT_LIMIT)]
        comment_limit: u32,

        /// Maximum depth of the comment tree to traverse
        #[arg(long, default_value_t = DEFAULT_COMMENT_DEPTH)]
        comment_depth: u32,
    },
}

/// A fatal error that stops the program.
#[derive(Debug, Error)]
pub enum Error {
    /// The Reddit service could not be created.
    #[error("Could not create Reddit service: {0}")]
    Service(#[from] HTTPError),

    /// The MCP server could not start or stopped unexpectedly.
    #[error("MCP server error: {0}")]
    Server(String),
}

fn init_logging(config: &Config) {
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .format_timestamp_millis()
        .init();
}

/// Runs the command-line program using the given `config`.
///
/// A single Reddit service is created here, from credentials in the
/// environment, and shared by every tool call for the life of the program.
pub async fn run(config: Config) -> Result<(), Error> {
    init_logging(&config);

    let service = RedditService::from_env()?;
    debug!("Created Reddit service: {service:?}");
    let tools = RedditTools::new(RedditClient::new(service));

    match config.command() {
        Command::Serve => serve(tools).await?,
        Command::Post { url } => {
            let sections = tools.fetch_post_from_url(url).await;
            println!("{}", sections.join("\n"));
        }
        Command::Hot { subreddit, limit } => {
            println!("{}", tools.fetch_hot_threads(subreddit, *limit).await);
        }
        Command::Content {
            post_id,
            comment_limit,
            comment_depth,
        } => {
            let content = tools
                .fetch_post_content(post_id, *comment_limit, *comment_depth)
                .await;
            println!("{content}");
        }
    }

    Ok(())
}

async fn serve(tools: RedditTools) -> Result<(), Error> {
    info!("Starting MCP server on stdio");
    let server = RedditServer::new(tools)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| Error::Server(e.to_string()))?;
    let reason = server
        .waiting()
        .await
        .map_err(|e| Error::Server(e.to_string()))?;
    info!("MCP server stopped: {reason:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    mod config {
        use crate::cli::{Command, Config};
        use clap::Parser;

        #[test]
        fn it_serves_by_default() {
            let config = Config::try_parse_from(["mcp-reddit"]).unwrap();
            assert_eq!(config.command(), &Command::Serve);
        }

        #[test]
        fn it_parses_serve() {
            let config = Config::try_parse_from(["mcp-reddit", "serve"]).unwrap();
            assert_eq!(config.command(), &Command::Serve);
        }

        #[test]
        fn it_parses_post() {
            let url = "https://reddit.com/r/rust/comments/abc123/";
            let config = Config::try_parse_from(["mcp-reddit", "post", url]).unwrap();
            assert_eq!(
                config.command(),
                &Command::Post {
                    url: url.to_string()
                }
            );
        }

        #[test]
        fn it_parses_hot_with_a_default_limit() {
            let config = Config::try_parse_from(["mcp-reddit", "hot", "rust"]).unwrap();
            assert_eq!(
                config.command(),
                &Command::Hot {
                    subreddit: "rust".to_string(),
                    limit: 10
                }
            );
        }

        #[test]
        fn it_parses_hot_with_a_limit() {
            let config = Config::try_parse_from(["mcp-reddit", "hot", "rust", "-n", "3"]).unwrap();
            assert_eq!(
                config.command(),
                &Command::Hot {
                    subreddit: "rust".to_string(),
                    limit: 3
                }
            );
        }

        #[test]
        fn it_parses_content_with_default_limits() {
            let config = Config::try_parse_from(["mcp-reddit", "content", "abc123"]).unwrap();
            assert_eq!(
                config.command(),
                &Command::Content {
                    post_id: "abc123".to_string(),
                    comment_limit: 20,
                    comment_depth: 3
                }
            );
        }

        #[test]
        fn it_parses_content_with_limits() {
            let config = Config::try_parse_from([
                "mcp-reddit",
                "content",
                "abc123",
                "--comment-limit",
                "5",
                "--comment-depth",
                "1",
            ])
            .unwrap();
            assert_eq!(
                config.command(),
                &Command::Content {
                    post_id: "abc123".to_string(),
                    comment_limit: 5,
                    comment_depth: 1
                }
            );
        }

        #[test]
        fn it_rejects_negative_limits() {
            let config = Config::try_parse_from(["mcp-reddit", "hot", "rust", "-n", "-1"]);
            assert!(config.is_err());
        }

        #[test]
        fn it_accepts_verbosity_flags() {
            let config = Config::try_parse_from(["mcp-reddit", "-vv", "hot", "rust"]).unwrap();
            assert_eq!(config.verbosity().log_level_filter(), log::LevelFilter::Info);
        }
    }
}
