// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! mcp-reddit is a [Model Context Protocol] server that lets AI agents read
//! Reddit. It exposes three tools over stdio:
//!
//! - `fetch_reddit_post_from_url` reads a post and all of its comments,
//!   given a link to the post.
//! - `fetch_reddit_hot_threads` lists the hot threads in a subreddit.
//! - `fetch_reddit_post_content` reads a post and a bounded number of its
//!   comments, given the post's id.
//!
//! Every tool returns plain text. Comment trees are rendered with each
//! reply quoted beneath its parent, newest replies first.
//!
//! # Examples
//!
//! Run the MCP server (this is also what happens with no subcommand):
//!
//! ```bash
//! mcp-reddit serve
//! ```
//!
//! The same tools can be run once from the command line, which is handy
//! for seeing exactly what an agent will see.
//!
//! Print a post and all of its comments:
//!
//! ```bash
//! mcp-reddit post https://www.reddit.com/r/rust/comments/abc123/some_title/
//! ```
//!
//! Print the five hottest threads in r/rust:
//!
//! ```bash
//! mcp-reddit hot rust -n 5
//! ```
//!
//! Print a post with its top ten comments, two levels deep:
//!
//! ```bash
//! mcp-reddit content abc123 --comment-limit 10 --comment-depth 2
//! ```
//!
//! Logs are written to stderr; use `-v` (repeatable) for more detail.
//!
//! # Reddit API Setup
//!
//! With no credentials, mcp-reddit reads Reddit's public JSON endpoints,
//! which are heavily rate-limited. For better limits, [create an app] on
//! Reddit and set some of these environment variables:
//!
//! - `REDDIT_CLIENT_ID`
//! - `REDDIT_CLIENT_SECRET`
//! - `REDDIT_REFRESH_TOKEN`
//!
//! Values are read in that order, and empty values are skipped. Which
//! values are present determines how mcp-reddit authenticates:
//!
//! | Values | Authentication                                    |
//! |--------|---------------------------------------------------|
//! | none   | anonymous                                         |
//! | one    | the value is used as a bearer access token        |
//! | two    | client credentials grant ("script" or "web" apps) |
//! | three  | refresh token grant                               |
//!
//! See [`auth`] for details.
//!
//! # License
//!
//! mcp-reddit is licensed under the terms of the [Apache License 2.0].
//! Please see the LICENSE file accompanying this source code or visit the
//! previous link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0
//! [Model Context Protocol]: https://modelcontextprotocol.io/
//! [create an app]: https://www.reddit.com/prefs/apps

pub mod auth;
pub mod cli;
pub mod clock;
pub mod http;
pub mod reddit;
pub mod resolve;
pub mod server;
pub mod thing;
pub mod tools;
pub mod view;

#[cfg(test)]
mod test_utils;
