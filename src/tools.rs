//! Reddit tools for AI agents.
//!
//! Each tool fetches something from Reddit and returns it as plain text
//! suitable for a language model. Tools never fail: any error is logged
//! and reported back as text, so that the agent can read what went wrong
//! and the program can carry on serving requests.

use crate::reddit::client::Error;
use crate::reddit::{CommentSort, RedditClient, RedditService, Service};
use crate::resolve::resolve_post_id;
use crate::view::{self, Viewable};
use itertools::Itertools;
use log::{error, info, warn};
use std::fmt::Display;

/// Number of hot threads fetched when the caller does not say.
pub const DEFAULT_HOT_LIMIT: u32 = 10;

/// Number of top-level comments fetched with a post's content when the
/// caller does not say.
pub const DEFAULT_COMMENT_LIMIT: u32 = 20;

/// How deeply replies are fetched with a post's content when the caller
/// does not say.
pub const DEFAULT_COMMENT_DEPTH: u32 = 3;

fn failure(err: &impl Display) -> String {
    format!("An error occurred: {err}")
}

/// The set of Reddit tools, sharing a single client.
#[derive(Debug)]
pub struct RedditTools<S: Service = RedditService> {
    client: RedditClient<S>,
}

impl<S: Service> RedditTools<S> {
    /// Creates a new set of tools that read from Reddit using `client`.
    pub fn new(client: RedditClient<S>) -> Self {
        Self { client }
    }

    /// The client used to reach Reddit.
    pub fn client(&self) -> &RedditClient<S> {
        &self.client
    }

    /// Fetches general data from a Reddit submission URL, along with all
    /// of its comments.
    ///
    /// Returns a list of text sections describing the post. If the URL
    /// does not point to a submission, or the post cannot be fetched, the
    /// list holds a single section describing the problem instead.
    pub async fn fetch_post_from_url(&self, reddit_url: &str) -> Vec<String> {
        let post_id = match resolve_post_id(reddit_url) {
            Ok(post_id) => post_id,
            Err(err) => {
                warn!("{reddit_url}: {err}");
                return vec![err.to_string()];
            }
        };

        match self.post_from_url(&post_id).await {
            Ok(sections) => sections,
            Err(err) => {
                error!("An error occurred while fetching post from URL {reddit_url}: {err}");
                vec![failure(&err)]
            }
        }
    }

    async fn post_from_url(&self, post_id: &str) -> Result<Vec<String>, Error> {
        let submission = self.client.fetch_submission(post_id).await?;
        info!("Fetched submission: {submission:?}");

        let mut sections = view::post_sections(&submission);

        let forest = self
            .client
            .fetch_comment_tree(post_id, CommentSort::Top, None, None)
            .await?;
        if !forest.is_empty() {
            let trees = forest.children().iter().map(Viewable::view).join("\n");
            sections.push(format!("Comments:\n{trees}"));
        }

        Ok(sections)
    }

    /// Fetches up to `limit` hot threads from a subreddit.
    ///
    /// Threads are separated by blank lines, and each ends with a `---`
    /// line.
    pub async fn fetch_hot_threads(&self, subreddit: &str, limit: u32) -> String {
        match self.client.pull_hot(subreddit, limit as usize).await {
            Ok(submissions) => submissions.iter().map(Viewable::view).join("\n\n"),
            Err(err) => {
                error!("An error occurred: {err}");
                failure(&err)
            }
        }
    }

    /// Fetches detailed content of a specific post, along with its top
    /// `comment_limit` comments and their replies down to `comment_depth`
    /// levels.
    pub async fn fetch_post_content(
        &self,
        post_id: &str,
        comment_limit: u32,
        comment_depth: u32,
    ) -> String {
        match self
            .post_content(post_id, comment_limit, comment_depth)
            .await
        {
            Ok(content) => content,
            Err(err) => {
                error!("An error occurred while fetching post {post_id}: {err}");
                failure(&err)
            }
        }
    }

    async fn post_content(
        &self,
        post_id: &str,
        comment_limit: u32,
        comment_depth: u32,
    ) -> Result<String, Error> {
        let submission = self.client.fetch_submission(post_id).await?;
        let mut content = view::post_header(&submission);

        let forest = self
            .client
            .fetch_comment_tree(
                post_id,
                CommentSort::Top,
                Some(comment_limit),
                Some(comment_depth),
            )
            .await?;
        if forest.is_empty() {
            content += "\nNo comments found.";
        } else {
            content += "\nComments:\n";
            for tree in forest.children() {
                content += "\n";
                content += &tree.view();
            }
        }

        Ok(content)
    }
}
