// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Clients for reading data from the Reddit API.

use crate::http::HTTPError;
use crate::reddit::service::{RedditService, Service};
use crate::thing::{self, CommentForest, Submission};
use log::debug;
use std::fmt;
use thiserror::Error;

/// Orders in which Reddit can return a comment tree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CommentSort {
    /// Highest score first.
    #[default]
    Top,
}

impl CommentSort {
    /// The value Reddit expects for the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentSort::Top => "top",
        }
    }
}

impl fmt::Display for CommentSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reads submissions, comment trees, and listings from Reddit.
///
/// A client is created once and shared by every request the program
/// serves. It holds no state of its own beyond the underlying
/// [`Service`], so it is safe to use concurrently as long as the service
/// is.
#[derive(Debug)]
pub struct RedditClient<S: Service = RedditService> {
    service: S,
}

impl<S: Service> RedditClient<S> {
    /// Maximum number of things Reddit returns in a single listing page.
    pub const PAGE_SIZE: usize = 100;

    /// Creates a new client that retrieves data using the given `service`.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The service used to reach Reddit.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fetches a single submission by its id (without the `t3_` prefix).
    ///
    /// Returns [`Error::NotFound`] if Reddit knows of no such submission.
    pub async fn fetch_submission(&self, id: &str) -> Result<Submission, Error> {
        let data = self
            .service
            .get_resource(&format!("/by_id/t3_{id}"), &[])
            .await?;
        let (submissions, _) = thing::parse_submissions(&data)?;
        submissions
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Fetches the comment tree for the submission with the given `id`.
    ///
    /// `limit` caps the number of comments Reddit returns and `depth` caps
    /// how deeply replies are nested; `None` leaves either up to Reddit.
    pub async fn fetch_comment_tree(
        &self,
        id: &str,
        sort: CommentSort,
        limit: Option<u32>,
        depth: Option<u32>,
    ) -> Result<CommentForest, Error> {
        let mut query = vec![("sort", sort.to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(depth) = depth {
            query.push(("depth", depth.to_string()));
        }

        let data = self
            .service
            .get_resource(&format!("/comments/{id}"), &query)
            .await?;
        let forest = CommentForest::parse(&data)?;
        debug!(
            "fetched {} top-level comments for {id}",
            forest.children().len()
        );
        Ok(forest)
    }

    /// Pulls up to `limit` submissions from a subreddit's hot listing.
    ///
    /// Pages are requested one after another, following Reddit's `after`
    /// cursor, until `limit` submissions have been collected or the
    /// listing runs out.
    pub async fn pull_hot(&self, subreddit: &str, limit: usize) -> Result<Vec<Submission>, Error> {
        let path = format!("/r/{subreddit}/hot");
        let mut submissions = vec![];
        let mut after: Option<String> = None;

        while submissions.len() < limit {
            let remaining = limit - submissions.len();
            let mut query = vec![("limit", remaining.min(Self::PAGE_SIZE).to_string())];
            if let Some(cursor) = &after {
                query.push(("after", cursor.clone()));
            }

            let data = self.service.get_resource(&path, &query).await?;
            let (page, next) = thing::parse_submissions(&data)?;
            debug!("pulled {} submissions from r/{subreddit}", page.len());

            let exhausted = page.is_empty();
            submissions.extend(page.into_iter().take(remaining));
            match next {
                Some(next) if !exhausted => after = Some(next),
                _ => break,
            }
        }

        Ok(submissions)
    }
}

/// A client error.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] HTTPError),

    /// An error parsing data.
    #[error("Parse error: {0}")]
    Parse(#[from] thing::Error),

    /// The requested submission does not exist.
    #[error("Submission not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    mod comment_sort {
        use crate::reddit::client::CommentSort;

        #[test]
        fn it_defaults_to_top() {
            assert_eq!(CommentSort::default(), CommentSort::Top);
        }

        #[test]
        fn it_displays_query_values() {
            assert_eq!(CommentSort::Top.to_string(), "top");
        }
    }

    mod fetch_submission {
        use crate::reddit::RedditClient;
        use crate::reddit::client::Error;

        #[tokio::test]
        async fn it_fetches_a_submission() {
            let client = RedditClient::test();
            let post = client.fetch_submission("abc123").await.unwrap();
            assert_eq!(post.title(), "My first Rust project");
            assert_eq!(client.service().requests(), vec!["/by_id/t3_abc123"]);
        }

        #[tokio::test]
        async fn it_fails_for_missing_submissions() {
            let client = RedditClient::test();
            let err = client.fetch_submission("gone").await.unwrap_err();
            assert!(matches!(err, Error::NotFound(ref id) if id == "gone"));
            assert_eq!(err.to_string(), "Submission not found: gone");
        }

        #[tokio::test]
        async fn it_fails_when_the_service_fails() {
            let client = RedditClient::test();
            let err = client.fetch_submission("nope").await.unwrap_err();
            assert!(matches!(err, Error::Service(_)));
            assert_eq!(
                err.to_string(),
                "Service error: Request returned HTTP 404 Not Found"
            );
        }
    }

    mod fetch_comment_tree {
        use crate::reddit::RedditClient;
        use crate::reddit::client::{CommentSort, Error};

        #[tokio::test]
        async fn it_fetches_a_comment_tree() {
            let client = RedditClient::test();
            let forest = client
                .fetch_comment_tree("abc123", CommentSort::Top, Some(20), Some(3))
                .await
                .unwrap();
            assert_eq!(forest.children().len(), 2);
            assert_eq!(
                client.service().requests(),
                vec!["/comments/abc123?sort=top&limit=20&depth=3"]
            );
        }

        #[tokio::test]
        async fn it_fails_on_malformed_replies() {
            let client = RedditClient::test();
            let err = client
                .fetch_comment_tree("broken", CommentSort::Top, None, None)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::Parse(_)), "{err:?}");
        }

        #[tokio::test]
        async fn it_omits_unbounded_limits() {
            let client = RedditClient::test();
            client
                .fetch_comment_tree("abc123", CommentSort::Top, None, None)
                .await
                .unwrap();
            assert_eq!(
                client.service().requests(),
                vec!["/comments/abc123?sort=top"]
            );
        }
    }

    mod pull_hot {
        use crate::reddit::RedditClient;

        #[tokio::test]
        async fn it_follows_pagination_cursors() {
            let client = RedditClient::test();
            let posts = client.pull_hot("rust", 10).await.unwrap();
            let ids: Vec<_> = posts.iter().map(|p| p.id()).collect();
            assert_eq!(ids, vec!["hot1", "hot2", "hot3"]);
            assert_eq!(
                client.service().requests(),
                vec!["/r/rust/hot?limit=10", "/r/rust/hot?limit=8&after=t3_page2"]
            );
        }

        #[tokio::test]
        async fn it_stops_once_the_limit_is_reached() {
            let client = RedditClient::test();
            let posts = client.pull_hot("rust", 1).await.unwrap();
            assert_eq!(posts.len(), 1);
            assert_eq!(posts[0].id(), "hot1");
            assert_eq!(client.service().requests(), vec!["/r/rust/hot?limit=1"]);
        }

        #[tokio::test]
        async fn it_requests_at_most_one_page_size_at_a_time() {
            let client = RedditClient::test();
            client.pull_hot("rust", 250).await.unwrap();
            assert_eq!(client.service().requests()[0], "/r/rust/hot?limit=100");
        }

        #[tokio::test]
        async fn it_does_not_request_anything_for_a_zero_limit() {
            let client = RedditClient::test();
            let posts = client.pull_hot("rust", 0).await.unwrap();
            assert!(posts.is_empty());
            assert!(client.service().requests().is_empty());
        }

        #[tokio::test]
        async fn it_fails_for_unknown_subreddits() {
            let client = RedditClient::test();
            assert!(client.pull_hot("doesnotexist", 10).await.is_err());
        }
    }
}
