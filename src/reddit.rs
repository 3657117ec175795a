//! Reddit API clients and services for communicating with Reddit over HTTP.

pub mod client;
pub mod service;

pub use client::{CommentSort, RedditClient};
pub use service::{RedditService, Service};
