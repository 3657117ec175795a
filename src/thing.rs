//! A "thing" in the Reddit sense.
//!
//! Historically in the Reddit API and its old source code, a "Thing" was
//! any element of the Reddit system: users, posts, comments, etc. This
//! module encapsulates that idea and provides an easy way to more or less
//! work with JSON data from the Reddit API.
//!
//! All data is parsed from responses requested with `raw_json=1`, so text
//! fields arrive without HTML entity escaping.

use crate::clock::HasTimestamp;
use serde::Deserialize;
use serde::de::IgnoredAny;

/// An error parsing JSON data from the Reddit API.
pub type Error = serde_json::Error;

/// A page of things, as returned by Reddit's listing endpoints.
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
struct ListingData<T> {
    #[serde(default)]
    after: Option<String>,
    children: Vec<T>,
}

impl<T> Listing<T> {
    /// Cursor pointing at the next page, if there is one.
    pub fn after(&self) -> Option<&str> {
        self.data.after.as_deref()
    }

    /// Consumes the listing, returning the things it holds.
    pub fn into_children(self) -> Vec<T> {
        self.data.children
    }
}

/// Wraps the `data` payload of a thing, ignoring its `kind`.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    data: T,
}

impl<T> Thing<T> {
    /// Consumes the wrapper, returning the thing itself.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Parses a listing of submissions, returning the submissions and the
/// cursor for the next page.
pub fn parse_submissions(data: &str) -> Result<(Vec<Submission>, Option<String>), Error> {
    let listing: Listing<Thing<Submission>> = serde_json::from_str(data)?;
    let after = listing.after().map(String::from);
    let submissions = listing
        .into_children()
        .into_iter()
        .map(Thing::into_inner)
        .collect();
    Ok((submissions, after))
}

/// Reddit reports deleted accounts as a literal `[deleted]`.
fn author_display_name(author: Option<String>) -> Option<String> {
    author.filter(|name| !name.is_empty() && name != "[deleted]")
}

/// The type-specific payload of a submission.
#[derive(Clone, Debug, PartialEq)]
pub enum Post {
    /// A post linking to an external URL.
    Link { url: String },

    /// A self post with a text body.
    Text { body: String },

    /// A gallery of images.
    Gallery { gallery_link: String },

    /// Anything else: polls, crossposts, and whatever Reddit invents next.
    Unknown,
}

impl Post {
    /// A short tag naming the kind of post.
    pub fn tag(&self) -> &'static str {
        match self {
            Post::Link { .. } => "link",
            Post::Text { .. } => "text",
            Post::Gallery { .. } => "gallery",
            Post::Unknown => "unknown",
        }
    }

    /// The post's main content: a URL for links and galleries, the body
    /// for text posts.
    pub fn content(&self) -> Option<&str> {
        match self {
            Post::Link { url } => Some(url.as_str()),
            Post::Text { body } => Some(body.as_str()),
            Post::Gallery { gallery_link } => Some(gallery_link.as_str()),
            Post::Unknown => None,
        }
    }
}

/// A Reddit post.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(from = "RawSubmission")]
pub struct Submission {
    id: String,
    title: String,
    score: i64,
    author_display_name: Option<String>,
    subreddit: String,
    permalink: String,
    comment_count: i64,
    created_ut: i64,
    post: Post,
}

#[derive(Deserialize)]
struct RawSubmission {
    id: String,
    title: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    author: Option<String>,
    subreddit: String,
    permalink: String,
    #[serde(default)]
    num_comments: i64,
    created_utc: f64,
    #[serde(default)]
    is_self: bool,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    is_gallery: Option<bool>,
    #[serde(default)]
    poll_data: Option<IgnoredAny>,
    #[serde(default)]
    crosspost_parent: Option<String>,
}

impl RawSubmission {
    fn post(&mut self) -> Post {
        if self.is_gallery.unwrap_or(false) {
            let gallery_link = format!("https://www.reddit.com/gallery/{}", self.id);
            Post::Gallery { gallery_link }
        } else if self.poll_data.is_some() || self.crosspost_parent.is_some() {
            Post::Unknown
        } else if self.is_self {
            Post::Text {
                body: std::mem::take(&mut self.selftext),
            }
        } else {
            match self.url.take() {
                Some(url) if !url.is_empty() => Post::Link { url },
                _ => Post::Unknown,
            }
        }
    }
}

impl From<RawSubmission> for Submission {
    fn from(mut raw: RawSubmission) -> Self {
        let post = raw.post();
        Self {
            id: raw.id,
            title: raw.title,
            score: raw.score,
            author_display_name: author_display_name(raw.author),
            subreddit: raw.subreddit,
            permalink: raw.permalink,
            comment_count: raw.num_comments,
            created_ut: raw.created_utc.trunc() as i64,
            post,
        }
    }
}

impl Submission {
    /// The submission's base-36 id, without the `t3_` prefix.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The submission's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The submission's score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The author's username, or `None` if the account has been deleted.
    pub fn author_display_name(&self) -> Option<&str> {
        self.author_display_name.as_deref()
    }

    /// Name of the subreddit the post appears in.
    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    /// Absolute link to the submission.
    pub fn link(&self) -> String {
        format!("https://reddit.com{}", self.permalink)
    }

    /// Number of comments on the submission.
    pub fn comment_count(&self) -> i64 {
        self.comment_count
    }

    /// The type-specific payload.
    pub fn post(&self) -> &Post {
        &self.post
    }
}

impl HasTimestamp for Submission {
    fn created_ut(&self) -> i64 {
        self.created_ut
    }
}

/// A Reddit comment.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    author_display_name: Option<String>,
    created_ut: i64,
    score: i64,
    body: String,
}

impl Comment {
    /// Creates a new comment.
    ///
    /// Empty author names are treated as deleted accounts.
    pub fn new(
        author: Option<impl Into<String>>,
        created_ut: i64,
        score: i64,
        body: impl Into<String>,
    ) -> Self {
        Self {
            author_display_name: author_display_name(author.map(Into::into)),
            created_ut,
            score,
            body: body.into(),
        }
    }

    /// The author's username, or `None` if the account has been deleted.
    pub fn author_display_name(&self) -> Option<&str> {
        self.author_display_name.as_deref()
    }

    /// The comment's score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The raw comment body, which may span multiple lines.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl HasTimestamp for Comment {
    fn created_ut(&self) -> i64 {
        self.created_ut
    }
}

/// One comment and its direct replies.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "RawComment")]
pub struct CommentNode {
    value: Comment,
    children: Vec<CommentNode>,
}

impl CommentNode {
    /// Creates a new node from a comment and its replies.
    pub fn new(value: Comment, children: Vec<CommentNode>) -> Self {
        Self { value, children }
    }

    /// The comment at this node.
    pub fn value(&self) -> &Comment {
        &self.value
    }

    /// Direct replies to the comment, in the order Reddit returned them.
    pub fn children(&self) -> &[CommentNode] {
        &self.children
    }
}

#[derive(Deserialize)]
struct RawComment {
    #[serde(default)]
    author: Option<String>,
    created_utc: f64,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    body: String,
    #[serde(default)]
    replies: Option<Replies>,
}

/// Reddit sends an empty string rather than an empty listing when a
/// comment has no replies.
#[derive(Deserialize)]
#[serde(untagged)]
enum Replies {
    Listing(Listing<CommentThing>),
    Empty(String),
}

#[derive(Deserialize)]
#[serde(tag = "kind", content = "data")]
enum CommentThing {
    #[serde(rename = "t1")]
    Comment(CommentNode),

    #[serde(rename = "more")]
    More(IgnoredAny),
}

impl TryFrom<RawComment> for CommentNode {
    type Error = String;

    fn try_from(raw: RawComment) -> Result<Self, Self::Error> {
        let children = match raw.replies {
            Some(Replies::Listing(listing)) => comment_nodes(listing),
            Some(Replies::Empty(s)) if s.is_empty() => vec![],
            Some(Replies::Empty(s)) => return Err(format!("unexpected replies: {s:?}")),
            None => vec![],
        };
        let value = Comment::new(raw.author, raw.created_utc.trunc() as i64, raw.score, raw.body);
        Ok(Self { value, children })
    }
}

// "Load more comments" stubs are dropped.
fn comment_nodes(listing: Listing<CommentThing>) -> Vec<CommentNode> {
    listing
        .into_children()
        .into_iter()
        .filter_map(|thing| match thing {
            CommentThing::Comment(node) => Some(node),
            CommentThing::More(_) => None,
        })
        .collect()
}

/// The top-level comments of a submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentForest {
    children: Vec<CommentNode>,
}

impl CommentForest {
    /// Creates a new forest from top-level comment trees.
    pub fn new(children: Vec<CommentNode>) -> Self {
        Self { children }
    }

    /// Parses the response to a `/comments/<id>` request.
    ///
    /// Reddit returns a two-element array: a listing holding the
    /// submission itself, followed by a listing of comments.
    pub fn parse(data: &str) -> Result<Self, Error> {
        let (_, comments): (IgnoredAny, Listing<CommentThing>) = serde_json::from_str(data)?;
        Ok(Self::new(comment_nodes(comments)))
    }

    /// Top-level comment trees.
    pub fn children(&self) -> &[CommentNode] {
        &self.children
    }

    /// True if the submission has no comments.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
