//! Renders Reddit things as human-readable text.
//!
//! Output from this module is consumed by language models rather than
//! drawn in a terminal, so it is plain text: no color, no wrapping.

use crate::clock::HasTimestamp;
use crate::thing::{CommentNode, Submission};
use indoc::formatdoc;
use itertools::Itertools;
use std::cmp::Reverse;

/// Shown in place of the author of a deleted account.
pub const DELETED: &str = "[deleted]";

/// Indentation added for each level of a comment tree.
const INDENT: &str = "    ";

/// Prefix added to every line of a reply, once per level of nesting.
const QUOTE: &str = "> ";

/// Marks an item that can be converted into a string for display.
pub trait Viewable {
    /// Converts the item into a string for display.
    fn view(&self) -> String;
}

fn author_or_deleted(author: Option<&str>) -> &str {
    author.filter(|name| !name.is_empty()).unwrap_or(DELETED)
}

// Posts without type-specific content render as "None".
fn content_or_none(post: &Submission) -> &str {
    post.post().content().unwrap_or("None")
}

/// Renders a comment and all of its replies.
///
/// The comment itself occupies two lines, a header and its body, both
/// indented by four spaces per level of `depth`:
///
/// ```text
/// 2025-01-01 12:00:00 UTC [ferris] Score: 12
/// Comment body
/// ```
///
/// Replies follow, newest first, each rendered at `depth + 1` with every
/// line of the reply prefixed by `"> "`. Deeper replies therefore carry
/// one `"> "` for every ancestor.
///
/// Dates are rendered in local time despite the "UTC" label; see
/// [`DATE_FORMAT`](crate::clock::DATE_FORMAT).
pub fn format_tree(node: &CommentNode, depth: usize) -> String {
    let comment = node.value();
    let indent = INDENT.repeat(depth);

    let mut s = format!(
        "{indent}{} [{}] Score: {}\n",
        comment.formatted_date(),
        author_or_deleted(comment.author_display_name()),
        comment.score(),
    );
    s += &format!("{indent}{}\n", comment.body());

    let replies = node
        .children()
        .iter()
        .sorted_by_key(|reply| Reverse(reply.value().created_ut()));
    for reply in replies {
        for line in format_tree(reply, depth + 1).split_inclusive('\n') {
            s += QUOTE;
            s += line;
        }
    }

    s
}

impl Viewable for CommentNode {
    fn view(&self) -> String {
        format_tree(self, 0)
    }
}

impl Viewable for Submission {
    /// Renders the submission as a block in a list of threads, terminated
    /// by a `---` separator line.
    fn view(&self) -> String {
        formatdoc! {"
            Title: {}
            Score: {}
            Comments: {}
            Author: {}
            Type: {}
            Content: {}
            Link: {}
            ---",
            self.title(),
            self.score(),
            self.comment_count(),
            author_or_deleted(self.author_display_name()),
            self.post().tag(),
            content_or_none(self),
            self.link(),
        }
    }
}

/// Renders the head of a detailed post view: title, score, author,
/// type, and content, each on its own line.
pub fn post_header(post: &Submission) -> String {
    let mut s = formatdoc! {"
        Title: {}
        Score: {}
        Author: {}
        Type: {}
        Content: {}",
        post.title(),
        post.score(),
        author_or_deleted(post.author_display_name()),
        post.post().tag(),
        content_or_none(post),
    };
    s.push('\n');
    s
}

/// Renders a submission as a list of separate text sections, one for
/// each piece of information about the post.
pub fn post_sections(post: &Submission) -> Vec<String> {
    vec![
        format!("Title: {}", post.title()),
        format!("Score: {}", post.score()),
        format!("Author: {}", author_or_deleted(post.author_display_name())),
        format!("Subreddit: {}", post.subreddit()),
        format!("Type: {}", post.post().tag()),
        format!("Content: {}", content_or_none(post)),
        format!("Link: {}", post.link()),
        format!("Number of Comments: {}", post.comment_count()),
    ]
}
