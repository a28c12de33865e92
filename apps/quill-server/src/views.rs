//! Server-rendered HTML pages.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use quill_core::domain::{Blog, BlogEntry, CommentEntry};

pub const LOGIN_PAGE: &str = include_str!("../templates/login.html");
pub const REGISTER_PAGE: &str = include_str!("../templates/register.html");

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn layout(title: &str, viewer: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} · Quill</title>
</head>
<body>
  <header>
    <a href="/blogs">Quill</a>
    <span class="viewer">{viewer}</span>
    <form method="post" action="/logout"><button type="submit">Log out</button></form>
  </header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
        viewer = escape(viewer),
    )
}

/// The feed: every blog, newest first.
pub fn blog_list(viewer: &str, entries: &[BlogEntry]) -> String {
    let mut body = String::from("    <h1>Blogs</h1>\n");

    if entries.is_empty() {
        body.push_str("    <p class=\"empty\">No blogs yet.</p>\n");
    }

    for BlogEntry { blog, author } in entries {
        let _ = writeln!(
            body,
            r#"    <article id="blog-{id}">
      <h2><a href="/blogs/{id}/detail">{title}</a></h2>
      <p class="meta">by {author} on {created}</p>
      <p>{content}</p>
    </article>"#,
            id = blog.id,
            title = escape(&blog.title),
            author = escape(author),
            created = timestamp(&blog.created_at),
            content = escape(&blog.content),
        );
    }

    layout("Blogs", viewer, &body)
}

/// A single blog with its comments, oldest first.
///
/// Comments owned by `viewer_id` are marked editable.
pub fn blog_detail(
    viewer: &str,
    viewer_id: Uuid,
    blog: &Blog,
    author: &str,
    comments: &[CommentEntry],
) -> String {
    let mut body = format!(
        r#"    <article id="blog-{id}">
      <h1>{title}</h1>
      <p class="meta">by {author} on {created}</p>
      <p>{content}</p>
    </article>
    <section class="comments">
      <h2>Comments</h2>
"#,
        id = blog.id,
        title = escape(&blog.title),
        author = escape(author),
        created = timestamp(&blog.created_at),
        content = escape(&blog.content),
    );

    for CommentEntry { comment, author } in comments {
        let owner_class = if comment.user_id == viewer_id {
            " editable"
        } else {
            ""
        };
        let _ = writeln!(
            body,
            r#"      <div class="comment{owner_class}" id="comment-{id}" data-id="{id}">
        <strong>{author}</strong> <span class="time">{created}</span>
        <p>{text}</p>
      </div>"#,
            id = comment.id,
            author = escape(author),
            created = timestamp(&comment.created_at),
            text = escape(&comment.text),
        );
    }

    body.push_str("    </section>\n");

    layout(&blog.title, viewer, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::Comment;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn list_escapes_user_content() {
        let blog = Blog::new(Uuid::new_v4(), Some("<b>bold</b>"), Some("body")).unwrap();
        let html = blog_list(
            "alice",
            &[BlogEntry {
                blog,
                author: "bob".to_string(),
            }],
        );

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("by bob"));
    }

    #[test]
    fn empty_feed_says_so() {
        assert!(blog_list("alice", &[]).contains("No blogs yet."));
    }

    #[test]
    fn detail_marks_viewer_comments_editable() {
        let viewer = Uuid::new_v4();
        let blog = Blog::new(Uuid::new_v4(), Some("Title"), Some("Body")).unwrap();
        let mine = Comment::new(blog.id, viewer, Some("mine")).unwrap();
        let theirs = Comment::new(blog.id, Uuid::new_v4(), Some("theirs")).unwrap();

        let html = blog_detail(
            "alice",
            viewer,
            &blog,
            "bob",
            &[
                CommentEntry {
                    comment: mine.clone(),
                    author: "alice".to_string(),
                },
                CommentEntry {
                    comment: theirs.clone(),
                    author: "carol".to_string(),
                },
            ],
        );

        assert!(html.contains(&format!(r#"class="comment editable" id="comment-{}""#, mine.id)));
        assert!(html.contains(&format!(r#"class="comment" id="comment-{}""#, theirs.id)));
    }
}
