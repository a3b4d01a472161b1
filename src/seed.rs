//! Demo data for a fresh database.

use tracing::info;

use crate::auth::hash_password;
use crate::blog::{render_body, CommentRepository, NewComment, NewPost, PostRepository};
use crate::db::{Database, NewUser, UserRepository};
use crate::Result;

/// Demo account display name.
pub const DEMO_USER_NAME: &str = "Test User";
/// Demo account email.
pub const DEMO_USER_EMAIL: &str = "test@example.com";
/// Demo account password.
pub const DEMO_USER_PASSWORD: &str = "password";

const DEMO_POSTS: usize = 30;
const COMMENTS_PER_POST: usize = 15;

const TOPICS: &[&str] = &[
    "Getting started",
    "Notes from the weekend",
    "A small refactor",
    "Reading list",
    "Things I learned",
    "Field report",
];

/// Create the demo user with posts and comments.
///
/// Does nothing when the database already has users. Returns whether data
/// was created.
pub async fn seed_demo_data(db: &Database) -> Result<bool> {
    let users = UserRepository::new(db.pool());
    if users.count().await? > 0 {
        info!("Database already has users; skipping demo data");
        return Ok(false);
    }

    let user = users
        .create(&NewUser::new(
            DEMO_USER_NAME,
            DEMO_USER_EMAIL,
            hash_password(DEMO_USER_PASSWORD)?,
        ))
        .await?;

    let posts = PostRepository::new(db.pool());
    let comments = CommentRepository::new(db.pool());
    for n in 1..=DEMO_POSTS {
        let topic = TOPICS[n % TOPICS.len()];
        let body = format!(
            "This is demo post number {n} about *{topic}*.\n\n\
             It has a second paragraph with some `inline code`\nand a line break."
        );
        let post = posts
            .create(&NewPost {
                author_id: user.id,
                title: format!("{topic} #{n}"),
                rendered_body: render_body(&body),
                body,
            })
            .await?;

        for c in 1..=COMMENTS_PER_POST {
            comments
                .create(&NewComment::new(
                    post.id,
                    user.id,
                    format!("Comment {c} on post {n}."),
                ))
                .await?;
        }
    }

    info!(
        user_id = user.id,
        posts = DEMO_POSTS,
        comments_per_post = COMMENTS_PER_POST,
        "Demo data created"
    );
    Ok(true)
}
