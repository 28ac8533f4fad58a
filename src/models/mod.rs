//! Domain models
//!
//! Plain entity structs mapped to database rows, plus the input types used
//! when creating or updating records.

pub mod article;
pub mod comment;
pub mod group;
pub mod post;
pub mod session;
pub mod user;

pub use article::{Article, CreateArticleInput, UpdateArticleInput};
pub use comment::{Comment, CommentWithAuthor, CreateCommentInput};
pub use group::{Group, Member, Membership};
pub use post::{CreatePostInput, Post, UpdatePostInput};
pub use session::Session;
pub use user::{RegisterInput, User};
