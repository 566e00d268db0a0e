//! Pitch reviews and the comment threads under them.

pub mod comment;
pub mod service;

pub use comment::{CommentService, CommentThread, CreateCommentRequest};
pub use service::{CreateReviewRequest, ReviewService};
