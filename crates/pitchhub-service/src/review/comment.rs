//! Threaded comments on reviews.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use pitchhub_auth::rbac::{Capability, RbacEnforcer};
use pitchhub_core::error::AppError;
use pitchhub_database::repositories::{CommentRepository, ReviewRepository};
use pitchhub_entity::comment::{Comment, CreateComment};

use crate::context::RequestContext;

/// Request to comment on a review, or to reply to one of its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<Uuid>,
}

/// A comment with its replies, oldest first at every level.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentThread>,
}

/// Nest a flat list of comments under their parents.
///
/// Input order is kept among siblings. A comment whose parent is not in
/// the list is treated as top-level.
pub fn build_threads(comments: Vec<Comment>) -> Vec<CommentThread> {
    let known: HashSet<Uuid> = comments.iter().map(|c| c.id).collect();
    let mut children: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    let mut roots = Vec::new();

    for comment in comments {
        match comment.parent_id {
            Some(parent) if known.contains(&parent) => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }

    fn attach(comment: Comment, children: &mut HashMap<Uuid, Vec<Comment>>) -> CommentThread {
        let replies = children
            .remove(&comment.id)
            .unwrap_or_default()
            .into_iter()
            .map(|reply| attach(reply, children))
            .collect();
        CommentThread { comment, replies }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

/// Writes and lists review comments.
#[derive(Debug, Clone)]
pub struct CommentService {
    comment_repo: Arc<CommentRepository>,
    review_repo: Arc<ReviewRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comment_repo: Arc<CommentRepository>,
        review_repo: Arc<ReviewRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            comment_repo,
            review_repo,
            rbac,
        }
    }

    /// The comment threads of a review.
    pub async fn list(&self, review_id: Uuid) -> Result<Vec<CommentThread>, AppError> {
        self.require_review(review_id).await?;
        let comments = self.comment_repo.find_by_review(review_id).await?;
        Ok(build_threads(comments))
    }

    /// Adds a comment. A reply's parent must belong to the same review.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        review_id: Uuid,
        req: CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        self.rbac.require(ctx.role, Capability::WriteComment)?;
        let content = req.content.trim();
        if content.is_empty() {
            return Err(AppError::field("content", "Comment cannot be empty"));
        }
        self.require_review(review_id).await?;

        if let Some(parent_id) = req.parent_id {
            let parent = self.comment_repo.find_by_id(parent_id).await?;
            if parent.is_none_or(|p| p.review_id != review_id) {
                return Err(AppError::field(
                    "parent_id",
                    "Parent comment does not belong to this review",
                ));
            }
        }

        let comment = self
            .comment_repo
            .create(&CreateComment {
                user_id: ctx.user_id,
                review_id,
                parent_id: req.parent_id,
                content: content.to_string(),
            })
            .await?;

        info!(
            comment_id = %comment.id,
            review_id = %review_id,
            user_id = %ctx.user_id,
            "Comment created"
        );
        Ok(comment)
    }

    async fn require_review(&self, review_id: Uuid) -> Result<(), AppError> {
        match self.review_repo.find_by_id(review_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Review {review_id} not found"))),
        }
    }
}
