//! Post and Comment entity <-> model mapper

use std::collections::HashMap;

use setlistd_core::{Comment, Media, Post};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{CommentModel, PostLikeModel, PostModel};

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            post_id: model.post_id,
            user_id: model.user_id,
            text: model.text,
            created_at: model.created_at,
        }
    }
}

/// Convert PostModel to a Post entity without likes or comments
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            user_id: model.user_id,
            event_id: model.event_id,
            content: model.content,
            media: model.media.0,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Attach likes and comments to their posts, preserving post order
pub fn assemble_posts(
    posts: Vec<PostModel>,
    likes: Vec<PostLikeModel>,
    comments: Vec<CommentModel>,
) -> Vec<Post> {
    let mut likes_by_post: HashMap<Uuid, Vec<String>> = HashMap::new();
    for like in likes {
        likes_by_post.entry(like.post_id).or_default().push(like.user_id);
    }

    let mut comments_by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    for comment in comments {
        comments_by_post
            .entry(comment.post_id)
            .or_default()
            .push(Comment::from(comment));
    }

    posts
        .into_iter()
        .map(|model| {
            let mut post = Post::from(model);
            post.likes = likes_by_post.remove(&post.id).unwrap_or_default();
            post.comments = comments_by_post.remove(&post.id).unwrap_or_default();
            post
        })
        .collect()
}

/// Post columns for insertion
pub struct PostInsert<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub event_id: Option<Uuid>,
    pub content: &'a str,
    pub media: Json<&'a [Media]>,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id,
            user_id: &post.user_id,
            event_id: post.event_id,
            content: &post.content,
            media: Json(&post.media),
        }
    }
}
