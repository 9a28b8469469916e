use super::ids::{PostId, UserId};
use super::our_date_time::OurDateTime;
use serde::Serialize;

/// A user liking a post. Only ever read, as part of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Like {
    pub id: u64,
    #[serde(rename = "UserId")]
    pub user_id: UserId,
    #[serde(rename = "PostId")]
    pub post_id: PostId,
    #[serde(rename = "createdAt")]
    pub created_at: OurDateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: OurDateTime,
}
