use super::ids::{PostId, UserId};
use super::like::Like;
use super::our_date_time::OurDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    #[serde(rename = "UserId")]
    pub user_id: UserId,
    #[serde(rename = "createdAt")]
    pub created_at: OurDateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: OurDateTime,
    /// Present only when the read asked for likes to be included.
    #[serde(rename = "Likes", skip_serializing_if = "Option::is_none")]
    pub likes: Option<Vec<Like>>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Body of `POST /posts`.
///
/// Fields are taken as sent: nothing checks them for presence or length, and a
/// missing field is stored as empty text. The owner never comes from the body;
/// any `UserId` a client sends is ignored and the caller becomes the owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl NewPost {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Body of `PUT /posts/<id>`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PostChanges {
    pub fn apply_to(&self, post: &mut Post, at: OurDateTime) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(body) = &self.body {
            post.body = body.clone();
        }
        post.updated_at = at;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rocket::serde::json::{self, json, Value};

    fn post() -> Post {
        let at = OurDateTime::now();
        Post {
            id: PostId(1),
            title: "first".into(),
            body: "hello".into(),
            user_id: UserId(1),
            created_at: at,
            updated_at: at,
            likes: None,
        }
    }

    #[test]
    fn wire_names() {
        let mut post = post();
        let value: Value = json::from_str(&json::to_string(&post).unwrap()).unwrap();
        assert_eq!(value["UserId"], json!(1));
        assert_eq!(value["title"], json!("first"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("Likes").is_none());

        post.likes = Some(vec![]);
        let value: Value = json::from_str(&json::to_string(&post).unwrap()).unwrap();
        assert_eq!(value["Likes"], json!([]));
    }

    #[test]
    fn new_post_ignores_owner_field() {
        let new_post: NewPost =
            json::from_str(r#"{"title": "t", "UserId": 99, "extra": true}"#).unwrap();
        assert_eq!(new_post.title(), "t");
        assert_eq!(new_post.body(), "");
    }

    #[test]
    fn partial_changes_keep_untouched_fields() {
        let mut post = post();
        let changes = PostChanges {
            title: Some("renamed".into()),
            body: None,
        };
        let later = OurDateTime::now();
        changes.apply_to(&mut post, later);
        assert_eq!(post.title, "renamed");
        assert_eq!(post.body, "hello");
        assert_eq!(post.updated_at, later);
    }
}
