use chrono::NaiveDate;
use serde::Serialize;

use super::user::UserId;

pub type PostId = i32;

/// Display format of `BlogPost::date`, e.g. "August 24, 2023".
pub const POST_DATE_FORMAT: &str = "%B %d, %Y";

/// BlogPost entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub subtitle: String,
    /// Creation day, already formatted for display. Never parsed back.
    pub date: String,
    pub body: String,
    pub img_url: String,
}

/// Editable fields of a post, shared by create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostFields {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

/// A post about to be created.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub fields: PostFields,
    pub author_id: UserId,
    pub date: String,
}

impl NewPost {
    /// Create a post authored by `author_id`, dated `today`.
    pub fn new(fields: PostFields, author_id: UserId, today: NaiveDate) -> Self {
        Self {
            fields,
            author_id,
            date: today.format(POST_DATE_FORMAT).to_string(),
        }
    }
}

impl From<&BlogPost> for PostFields {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            body: post.body.clone(),
            img_url: post.img_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_formats_date() {
        let fields = PostFields {
            title: "Hello".to_string(),
            subtitle: "S".to_string(),
            body: "B".to_string(),
            img_url: "u".to_string(),
        };

        let post = NewPost::new(fields, 1, NaiveDate::from_ymd_opt(2023, 8, 4).unwrap());

        assert_eq!(post.date, "August 04, 2023");
        assert_eq!(post.author_id, 1);
    }
}
