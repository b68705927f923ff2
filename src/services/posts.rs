use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::{is_unique_violation, models::Post};
use crate::error::ApiError;
use crate::normalize::{normalize_slug, TagsInput};

use super::{double_option, trim_or_null};

/// Fields for creating a post. Missing keys default so validation can report
/// them as empty rather than failing at the deserializer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content_md: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub published: bool,
}

/// Partial-patch payload: only keys present in the request are applied.
/// `coverImageUrl: null` explicitly clears the field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content_md: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image_url: Option<Option<String>>,
    pub tags: Option<TagsInput>,
    pub published: Option<bool>,
}

impl PostPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.excerpt.is_none()
            && self.content_md.is_none()
            && self.cover_image_url.is_none()
            && self.tags.is_none()
            && self.published.is_none()
    }
}

pub struct PostService<'a> {
    db: &'a PgPool,
}

impl<'a> PostService<'a> {
    pub fn new(db: &'a PgPool) -> Self {
        Self { db }
    }

    /// All posts, newest first. `published_only` is mandatory for callers
    /// without an admin session.
    pub async fn list(&self, published_only: bool) -> Result<Vec<Post>, ApiError> {
        let sql = if published_only {
            "SELECT * FROM posts WHERE published = TRUE ORDER BY created_at DESC"
        } else {
            "SELECT * FROM posts ORDER BY created_at DESC"
        };
        Ok(sqlx::query_as::<_, Post>(sql).fetch_all(self.db).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Post, ApiError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("post not found"))
    }

    /// Lookup for public detail pages. Drafts are indistinguishable from
    /// missing rows unless the caller holds an admin session.
    pub async fn get_by_slug(&self, slug: &str, include_drafts: bool) -> Result<Post, ApiError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("post not found"))?;

        if !post.published && !include_drafts {
            return Err(ApiError::not_found("post not found"));
        }
        Ok(post)
    }

    pub async fn create(&self, input: NewPost) -> Result<Post, ApiError> {
        let title = input.title.trim().to_string();
        let mut slug = normalize_slug(&input.slug);
        if slug.is_empty() {
            // Supplied slug normalizes away; derive one from the title.
            slug = normalize_slug(&title);
        }
        let excerpt = input.excerpt.trim().to_string();

        if title.is_empty()
            || slug.is_empty()
            || excerpt.is_empty()
            || input.content_md.trim().is_empty()
        {
            return Err(ApiError::missing_fields(
                "title, slug, excerpt and contentMd are required",
            ));
        }

        let tags = input.tags.map(TagsInput::into_tags).unwrap_or_default();

        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, title, slug, excerpt, content_md, cover_image_url, tags, published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(slug)
        .bind(excerpt)
        .bind(input.content_md)
        .bind(trim_or_null(input.cover_image_url))
        .bind(tags)
        .bind(input.published)
        .fetch_one(self.db)
        .await
        .map_err(slug_conflict)
    }

    pub async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, ApiError> {
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let slug = match &patch.slug {
            Some(raw) => {
                let slug = normalize_slug(raw);
                if slug.is_empty() {
                    return Err(ApiError::missing_fields("slug must not be empty"));
                }
                Some(slug)
            }
            None => None,
        };

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE posts SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(title) = patch.title {
                set.push("title = ")
                    .push_bind_unseparated(title.trim().to_string());
            }
            if let Some(slug) = slug {
                set.push("slug = ").push_bind_unseparated(slug);
            }
            if let Some(excerpt) = patch.excerpt {
                set.push("excerpt = ")
                    .push_bind_unseparated(excerpt.trim().to_string());
            }
            if let Some(content_md) = patch.content_md {
                set.push("content_md = ").push_bind_unseparated(content_md);
            }
            if let Some(cover) = patch.cover_image_url {
                set.push("cover_image_url = ")
                    .push_bind_unseparated(trim_or_null(cover));
            }
            if let Some(tags) = patch.tags {
                set.push("tags = ").push_bind_unseparated(tags.into_tags());
            }
            if let Some(published) = patch.published {
                set.push("published = ").push_bind_unseparated(published);
            }
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Post>()
            .fetch_optional(self.db)
            .await
            .map_err(slug_conflict)?
            .ok_or_else(|| ApiError::not_found("post not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("post not found"));
        }
        Ok(())
    }
}

fn slug_conflict(err: sqlx::Error) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::conflict("slug already exists")
    } else {
        err.into()
    }
}
