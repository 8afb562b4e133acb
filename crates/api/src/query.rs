//! Query parameter types shared by list handlers.

use inkpost_core::filter::PostFilter;
use inkpost_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

/// `GET /api/posts?category_id=&tag_ids=1,2&q=`
#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    pub category_id: Option<DbId>,
    /// Comma-separated tag ids; a post must carry all of them.
    pub tag_ids: Option<String>,
    /// Free-text search over title and content, matched verbatim.
    pub q: Option<String>,
}

impl PostListParams {
    pub fn to_filter(&self) -> Result<PostFilter, AppError> {
        let tag_ids = match &self.tag_ids {
            None => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<DbId>()
                        .map_err(|_| AppError::BadRequest(format!("Invalid tag id: {s}")))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(PostFilter {
            category_id: self.category_id,
            tag_ids,
            query: self.q.clone().unwrap_or_default(),
        })
    }
}
