//! Wire shapes returned by the provider, and their validation into
//! [`RecipeSummary`].
//!
//! Every field is optional on the wire so a malformed item produces a
//! [`UpstreamError::MissingField`] naming the field instead of an opaque
//! decode error.

use recipe_cache_core::{RecipeSummary, SPOONACULAR_IMAGE_PREFIX, SPOONACULAR_IMAGE_SIZE};
use serde::Deserialize;

use crate::error::UpstreamError;

/// Body of `GET /recipes/complexSearch`.
#[derive(Debug, Deserialize)]
pub struct ComplexSearchResponse {
    #[serde(default)]
    pub results: Vec<RawRecipeItem>,
}

/// One listing item as the provider sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipeItem {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub image_type: Option<String>,
}

impl RawRecipeItem {
    /// Validate into a summary. A missing `image` is derived from
    /// `imageType` using the provider's CDN layout.
    pub fn into_summary(self, context: &str) -> Result<RecipeSummary, UpstreamError> {
        let id = self.id.ok_or_else(|| missing("id", context))?;
        let title = self.title.ok_or_else(|| missing("title", context))?;
        let image = match (self.image, self.image_type) {
            (Some(image), _) if !image.is_empty() => image,
            (_, Some(image_type)) if !image_type.is_empty() => image_url(id, &image_type),
            _ => return Err(missing("image", context)),
        };
        Ok(RecipeSummary { id, title, image: Some(image) })
    }
}

/// Validate a whole listing, failing on the first bad item.
pub fn into_summaries(
    items: Vec<RawRecipeItem>,
    context: &str,
) -> Result<Vec<RecipeSummary>, UpstreamError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_summary(&format!("{context}[{index}]")))
        .collect()
}

#[must_use]
pub fn image_url(id: i64, image_type: &str) -> String {
    format!("{SPOONACULAR_IMAGE_PREFIX}{id}-{SPOONACULAR_IMAGE_SIZE}.{image_type}")
}

fn missing(field: &'static str, context: &str) -> UpstreamError {
    UpstreamError::MissingField { field, context: context.to_owned() }
}
