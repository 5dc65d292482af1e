use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use validator::Validate;

use crate::domain::promotion::NewPromotion;
use crate::domain::status::Status;
use crate::domain::types::{PromotionTitle, PromotionUrl};
use crate::forms::FormError;

#[derive(MultipartForm)]
pub struct CreatePromotionForm {
    pub title: Text<String>,
    pub url: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

#[derive(Debug, Validate)]
pub struct CreatePromotionPayload {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(url)]
    pub url: String,
}

impl CreatePromotionForm {
    pub fn into_parts(self) -> (CreatePromotionPayload, Option<TempFile>) {
        let payload = CreatePromotionPayload {
            title: self.title.into_inner(),
            url: self.url.into_inner(),
        };
        (payload, self.image)
    }
}

impl CreatePromotionPayload {
    pub fn into_new_promotion(self, image: Option<String>) -> Result<NewPromotion, FormError> {
        self.validate()?;
        Ok(NewPromotion {
            title: PromotionTitle::new(self.title)?,
            url: PromotionUrl::new(self.url)?,
            image,
            status: Status::Active,
        })
    }
}
