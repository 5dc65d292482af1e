use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::status::Status;
use crate::domain::types::{PromotionId, PromotionTitle, PromotionUrl};

/// Promotion banner linking to a storefront page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    pub id: PromotionId,
    pub title: PromotionTitle,
    pub url: PromotionUrl,
    /// Image name of the banner.
    pub image: Option<String>,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPromotion {
    pub title: PromotionTitle,
    pub url: PromotionUrl,
    pub image: Option<String>,
    pub status: Status,
}
