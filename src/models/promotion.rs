use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::promotion::{NewPromotion as DomainNewPromotion, Promotion as DomainPromotion};
use crate::domain::types::{PromotionId, PromotionTitle, PromotionUrl, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::promotions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Promotion {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub image: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::promotions)]
pub struct NewPromotion<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub image: Option<&'a str>,
    pub status: &'static str,
}

impl TryFrom<Promotion> for DomainPromotion {
    type Error = TypeConstraintError;

    fn try_from(promotion: Promotion) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PromotionId::new(promotion.id)?,
            title: PromotionTitle::new(promotion.title)?,
            url: PromotionUrl::new(promotion.url)?,
            image: promotion.image,
            status: promotion.status.parse()?,
            created_at: promotion.created_at,
            updated_at: promotion.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewPromotion> for NewPromotion<'a> {
    fn from(promotion: &'a DomainNewPromotion) -> Self {
        Self {
            title: promotion.title.as_str(),
            url: promotion.url.as_str(),
            image: promotion.image.as_deref(),
            status: promotion.status.as_str(),
        }
    }
}
