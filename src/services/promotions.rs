//! Promotion banner creation.

use crate::domain::promotion::Promotion;
use crate::forms::promotions::CreatePromotionForm;
use crate::repository::PromotionWriter;
use crate::services::ServiceResult;
use crate::services::uploads::{discard_image, store_image};

pub fn create_promotion<R>(
    repo: &R,
    form: CreatePromotionForm,
    upload_dir: &str,
) -> ServiceResult<Promotion>
where
    R: PromotionWriter + ?Sized,
{
    let (payload, image) = form.into_parts();
    let mut new_promotion = payload.into_new_promotion(None).map_err(|err| {
        log::error!("Failed to validate promotion form: {err}");
        err
    })?;
    new_promotion.image = store_image(image, upload_dir)?;

    let promotion = repo.create_promotion(&new_promotion).map_err(|err| {
        log::error!("Failed to create promotion: {err}");
        discard_image(new_promotion.image.as_deref(), upload_dir);
        err
    })?;
    log::info!("Created promotion {}", promotion.id);

    Ok(promotion)
}
