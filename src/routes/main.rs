use actix_web::{Responder, get};

use crate::paths;
use crate::routes::redirect;

#[get("/")]
pub async fn show_index() -> impl Responder {
    redirect(paths::ITEMS)
}
