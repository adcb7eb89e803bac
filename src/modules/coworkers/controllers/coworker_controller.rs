//! Coworker routes: the generic CRUD surface mounted at `/coworkers`.

use actix_web::web;

use crate::modules::common::controllers::generic_controller;
use crate::modules::coworkers::models::Coworker;

/// Configure coworker routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    generic_controller::configure::<Coworker>(cfg);
}
