//! Generic CRUD handlers.
//!
//! Each handler is generic over the entity type and pulls a
//! `web::Data<GenericService<E>>` from app data. `filter_from_query` is also
//! used by specialized controllers that build their own listings.

use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, Entity, Filter};
use crate::modules::common::controllers::Validated;
use crate::modules::common::services::GenericService;

/// Query string turned into an equality filter, e.g. `?role=designer`
pub fn filter_from_query(query: &HashMap<String, String>) -> Filter {
    let mut pairs: Vec<(&String, &String)> = query.iter().collect();
    pairs.sort();

    pairs
        .into_iter()
        .fold(Filter::all(), |filter, (column, value)| {
            filter.eq(column.clone(), value.clone())
        })
}

/// GET /{entity}
pub async fn find_all<E: Entity>(
    service: web::Data<GenericService<E>>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let filter = filter_from_query(&query);
    let entities = service.find_many(&filter).await?;

    Ok(HttpResponse::Ok().json(entities))
}

/// GET /{entity}/{id}
pub async fn find_one<E: Entity>(
    service: web::Data<GenericService<E>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let entity = service.find_one(&Filter::id(path.into_inner())).await?;

    Ok(HttpResponse::Ok().json(entity))
}

/// POST /{entity}
pub async fn create<E: Entity>(
    service: web::Data<GenericService<E>>,
    body: Validated<E::Create>,
) -> Result<HttpResponse, AppError> {
    let entity = service.create(&body).await?;

    Ok(HttpResponse::Created().json(entity))
}

/// PUT /{entity}/{id}
pub async fn update<E: Entity>(
    service: web::Data<GenericService<E>>,
    path: web::Path<String>,
    body: Validated<E::Update>,
) -> Result<HttpResponse, AppError> {
    let entity = service
        .update(&Filter::id(path.into_inner()), &body)
        .await?;

    Ok(HttpResponse::Ok().json(entity))
}

/// DELETE /{entity}/{id}
pub async fn delete<E: Entity>(
    service: web::Data<GenericService<E>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let entity = service.delete(&Filter::id(path.into_inner())).await?;

    Ok(HttpResponse::Ok().json(entity))
}

/// Mount the five CRUD routes for `E` under `E::PATH`
pub fn configure<E: Entity>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(E::PATH)
            .route("", web::get().to(find_all::<E>))
            .route("", web::post().to(create::<E>))
            .route("/{id}", web::get().to(find_one::<E>))
            .route("/{id}", web::put().to(update::<E>))
            .route("/{id}", web::delete().to(delete::<E>)),
    );
}
