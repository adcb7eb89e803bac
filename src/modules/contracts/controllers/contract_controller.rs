use std::collections::HashMap;

use actix_web::{http::header, web, HttpResponse};

use crate::core::AppError;
use crate::modules::common::controllers::{generic_controller, Validated};
use crate::modules::contracts::models::{
    CreateContractDto, NewContractValue, UpdateContractDto, UpdateContractStatusDto,
};
use crate::modules::contracts::services::ContractService;

/// Create a contract together with its initial value
/// POST /contracts
pub async fn create_contract(
    service: web::Data<ContractService>,
    body: Validated<CreateContractDto>,
) -> Result<HttpResponse, AppError> {
    let contract = service.create_with_initial_value(&body).await?;

    Ok(HttpResponse::Created().json(contract))
}

/// List contracts, each with its latest value
/// GET /contracts?status=Active
pub async fn list_contracts(
    service: web::Data<ContractService>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let filter = generic_controller::filter_from_query(&query);
    let contracts = service.find_contracts_with_latest_value(&filter).await?;

    Ok(HttpResponse::Ok().json(contracts))
}

/// Get one contract with its latest value
/// GET /contracts/{id}
pub async fn get_contract(
    service: web::Data<ContractService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let contract = service.find_contract_with_latest_value(&path).await?;

    Ok(HttpResponse::Ok().json(contract))
}

/// Update contract fields
/// PUT /contracts/{id}
pub async fn update_contract(
    service: web::Data<ContractService>,
    path: web::Path<String>,
    body: Validated<UpdateContractDto>,
) -> Result<HttpResponse, AppError> {
    let contract = service.update_contract(&path, &body).await?;

    Ok(HttpResponse::Ok().json(contract))
}

/// Delete a contract and its value history
/// DELETE /contracts/{id}
pub async fn delete_contract(
    service: web::Data<ContractService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let contract = service.delete_contract(&path).await?;

    Ok(HttpResponse::Ok().json(contract))
}

/// Replace a contract's status
/// PUT /contracts/{id}/status
pub async fn update_contract_status(
    service: web::Data<ContractService>,
    path: web::Path<String>,
    body: Validated<UpdateContractStatusDto>,
) -> Result<HttpResponse, AppError> {
    let contract = service.update_contract_status(&path, body.status).await?;

    Ok(HttpResponse::Ok().json(contract))
}

/// Value history, newest first
/// GET /contracts/{id}/values
pub async fn list_contract_values(
    service: web::Data<ContractService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let values = service.list_values(&path).await?;

    Ok(HttpResponse::Ok().json(values))
}

/// Record a new contract value
/// POST /contracts/{id}/values
pub async fn add_contract_value(
    service: web::Data<ContractService>,
    path: web::Path<String>,
    body: Validated<NewContractValue>,
) -> Result<HttpResponse, AppError> {
    let value = service.add_value(&path, &body).await?;

    Ok(HttpResponse::Created().json(value))
}

/// Download the contract as a document
/// GET /contracts/{id}/document
pub async fn download_contract_document(
    service: web::Data<ContractService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let document = service.render_document(&path).await?;

    Ok(HttpResponse::Ok()
        .content_type(document.content_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
        ))
        .body(document.bytes))
}

/// Configure contract routes.
///
/// Every response body that carries a contract includes its latest value.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(list_contracts))
            .route("", web::post().to(create_contract))
            .route("/{id}", web::get().to(get_contract))
            .route("/{id}", web::put().to(update_contract))
            .route("/{id}", web::delete().to(delete_contract))
            .route("/{id}/status", web::put().to(update_contract_status))
            .route("/{id}/values", web::get().to(list_contract_values))
            .route("/{id}/values", web::post().to(add_contract_value))
            .route("/{id}/document", web::get().to(download_contract_document)),
    );
}
