// Test Application Helpers
//
// Builds the production route table on top of in-memory storage.

/// Initialise the full application service.
///
/// `spawn_app!()` uses fresh in-memory storage; `spawn_app!(services)` reuses
/// an existing `AppServices` so a test can inspect state directly.
macro_rules! spawn_app {
    () => {
        spawn_app!(contractdesk::app::AppServices::memory())
    };
    ($services:expr) => {{
        let services: contractdesk::app::AppServices = $services;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(contractdesk::middleware::RequestId)
                .configure(move |cfg| contractdesk::app::configure(&services, cfg)),
        )
        .await
    }};
}
