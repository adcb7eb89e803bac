// Test Helper Modules
//
// Shared infrastructure for the integration tests. The HTTP tests run the
// full route table against the in-memory backend; MySQL-backed tests create
// a throwaway database per test from TEST_DATABASE_URL.
//
// Usage:
//   #[macro_use]
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//
//   #[actix_web::test]
//   async fn test_list_coworkers() {
//       let app = spawn_app!();
//       let req = test::TestRequest::get().uri("/coworkers").to_request();
//       let resp = test::call_service(&app, req).await;
//       assert_ok(&resp);
//   }

#![allow(dead_code, unused_imports, unused_macros)]

pub mod assertions;
#[macro_use]
pub mod test_app;
pub mod test_data;

// Re-export commonly used types and functions
pub use assertions::*;
pub use test_data::*;
pub use test_database::*;
