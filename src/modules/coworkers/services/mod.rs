use crate::modules::common::GenericService;
use crate::modules::coworkers::models::Coworker;

/// Coworkers need no operations beyond the generic ones
pub type CoworkerService = GenericService<Coworker>;
