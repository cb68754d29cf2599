// Catalog module
// Destinations, service types and the services providers offer against them

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{Destination, Service, ServiceType};
pub use repository::{
    DestinationStore, PgDestinationRepository, PgServiceRepository, ServiceStore,
    ServiceTypeRepository,
};
