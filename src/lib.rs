pub mod config;
pub mod error;
pub mod gateway;
pub mod logic;
pub mod model;
pub mod seed;

// Export error types
pub use error::{EntityKind, FetchError, FetchResult};

// Export gateway types
pub use gateway::{
    BranchGateway, CompanyGateway, DepartmentGateway, EmployeeGateway, Gateway, HttpGateway,
    MemoryGateway,
};

// Export logic types
pub use logic::{Denormalizer, FetchTicket, PageAccumulator, Resolver, ViewSession};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::load_sample_data;
