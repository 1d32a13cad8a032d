//! Service layer

mod provisioning_service;

pub use provisioning_service::ProvisioningService;
