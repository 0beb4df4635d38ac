pub mod assistant_service;
pub mod auth_service;
pub mod catalog_service;
pub mod content_service;
pub mod engagement_service;
