pub mod poller_service;
pub mod practicum_service;
pub mod status_service;
pub mod telegram_service;
