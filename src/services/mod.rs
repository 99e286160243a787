pub mod forms;
pub mod owner_service;
