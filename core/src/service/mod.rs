pub mod dto;
pub mod entry_service;
pub mod insights;
pub mod report;
