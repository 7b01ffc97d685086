pub mod appointment_service;
pub mod booking_session;
pub mod slot_validator;
