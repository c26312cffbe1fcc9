pub mod details;
pub mod event;
pub mod response;
pub mod status;
