pub mod capacity;
pub mod export;
pub mod guest_service;
pub mod import;
pub mod invitation;
pub mod phone;
