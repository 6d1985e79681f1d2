pub mod event;
pub mod guest;
pub mod guest_import;
pub mod health;
pub mod rsvp;
