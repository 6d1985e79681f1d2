pub mod enums;
pub mod event;
pub mod guest;
pub mod invitation;
pub mod organizer;
