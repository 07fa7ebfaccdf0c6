//! SeaORM entities, one per table, with conversions to and from the
//! domain types in `guestbook-core`.

pub mod comment;
pub mod guest_user;
pub mod object_media;
pub mod todo;
pub mod wedding_wish;
