pub mod todo;
pub mod wedding;

pub use todo::{Todo, TodoFilter, TodoLookup, TodoPatch};
pub use wedding::{
    Comment, CommentFeedItem, CommentFilter, GuestUser, GuestUserFilter, MediaFilter, MediaKind,
    ObjectMedia, WeddingWish, WishFeedItem, WishFilter,
};
