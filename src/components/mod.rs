//! UI Components
//!
//! Reusable Leptos components.

mod tab_bar;
mod feed_page;
mod post_card;
mod post_form;
mod comment_section;
mod confirm_dialog;
mod notification_bar;

pub use tab_bar::TabBar;
pub use feed_page::FeedPage;
pub use post_card::PostCard;
pub use post_form::PostForm;
pub use comment_section::CommentSection;
pub use confirm_dialog::ConfirmDialog;
pub use notification_bar::NotificationBar;
