//! SQLx-backed persistence. Repositories classify failures at the point of
//! first detection and hand back [`crate::error::AppError`] unchanged to the
//! layers above.

pub mod books;
pub mod files;

pub use books::BookRepository;
pub use files::FileRepository;
