//! Business orchestration between handlers and the repositories/storage.
//! Use cases never re-derive an error's classification; failures from below
//! pass through with `?`.

pub mod books;
pub mod files;

pub use books::BookUseCase;
pub use files::FileUseCase;
