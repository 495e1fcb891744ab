pub mod film;
pub mod details;
pub mod source;

pub use film::FilmRecord;
pub use details::{FilmDetails, Runtime};
pub use source::SourceKind;
