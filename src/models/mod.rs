mod movie;

pub use movie::{MovieRecord, MovieResponse, MovieRow, NOT_AVAILABLE};
