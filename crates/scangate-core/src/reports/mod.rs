pub mod locate;
pub mod merge;
pub mod model;
pub mod read;
