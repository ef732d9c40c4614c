pub mod ansi;
pub mod opener;
pub mod unicode;
