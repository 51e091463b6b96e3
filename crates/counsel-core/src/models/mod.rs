pub mod definition;
pub mod question;
pub mod score;
pub mod scoring;
