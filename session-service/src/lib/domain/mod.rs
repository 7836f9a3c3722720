pub mod clock;
pub mod credential;
pub mod token;
