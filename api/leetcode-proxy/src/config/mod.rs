pub mod environment;
pub mod upstream;
