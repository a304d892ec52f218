pub mod canonical;
pub mod upstream;
