//! Configuration value objects for the domain layer

mod fc_mode;

pub use fc_mode::FunctionCallingMode;
