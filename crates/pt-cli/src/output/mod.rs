mod file_output;

pub use file_output::FileOutput;
