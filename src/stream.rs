/// Turns an input stream into the evaluation environments it exposes.
///
/// Decides between a single empty environment for interactive input, one
/// environment per line, or one environment for the whole buffered stream.
pub mod orchestrator;

/// Input and output stream selection and in-place replacement.
pub mod files;
