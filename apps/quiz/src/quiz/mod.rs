// Quiz engine: balanced question selection and per-dimension scoring.
// Pure functions over in-memory inputs; no I/O.

pub mod scoring;
pub mod selection;
