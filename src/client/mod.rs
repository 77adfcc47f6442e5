//! Client Orchestrator Module
//!
//! Drives upload (wrap and submit a local file) and download (resolve the
//! block map, fetch with primary -> replica fallback, reassemble) against
//! one coordinator. Placement decisions stay on the coordinator side.

pub mod orchestrator;
