//! Benchmark crate for superseq; see `benches/`.
