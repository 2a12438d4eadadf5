// Central test module for quarry
//
// Extractor tests are grouped per strategy/language, mirroring the layout of
// src/extractors. Cross-cutting result invariants live in
// extractors/properties.rs.

pub mod extractors;
