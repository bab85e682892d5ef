// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO polars or linfa types allowed here
//   - NO file I/O beyond what the traits declare
//   - Only plain Rust structs, enums, and traits (plus chrono dates)
//
// Why keep this layer pure?
//   - Easy to unit test (no data files needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The monthly data-selection calendar arithmetic
pub mod period;

// Core abstractions (traits) that other layers implement
pub mod traits;
