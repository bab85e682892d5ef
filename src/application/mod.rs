// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// the flow's goal (train on one month, validate on the next,
// persist the artifacts).
//
// Rules for this layer:
//   - No ML math or vectorization code here
//   - No UI or printing here (that's Layer 1)
//   - No direct parsing or file-format code (Layer 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The train + validate flow
pub mod flow;
