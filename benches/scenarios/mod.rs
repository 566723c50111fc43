//! Real-world scenario benchmarks.
//!
//! Round generation as the practice loop calls it, and whole schedules
//! rendered the way a synthesis context renders them.

mod render;
mod rounds;

pub use render::bench_render;
pub use rounds::bench_rounds;
