#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod config;
pub mod error;
pub mod extract;
pub mod matching;
pub mod pipeline;
pub mod util;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use pipeline::{Hints, Pipeline, TraceOutput};

#[doc(inline)]
pub use inkroute_geo::{BoundingBox, GeoProjector};
