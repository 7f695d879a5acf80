//! Ports (abstraction seams for external collaborators).

mod sink;

pub use self::sink::{Sink, VecSink};
