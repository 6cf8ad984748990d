//! Image front end: palette quantization, CLUT remapping, geometry
//! parsing, and tile packing. Everything here is pure data
//! transformation — no image decoding, no file I/O (that's the CLI's
//! job, per `spec.md` §1's "external collaborators" framing).

pub mod bitmap;
pub mod clut;
pub mod geometry;
pub mod palette;
