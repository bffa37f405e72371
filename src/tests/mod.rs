// Licensed under the Apache-2.0 license

//! Host-side harness: a simulated register file, a simulated bus master and
//! end-to-end scenarios built on them.
