// Licensed under the Apache-2.0 license

pub mod acquisition;
pub mod config;
pub mod controller;
pub mod registers;
pub mod routing;
pub mod scale;
pub mod traits;

pub use acquisition::{Acquisition, CompletionHandler};
pub use config::{AdcClock, Reference, Sd16Config, Sd16ConfigBuilder};
pub use controller::Sd16;
pub use traits::Sd16Port;
