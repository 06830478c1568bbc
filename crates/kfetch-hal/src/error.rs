pub use kfetch_error::{HalError, HalResult};
