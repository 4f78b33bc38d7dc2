pub mod commerzbank;
pub mod traits;

pub mod prelude {
    pub use super::commerzbank::prelude::*;
    pub use super::traits::Parser;
}
