pub use hc_core::{deadline, usecases};

pub mod entities {
    pub use hc_core::entities::*;
}

pub mod prelude {

    use std::result;

    pub use hc_application::error::*;

    pub use super::{deadline::Deadline, entities::*};

    pub type Result<T> = result::Result<T, hc_application::error::AppError>;
}
