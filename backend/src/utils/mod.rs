pub mod error;
pub mod i18n;

pub use error::{ApiError, ApiResult};
pub use i18n::{Locale, current_locale, locale_from_header, set_locale};
