mod de;

pub mod category;
pub mod insight;
pub mod listing;
pub mod question;
pub mod saved;

pub use category::*;
pub use de::number_from_value;
pub use insight::*;
pub use listing::*;
pub use question::*;
pub use saved::*;
