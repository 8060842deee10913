mod datetime;
mod encryption;
mod logs;
mod random_card_number;
mod shutdown;

pub use self::datetime::format_datetime;
pub use self::encryption::{CardCipher, CryptoError};
pub use self::logs::Logger;
pub use self::random_card_number::random_card_number;
pub use self::shutdown::shutdown_signal;
