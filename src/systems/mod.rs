pub mod sdk;
pub mod balance;
pub mod rounds;
pub mod events;
pub mod collapse;
pub mod ending;
#[cfg(feature = "system-commentary_digest")] pub mod digest;
