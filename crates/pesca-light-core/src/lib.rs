//! Platform-free domain logic for the accessory firmware.
//!
//! Everything in here is `no_std` and free of hardware or protocol
//! dependencies, so the tests run on the host.
#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod command;
pub mod intent;
pub mod state;
pub mod value;

#[cfg(test)]
pub(crate) mod test {
    pub(crate) fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
